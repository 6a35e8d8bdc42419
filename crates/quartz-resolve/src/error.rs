//! Error types for environment construction and name resolution.
//!
//! The two taxonomies are deliberately separate: [`PreludeError`] is a
//! compiler-internal defect that aborts startup and never reaches user
//! diagnostics, while [`ResolveError`] is the user-facing report the
//! resolver produces when a free identifier is bound nowhere. Absence of a
//! name from the environment alone is *not* an error at that layer.

use std::fmt;

use serde::Serialize;

use quartz_common::span::Span;

use crate::builtins::EntityKind;

/// Internal failure while assembling the builtin catalog.
///
/// Raised only when the fixed catalog is internally inconsistent. This is
/// a defect in the compiler itself, detected by the startup self-check; it
/// cannot be triggered by any user program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreludeError {
    /// Two registrations used the same environment key.
    DuplicateBuiltin {
        name: String,
        existing: EntityKind,
        incoming: EntityKind,
    },
    /// An alias referenced a key that has not been registered.
    UnknownAliasTarget { alias: String, target: String },
}

impl fmt::Display for PreludeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreludeError::DuplicateBuiltin {
                name,
                existing,
                incoming,
            } => write!(
                f,
                "duplicate builtin `{name}`: registered as {existing}, re-registered as {incoming}"
            ),
            PreludeError::UnknownAliasTarget { alias, target } => {
                write!(f, "alias `{alias}` targets unknown builtin `{target}`")
            }
        }
    }
}

impl std::error::Error for PreludeError {}

/// A name-resolution error with location information.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolveError {
    pub kind: ResolveErrorKind,
    pub span: Span,
}

impl ResolveError {
    /// Create a new resolution error.
    pub fn new(kind: ResolveErrorKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// The specific kind of resolution error.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ResolveErrorKind {
    /// An identifier is neither a builtin nor bound in any enclosing scope.
    UndefinedName(String),
}

impl fmt::Display for ResolveErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UndefinedName(name) => write!(f, "undefined name: {name}"),
        }
    }
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

impl std::error::Error for ResolveError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_builtin_display() {
        let err = PreludeError::DuplicateBuiltin {
            name: "len".to_string(),
            existing: EntityKind::UtilityFunction,
            incoming: EntityKind::TimingFunction,
        };
        assert_eq!(
            err.to_string(),
            "duplicate builtin `len`: registered as utility function, re-registered as timing function"
        );
    }

    #[test]
    fn unknown_alias_target_display() {
        let err = PreludeError::UnknownAliasTarget {
            alias: "core_log".to_string(),
            target: "print".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "alias `core_log` targets unknown builtin `print`"
        );
    }

    #[test]
    fn resolve_error_display() {
        let err = ResolveError::new(
            ResolveErrorKind::UndefinedName("frobnicate".to_string()),
            Span::new(0, 10),
        );
        assert_eq!(err.to_string(), "undefined name: frobnicate");
    }
}
