//! The builtin entity catalog for the Quartz kernel language.
//!
//! Every name in the initial global environment maps to a [`BuiltinEntity`]
//! descriptor: a tagged, pre-resolved symbol that later phases (name
//! resolution, type checking, lowering) branch on via [`EntityKind`]. The
//! catalog records identity, kind, and arity class only -- full type
//! signatures and lowering rules live with the phases that consume them.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

/// Discriminant for the closed set of builtin entity shapes.
///
/// Consumers match exhaustively on this instead of inspecting entities at
/// runtime: callables get arity checks, `DecoratorMarker` switches the
/// compilation mode of the decorated function, and `ContextManager` names
/// are opaque markers the scheduling lowering recognizes in `with` blocks.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum EntityKind {
    /// Callable producing a value of a fixed builtin type (`int`, `list`, ...).
    ValueConstructor,
    /// Callable producing an exception value of a named kind.
    ExceptionConstructor,
    /// General computational helper (`len`, `round`, `min`, ...).
    UtilityFunction,
    /// Changes how the decorated function is compiled; produces no runtime
    /// value of its own.
    DecoratorMarker,
    /// Non-callable marker with scoped entry/exit semantics, used for
    /// timeline composition (`parallel`, `interleave`, `sequential`).
    ContextManager,
    /// Operates on the machine-unit time domain (`now_mu`, `delay`, ...).
    TimingFunction,
    /// Diagnostic/event emission (`rtio_log`).
    LoggingFunction,
}

impl EntityKind {
    /// Whether entities of this kind may appear in call position.
    pub fn is_callable(self) -> bool {
        !matches!(self, EntityKind::ContextManager)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EntityKind::ValueConstructor => "value constructor",
            EntityKind::ExceptionConstructor => "exception constructor",
            EntityKind::UtilityFunction => "utility function",
            EntityKind::DecoratorMarker => "decorator",
            EntityKind::ContextManager => "context manager",
            EntityKind::TimingFunction => "timing function",
            EntityKind::LoggingFunction => "logging function",
        };
        write!(f, "{s}")
    }
}

/// Arity class of a callable builtin.
///
/// Only the argument-count envelope is recorded here. The type checker
/// owns the full signatures and uses this class to report wrong-arity
/// calls.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum Arity {
    /// Exactly `n` arguments.
    Exact(usize),
    /// Between `min` and `max` arguments, inclusive.
    Between(usize, usize),
    /// `min` or more arguments.
    AtLeast(usize),
}

impl Arity {
    /// Whether a call with `n` arguments fits this arity class.
    pub fn accepts(self, n: usize) -> bool {
        match self {
            Arity::Exact(k) => n == k,
            Arity::Between(min, max) => n >= min && n <= max,
            Arity::AtLeast(min) => n >= min,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exact(k) => write!(f, "exactly {k}"),
            Arity::Between(min, max) => write!(f, "{min} to {max}"),
            Arity::AtLeast(min) => write!(f, "at least {min}"),
        }
    }
}

/// One pre-resolved builtin symbol.
///
/// Entities are allocated once, inside `Arc`s, during environment
/// construction. Two environment keys may share one entity (`kernel` /
/// `portable`, `core_log` / `print`); later passes compare such aliases by
/// reference, so identity must be preserved, not just structure.
#[derive(Debug, Serialize)]
pub struct BuiltinEntity {
    name: &'static str,
    kind: EntityKind,
    arity: Option<Arity>,
}

impl BuiltinEntity {
    /// Canonical name of the entity. An aliased key reports the canonical
    /// name of the entity it points at, not the key it was looked up by.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The discriminant consumers branch on.
    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Arity class, or `None` for non-callable entities.
    pub fn arity(&self) -> Option<Arity> {
        self.arity
    }

    /// Whether two references denote the very same entity.
    ///
    /// Aliases are installed by sharing one `Arc`, so reference equality
    /// is the aliasing test.
    pub fn same_entity(a: &Arc<BuiltinEntity>, b: &Arc<BuiltinEntity>) -> bool {
        Arc::ptr_eq(a, b)
    }

    pub(crate) fn value_constructor(name: &'static str, arity: Arity) -> Arc<Self> {
        Arc::new(BuiltinEntity {
            name,
            kind: EntityKind::ValueConstructor,
            arity: Some(arity),
        })
    }

    /// Exception constructors all accept an optional message plus payload.
    pub(crate) fn exception_constructor(name: &'static str) -> Arc<Self> {
        Arc::new(BuiltinEntity {
            name,
            kind: EntityKind::ExceptionConstructor,
            arity: Some(Arity::AtLeast(0)),
        })
    }

    pub(crate) fn utility(name: &'static str, arity: Arity) -> Arc<Self> {
        Arc::new(BuiltinEntity {
            name,
            kind: EntityKind::UtilityFunction,
            arity: Some(arity),
        })
    }

    /// A decorator takes exactly the function it annotates.
    pub(crate) fn decorator(name: &'static str) -> Arc<Self> {
        Arc::new(BuiltinEntity {
            name,
            kind: EntityKind::DecoratorMarker,
            arity: Some(Arity::Exact(1)),
        })
    }

    /// Context-manager objects are never called; they are named in `with`
    /// blocks and consumed as-is by the scheduling lowering.
    pub(crate) fn context_manager(name: &'static str) -> Arc<Self> {
        Arc::new(BuiltinEntity {
            name,
            kind: EntityKind::ContextManager,
            arity: None,
        })
    }

    pub(crate) fn timing(name: &'static str, arity: Arity) -> Arc<Self> {
        Arc::new(BuiltinEntity {
            name,
            kind: EntityKind::TimingFunction,
            arity: Some(arity),
        })
    }

    pub(crate) fn logging(name: &'static str, arity: Arity) -> Arc<Self> {
        Arc::new(BuiltinEntity {
            name,
            kind: EntityKind::LoggingFunction,
            arity: Some(arity),
        })
    }
}

impl fmt::Display for BuiltinEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} `{}`", self.kind, self.name)
    }
}
