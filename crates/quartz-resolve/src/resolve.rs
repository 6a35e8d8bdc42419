//! Name resolution against the builtin environment and user scopes.
//!
//! The resolver owns the fall-through order: every free identifier is
//! checked against the builtin environment first, then against user scopes
//! from innermost to outermost. Only the resolver decides that an absent
//! name is a user-program error; absence from the environment alone is a
//! normal signal.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use quartz_common::span::Span;

use crate::builtins::BuiltinEntity;
use crate::error::{ResolveError, ResolveErrorKind};
use crate::prelude::Environment;

/// Handle for one user-defined binding, unique within a resolver.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct LocalId(pub u32);

/// What a free identifier resolved to.
#[derive(Clone, Debug)]
pub enum Binding {
    /// A pre-resolved builtin entity.
    Builtin(Arc<BuiltinEntity>),
    /// A user-defined binding declared in some enclosing scope.
    Local(LocalId),
}

/// Scope-stack resolver over a built [`Environment`].
///
/// Borrows the environment immutably, so many resolvers (one per
/// compilation unit) can share a single table.
pub struct Resolver<'env> {
    env: &'env Environment,
    scopes: Vec<FxHashMap<String, LocalId>>,
    next_local: u32,
}

impl<'env> Resolver<'env> {
    /// Create a resolver with a single root scope.
    pub fn new(env: &'env Environment) -> Self {
        Resolver {
            env,
            scopes: vec![FxHashMap::default()],
            next_local: 0,
        }
    }

    /// Enter a nested scope.
    pub fn push_scope(&mut self) {
        self.scopes.push(FxHashMap::default());
    }

    /// Leave the innermost scope, dropping its bindings. The root scope is
    /// never popped.
    pub fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    /// Declare a user binding in the innermost scope, shadowing any outer
    /// binding of the same name.
    pub fn declare(&mut self, name: impl Into<String>) -> LocalId {
        let id = LocalId(self.next_local);
        self.next_local += 1;
        self.scopes
            .last_mut()
            .expect("resolver always has a root scope")
            .insert(name.into(), id);
        id
    }

    /// Resolve a free identifier used at `span`.
    ///
    /// Builtins win over user bindings; user scopes are then searched
    /// innermost first. Absence everywhere is an undefined-name error.
    pub fn resolve(&self, name: &str, span: Span) -> Result<Binding, ResolveError> {
        if let Some(entity) = self.env.lookup(name) {
            return Ok(Binding::Builtin(Arc::clone(entity)));
        }
        for scope in self.scopes.iter().rev() {
            if let Some(&id) = scope.get(name) {
                return Ok(Binding::Local(id));
            }
        }
        Err(ResolveError::new(
            ResolveErrorKind::UndefinedName(name.to_string()),
            span,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::build;

    #[test]
    fn pop_never_removes_the_root_scope() {
        let env = build().unwrap();
        let mut resolver = Resolver::new(&env);
        resolver.pop_scope();
        resolver.pop_scope();
        // Declarations still land somewhere after spurious pops.
        let id = resolver.declare("x");
        assert!(matches!(
            resolver.resolve("x", Span::new(0, 1)),
            Ok(Binding::Local(found)) if found == id
        ));
    }

    #[test]
    fn local_ids_are_unique() {
        let env = build().unwrap();
        let mut resolver = Resolver::new(&env);
        let a = resolver.declare("a");
        let b = resolver.declare("b");
        assert_ne!(a, b);
    }
}
