//! Initial global environment for the Quartz compiler.
//!
//! Quartz kernels are checked against a fixed builtin symbol table built
//! once per compiler session: value and exception constructors, utility
//! functions, the `kernel`/`portable` compilation-mode decorators, the
//! scheduling context managers (`parallel`, `interleave`, `sequential`),
//! machine-unit timing functions, and diagnostic logging.
//!
//! This crate builds that table ([`prelude::build`]), resolves free
//! identifiers against it with fall-through to user scopes
//! ([`resolve::Resolver`]), and renders resolution errors
//! ([`diagnostics`]). The table is immutable after construction and its
//! entities sit behind `Arc`s, so one environment can serve concurrent
//! compilations without locking.

pub mod builtins;
pub mod diagnostics;
pub mod error;
pub mod prelude;
pub mod resolve;

pub use builtins::{Arity, BuiltinEntity, EntityKind};
pub use error::{PreludeError, ResolveError, ResolveErrorKind};
pub use prelude::{build, Environment};
pub use resolve::{Binding, LocalId, Resolver};
