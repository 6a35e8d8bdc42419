//! Construction of the initial global environment.
//!
//! [`build`] assembles the fixed, hand-curated set of builtin names into an
//! immutable [`Environment`]. It is pure: no inputs, no side effects, and
//! two invocations produce structurally equal environments. The name
//! resolver consults the environment for every free identifier before
//! falling through to user-defined scopes.

use std::collections::hash_map::Entry;
use std::sync::Arc;

use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::builtins::{Arity, BuiltinEntity, EntityKind};
use crate::error::PreludeError;

/// The immutable builtin symbol table.
///
/// Constructed once per compiler session by [`build`] and read-only
/// thereafter. Entities sit behind `Arc`s with no interior mutability, so
/// one table can be shared across concurrent sessions without locking.
#[derive(Debug, Default)]
pub struct Environment {
    entries: FxHashMap<String, Arc<BuiltinEntity>>,
}

/// One row of [`Environment::listing`]: an environment key and the kind of
/// the entity it resolves to.
#[derive(Debug, Serialize)]
pub struct ListingEntry {
    pub name: String,
    pub kind: EntityKind,
}

impl Environment {
    /// Look up a builtin by exact name. O(1) expected.
    ///
    /// Absence is a normal "not found here" signal, not an error: the
    /// resolver falls through to user-defined scopes.
    pub fn lookup(&self, name: &str) -> Option<&Arc<BuiltinEntity>> {
        self.entries.get(name)
    }

    /// Number of environment keys (aliases count separately).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over all (key, entity) pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<BuiltinEntity>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// All environment keys, sorted for deterministic output.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Sorted (key, kind) listing for driver tooling and debugging dumps.
    pub fn listing(&self) -> Vec<ListingEntry> {
        let mut rows: Vec<ListingEntry> = self
            .entries
            .iter()
            .map(|(name, entity)| ListingEntry {
                name: name.clone(),
                kind: entity.kind(),
            })
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        rows
    }

    /// JSON form of [`Environment::listing`], used by the driver's
    /// dump-builtins flag.
    pub fn listing_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.listing())
    }

    /// Register `entity` under `name`. Registering a key twice is a defect
    /// in the catalog itself, never a user-program error.
    fn insert(
        &mut self,
        name: &'static str,
        entity: Arc<BuiltinEntity>,
    ) -> Result<(), PreludeError> {
        match self.entries.entry(name.to_string()) {
            Entry::Occupied(existing) => Err(PreludeError::DuplicateBuiltin {
                name: name.to_string(),
                existing: existing.get().kind(),
                incoming: entity.kind(),
            }),
            Entry::Vacant(slot) => {
                slot.insert(entity);
                Ok(())
            }
        }
    }

    /// Install `alias` as a second key for the entity already registered
    /// under `target`. The two keys share one `Arc`; later passes compare
    /// aliases by reference.
    fn alias(&mut self, alias: &'static str, target: &str) -> Result<(), PreludeError> {
        let entity = self.entries.get(target).cloned().ok_or_else(|| {
            PreludeError::UnknownAliasTarget {
                alias: alias.to_string(),
                target: target.to_string(),
            }
        })?;
        self.insert(alias, entity)
    }
}

/// Build the initial global environment.
///
/// Deterministic and total: the builtin set is a compile-time constant of
/// the compiler, so two calls yield structurally equal environments. `Err`
/// means the catalog below is internally inconsistent (a duplicate key or
/// an alias to a missing target) -- a Quartz defect surfaced by the
/// startup self-check, not a diagnostic for user programs.
pub fn build() -> Result<Environment, PreludeError> {
    let mut env = Environment::default();

    // ── Value constructors ─────────────────────────────────────────────

    env.insert("bool", BuiltinEntity::value_constructor("bool", Arity::Between(0, 1)))?;
    // `int` takes an optional value and an optional width.
    env.insert("int", BuiltinEntity::value_constructor("int", Arity::Between(0, 2)))?;
    env.insert("float", BuiltinEntity::value_constructor("float", Arity::Between(0, 1)))?;
    env.insert("list", BuiltinEntity::value_constructor("list", Arity::Between(0, 1)))?;
    env.insert("array", BuiltinEntity::value_constructor("array", Arity::Between(0, 1)))?;
    env.insert("range", BuiltinEntity::value_constructor("range", Arity::Between(1, 3)))?;

    // ── Exception constructors ─────────────────────────────────────────

    env.insert("Exception", BuiltinEntity::exception_constructor("Exception"))?;
    env.insert("IndexError", BuiltinEntity::exception_constructor("IndexError"))?;
    env.insert("ValueError", BuiltinEntity::exception_constructor("ValueError"))?;
    env.insert(
        "ZeroDivisionError",
        BuiltinEntity::exception_constructor("ZeroDivisionError"),
    )?;

    // ── Utility functions ──────────────────────────────────────────────

    env.insert("len", BuiltinEntity::utility("len", Arity::Exact(1)))?;
    env.insert("round", BuiltinEntity::utility("round", Arity::Exact(1)))?;
    env.insert("min", BuiltinEntity::utility("min", Arity::Exact(2)))?;
    env.insert("max", BuiltinEntity::utility("max", Arity::Exact(2)))?;
    env.insert("print", BuiltinEntity::utility("print", Arity::AtLeast(0)))?;
    // `watchdog(timeout)` yields a scoped watchdog; the block scoping is
    // lowered by later stages, the callable itself is a plain utility.
    env.insert("watchdog", BuiltinEntity::utility("watchdog", Arity::Exact(1)))?;

    // ── Compilation-mode decorators ────────────────────────────────────

    // `portable` is an alias of `kernel` today: one shared entity behind
    // two keys, compared by reference downstream.
    env.insert("kernel", BuiltinEntity::decorator("kernel"))?;
    env.alias("portable", "kernel")?;

    // ── Scheduling context managers ────────────────────────────────────

    env.insert("parallel", BuiltinEntity::context_manager("parallel"))?;
    env.insert("interleave", BuiltinEntity::context_manager("interleave"))?;
    env.insert("sequential", BuiltinEntity::context_manager("sequential"))?;

    // ── Timing functions ───────────────────────────────────────────────

    env.insert("delay", BuiltinEntity::timing("delay", Arity::Exact(1)))?;
    env.insert("now_mu", BuiltinEntity::timing("now_mu", Arity::Exact(0)))?;
    env.insert("delay_mu", BuiltinEntity::timing("delay_mu", Arity::Exact(1)))?;
    env.insert("at_mu", BuiltinEntity::timing("at_mu", Arity::Exact(1)))?;
    env.insert("mu_to_seconds", BuiltinEntity::timing("mu_to_seconds", Arity::Exact(1)))?;
    env.insert("seconds_to_mu", BuiltinEntity::timing("seconds_to_mu", Arity::Exact(1)))?;

    // ── Diagnostic functions ───────────────────────────────────────────

    env.insert("rtio_log", BuiltinEntity::logging("rtio_log", Arity::AtLeast(1)))?;
    env.alias("core_log", "print")?;

    Ok(env)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_key_is_a_construction_error() {
        let mut env = Environment::default();
        env.insert("len", BuiltinEntity::utility("len", Arity::Exact(1)))
            .unwrap();
        let err = env
            .insert("len", BuiltinEntity::timing("len", Arity::Exact(1)))
            .unwrap_err();
        assert_eq!(
            err,
            PreludeError::DuplicateBuiltin {
                name: "len".to_string(),
                existing: EntityKind::UtilityFunction,
                incoming: EntityKind::TimingFunction,
            }
        );
    }

    #[test]
    fn alias_to_missing_target_is_a_construction_error() {
        let mut env = Environment::default();
        let err = env.alias("core_log", "print").unwrap_err();
        assert_eq!(
            err,
            PreludeError::UnknownAliasTarget {
                alias: "core_log".to_string(),
                target: "print".to_string(),
            }
        );
    }

    #[test]
    fn alias_shares_the_target_entity() {
        let mut env = Environment::default();
        env.insert("print", BuiltinEntity::utility("print", Arity::AtLeast(0)))
            .unwrap();
        env.alias("core_log", "print").unwrap();
        let print = env.lookup("print").unwrap();
        let core_log = env.lookup("core_log").unwrap();
        assert!(BuiltinEntity::same_entity(print, core_log));
    }

    #[test]
    fn listing_is_sorted_by_key() {
        let env = build().unwrap();
        let listing = env.listing();
        assert_eq!(listing.len(), env.len());
        for pair in listing.windows(2) {
            assert!(pair[0].name < pair[1].name);
        }
    }

    #[test]
    fn listing_json_round_trips_through_serde() {
        let env = build().unwrap();
        let json = env.listing_json().unwrap();
        assert!(json.contains("\"len\""));
        assert!(json.contains("UtilityFunction"));
        assert!(json.contains("ContextManager"));
    }
}
