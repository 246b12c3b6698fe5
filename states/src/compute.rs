use std::any::{Any, TypeId, type_name};
use std::collections::BTreeMap;
use std::fmt::Debug;

use crate::ctx::Entry;
use crate::{State, Updater};

/// A cached value that is either derived from other entries or written by a
/// command through an [`Updater`].
///
/// Derived computes list their inputs in [`Compute::deps`]; whenever one of those
/// entries changes, `StateCtx::sync_computes` calls [`Compute::compute`] again and
/// the new value arrives through the updater.
///
/// Command-written caches keep the default no-op `compute`: network IO must not
/// run implicitly during a sync.
pub trait Compute: Any + Send + Clone + Debug {
    /// Type ids of the states and computes this compute is derived from.
    fn deps(&self) -> Vec<TypeId> {
        Vec::new()
    }

    fn compute(&self, deps: Dep<'_>, updater: Updater) {
        let _ = (deps, updater);
    }
}

/// Read-only view over the context handed to [`Compute::compute`].
pub struct Dep<'a> {
    entries: &'a BTreeMap<TypeId, Entry>,
}

impl<'a> Dep<'a> {
    pub(crate) fn new(entries: &'a BTreeMap<TypeId, Entry>) -> Self {
        Self { entries }
    }

    fn get<T: Any>(&self) -> &'a T {
        self.entries
            .get(&TypeId::of::<T>())
            .and_then(|entry| entry.value.as_any().downcast_ref::<T>())
            .unwrap_or_else(|| panic!("{} is not registered in StateCtx", type_name::<T>()))
    }

    pub fn state<T: State>(&self) -> &'a T {
        self.get::<T>()
    }

    pub fn compute<T: Compute>(&self) -> &'a T {
        self.get::<T>()
    }
}
