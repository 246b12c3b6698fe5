use std::any::{Any, TypeId, type_name};
use std::collections::BTreeMap;
use std::fmt::Debug;
use std::future::Future;
use std::pin::Pin;

use tokio_util::sync::CancellationToken;

use crate::{Compute, LatestOnlyUpdater, State};

/// Future returned by [`Command::run`].
///
/// It must be `Send` on every target; the HTTP layer takes care of keeping
/// wasm32 futures `Send` by hopping through a channel.
pub type CommandFuture = Pin<Box<dyn Future<Output = ()> + Send>>;

/// A manual-only side effect (network IO, navigation after a save, ...).
///
/// Commands never run implicitly. The UI calls `ctx.dispatch::<C>()`, and the
/// next `flush_commands` hands the command a snapshot of all states and computes,
/// an updater that only accepts writes from the latest dispatch, and a
/// cancellation token that fires once a newer dispatch of the same command
/// supersedes this one.
pub trait Command: Any + Send + Sync + Debug {
    fn run(
        &self,
        snap: CommandSnapshot,
        updater: LatestOnlyUpdater,
        cancel: CancellationToken,
    ) -> CommandFuture;
}

/// Owned clones of every state and compute, taken at flush time.
#[derive(Default)]
pub struct CommandSnapshot {
    inner: BTreeMap<TypeId, Box<dyn Any + Send>>,
}

impl CommandSnapshot {
    pub fn new() -> Self {
        Self {
            inner: BTreeMap::new(),
        }
    }

    pub fn insert_cloned(&mut self, id: TypeId, value: Box<dyn Any + Send>) {
        self.inner.insert(id, value);
    }

    fn get<T: Any>(&self) -> &T {
        self.inner
            .get(&TypeId::of::<T>())
            .and_then(|boxed| boxed.downcast_ref::<T>())
            .unwrap_or_else(|| panic!("Snapshot for {} is missing", type_name::<T>()))
    }

    pub fn state<T: State>(&self) -> &T {
        self.get::<T>()
    }

    pub fn compute<T: Compute>(&self) -> &T {
        self.get::<T>()
    }
}

impl Debug for CommandSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandSnapshot")
            .field("entries", &self.inner.len())
            .finish()
    }
}
