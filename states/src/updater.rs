use std::any::{Any, TypeId, type_name};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use flume::Sender;
use log::debug;

use crate::TaskId;

pub(crate) type Edit = Box<dyn FnOnce(&mut dyn Any) -> bool + Send>;

/// What a queued update does to its entry.
pub(crate) enum Payload {
    /// Replaces the whole value.
    Value(Box<dyn Any + Send>),
    /// Modifies the value current at apply time.
    Edit(Edit),
}

pub(crate) type Update = (TypeId, &'static str, Payload);

/// Sends replacement values for states or computes back to the context.
///
/// Values are applied on the next `StateCtx::sync_computes`, which the UI runs at
/// the start of every frame.
#[derive(Debug, Clone)]
pub struct Updater {
    send: Sender<Update>,
}

impl Updater {
    pub(crate) fn new(send: Sender<Update>) -> Self {
        Self { send }
    }

    pub fn set<T: Any + Send>(&self, value: T) {
        self.send_payload::<T>(Payload::Value(Box::new(value)));
    }

    /// Queues a change against whatever value the entry holds when updates are
    /// applied, so edits from concurrent commands compose instead of replacing
    /// each other with stale snapshots.
    pub fn edit<T: Any + Send>(&self, edit: impl FnOnce(&mut T) + Send + 'static) {
        let edit: Edit = Box::new(move |value: &mut dyn Any| match value.downcast_mut::<T>() {
            Some(value) => {
                edit(value);
                true
            }
            None => false,
        });
        self.send_payload::<T>(Payload::Edit(edit));
    }

    pub(crate) fn send_payload<T: Any>(&self, payload: Payload) {
        let update: Update = (TypeId::of::<T>(), type_name::<T>(), payload);
        if self.send.send(update).is_err() {
            debug!("StateCtx dropped, discarding update for {}", type_name::<T>());
        }
    }
}

/// An [`Updater`] bound to one dispatch of a command.
///
/// Once the same command is dispatched again, writes from the older task are
/// dropped, so a slow superseded fetch can never overwrite newer results.
#[derive(Debug, Clone)]
pub struct LatestOnlyUpdater {
    inner: Updater,
    task: TaskId,
    latest: Arc<AtomicU64>,
}

impl LatestOnlyUpdater {
    pub(crate) fn new(inner: Updater, task: TaskId, latest: Arc<AtomicU64>) -> Self {
        Self {
            inner,
            task,
            latest,
        }
    }

    pub fn task_id(&self) -> TaskId {
        self.task
    }

    pub fn is_latest(&self) -> bool {
        self.latest.load(Ordering::Acquire) == self.task.generation()
    }

    pub fn set<T: Any + Send>(&self, value: T) {
        if self.is_latest() {
            self.inner.set(value);
        } else {
            self.log_stale::<T>();
        }
    }

    pub fn edit<T: Any + Send>(&self, edit: impl FnOnce(&mut T) + Send + 'static) {
        if self.is_latest() {
            self.inner.edit(edit);
        } else {
            self.log_stale::<T>();
        }
    }

    fn log_stale<T>(&self) {
        debug!(
            "Dropping stale update for {} from generation {}",
            type_name::<T>(),
            self.task.generation()
        );
    }
}
