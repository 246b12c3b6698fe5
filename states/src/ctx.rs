use std::any::{Any, TypeId, type_name};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Debug;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use flume::Receiver;
use log::{debug, error, trace, warn};
use tokio_util::sync::CancellationToken;

use crate::updater::{Payload, Update};
use crate::{
    Command, CommandFuture, CommandSnapshot, Compute, Dep, LatestOnlyUpdater, State, StateError,
    TaskHandle, TaskId, Updater,
};

#[cfg(not(target_arch = "wasm32"))]
use tokio::task::JoinSet;

#[cfg(target_arch = "wasm32")]
use std::sync::atomic::AtomicUsize;

/// Upper bound on derived-compute passes per sync. A dependency cycle would
/// otherwise spin forever.
const MAX_SYNC_PASSES: usize = 16;

pub(crate) trait Slot: Send {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn clone_boxed(&self) -> Box<dyn Any + Send>;
    fn assign(&mut self, value: Box<dyn Any + Send>) -> bool;
}

impl<T: Any + Send + Clone> Slot for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn clone_boxed(&self) -> Box<dyn Any + Send> {
        Box::new(self.clone())
    }

    fn assign(&mut self, value: Box<dyn Any + Send>) -> bool {
        match value.downcast::<T>() {
            Ok(value) => {
                *self = *value;
                true
            }
            Err(_) => false,
        }
    }
}

type RunCompute = fn(&dyn Any, Dep<'_>, Updater);

fn run_compute<T: Compute>(value: &dyn Any, deps: Dep<'_>, updater: Updater) {
    if let Some(compute) = value.downcast_ref::<T>() {
        compute.compute(deps, updater);
    }
}

pub(crate) enum Kind {
    State,
    Compute { deps: Vec<TypeId>, run: RunCompute },
}

pub(crate) struct Entry {
    pub(crate) name: &'static str,
    pub(crate) kind: Kind,
    pub(crate) value: Box<dyn Slot>,
}

struct CommandSlot {
    name: &'static str,
    command: Box<dyn Command>,
    generation: u64,
    latest: Arc<AtomicU64>,
    running: Option<TaskHandle>,
}

/// Owner of every state, compute and command in the application.
///
/// The UI drives it once per frame:
///
/// 1. `sync_computes` applies updates sent by commands and reruns derived computes
///    whose inputs changed;
/// 2. widgets read with `state`/`compute`, edit with `state_mut` and queue side
///    effects with `dispatch`;
/// 3. `flush_commands` starts the queued commands as async tasks.
pub struct StateCtx {
    entries: BTreeMap<TypeId, Entry>,
    dirty: BTreeSet<TypeId>,
    needs_run: BTreeSet<TypeId>,
    updater: Updater,
    receiver: Receiver<Update>,
    commands: BTreeMap<TypeId, CommandSlot>,
    pending: Vec<TypeId>,
    #[cfg(not(target_arch = "wasm32"))]
    tasks: JoinSet<()>,
    #[cfg(target_arch = "wasm32")]
    in_flight: Arc<AtomicUsize>,
}

impl Default for StateCtx {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for StateCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateCtx")
            .field(
                "entries",
                &self.entries.values().map(|e| e.name).collect::<Vec<_>>(),
            )
            .field(
                "commands",
                &self.commands.values().map(|c| c.name).collect::<Vec<_>>(),
            )
            .field("pending", &self.pending.len())
            .field("tasks", &self.task_count())
            .finish()
    }
}

impl StateCtx {
    pub fn new() -> Self {
        let (send, receiver) = flume::unbounded();
        Self {
            entries: BTreeMap::new(),
            dirty: BTreeSet::new(),
            needs_run: BTreeSet::new(),
            updater: Updater::new(send),
            receiver,
            commands: BTreeMap::new(),
            pending: Vec::new(),
            #[cfg(not(target_arch = "wasm32"))]
            tasks: JoinSet::new(),
            #[cfg(target_arch = "wasm32")]
            in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn add_state<T: State>(&mut self, state: T) {
        let id = TypeId::of::<T>();
        self.entries.insert(
            id,
            Entry {
                name: type_name::<T>(),
                kind: Kind::State,
                value: Box::new(state),
            },
        );
        self.dirty.insert(id);
    }

    pub fn record_compute<T: Compute>(&mut self, compute: T) {
        let id = TypeId::of::<T>();
        let deps = compute.deps();
        self.entries.insert(
            id,
            Entry {
                name: type_name::<T>(),
                kind: Kind::Compute {
                    deps,
                    run: run_compute::<T>,
                },
                value: Box::new(compute),
            },
        );
        self.dirty.insert(id);
        self.needs_run.insert(id);
    }

    pub fn record_command<T: Command>(&mut self, command: T) {
        self.commands.insert(
            TypeId::of::<T>(),
            CommandSlot {
                name: type_name::<T>(),
                command: Box::new(command),
                generation: 0,
                latest: Arc::new(AtomicU64::new(0)),
                running: None,
            },
        );
    }

    pub fn is_registered<T: Any>(&self) -> bool {
        self.entries.contains_key(&TypeId::of::<T>())
    }

    pub fn cached<T: Any>(&self) -> Option<&T> {
        self.entries
            .get(&TypeId::of::<T>())
            .and_then(|entry| entry.value.as_any().downcast_ref::<T>())
    }

    fn expect_entry<T: Any>(&self) -> &T {
        self.cached::<T>()
            .unwrap_or_else(|| panic!("{} is not registered in StateCtx", type_name::<T>()))
    }

    pub fn state<T: State>(&self) -> &T {
        self.expect_entry::<T>()
    }

    pub fn compute<T: Compute>(&self) -> &T {
        self.expect_entry::<T>()
    }

    /// Mutable access to a state. The state is marked changed even when the
    /// caller ends up not writing, so dependents rerun on the next sync.
    pub fn state_mut<T: State>(&mut self) -> &mut T {
        let id = TypeId::of::<T>();
        self.dirty.insert(id);
        self.entries
            .get_mut(&id)
            .and_then(|entry| entry.value.as_any_mut().downcast_mut::<T>())
            .unwrap_or_else(|| panic!("{} is not registered in StateCtx", type_name::<T>()))
    }

    pub fn update<T: State>(&mut self, f: impl FnOnce(&mut T)) {
        f(self.state_mut::<T>());
    }

    /// Handle for writing states or computes from outside a command, for
    /// example when the UI restores a persisted session.
    pub fn updater(&self) -> Updater {
        self.updater.clone()
    }

    pub fn dispatch<T: Command>(&mut self) {
        if let Err(err) = self.try_dispatch::<T>() {
            error!("dispatch failed: {err}");
        }
    }

    pub fn try_dispatch<T: Command>(&mut self) -> Result<(), StateError> {
        let id = TypeId::of::<T>();
        if !self.commands.contains_key(&id) {
            return Err(StateError::CommandNotRegistered {
                name: type_name::<T>(),
            });
        }
        if !self.pending.contains(&id) {
            self.pending.push(id);
        }
        Ok(())
    }

    pub fn has_pending_commands(&self) -> bool {
        !self.pending.is_empty()
    }

    fn apply_updates(&mut self) {
        while let Ok((id, name, payload)) = self.receiver.try_recv() {
            let Some(entry) = self.entries.get_mut(&id) else {
                warn!("{}", StateError::EntryNotRegistered { name });
                continue;
            };
            let applied = match payload {
                Payload::Value(value) => entry.value.assign(value),
                Payload::Edit(edit) => edit(entry.value.as_any_mut()),
            };
            if applied {
                trace!("Applied update for {name}");
                self.dirty.insert(id);
            } else {
                warn!("Update for {name} does not match {}", entry.name);
            }
        }
    }

    /// Applies pending updates and reruns derived computes until nothing changes.
    pub fn sync_computes(&mut self) {
        self.reap_tasks();

        for _ in 0..MAX_SYNC_PASSES {
            self.apply_updates();
            if self.dirty.is_empty() && self.needs_run.is_empty() {
                return;
            }
            let changed = std::mem::take(&mut self.dirty);
            let mut to_run = std::mem::take(&mut self.needs_run);
            for (id, entry) in &self.entries {
                if let Kind::Compute { deps, .. } = &entry.kind
                    && deps.iter().any(|dep| changed.contains(dep))
                {
                    to_run.insert(*id);
                }
            }
            for id in to_run {
                let Some(entry) = self.entries.get(&id) else {
                    continue;
                };
                if let Kind::Compute { run, .. } = &entry.kind {
                    trace!("Recomputing {}", entry.name);
                    run(
                        entry.value.as_any(),
                        Dep::new(&self.entries),
                        self.updater.clone(),
                    );
                }
            }
        }

        warn!("sync_computes did not settle after {MAX_SYNC_PASSES} passes");
    }

    fn snapshot(&self) -> CommandSnapshot {
        let mut snap = CommandSnapshot::new();
        for (id, entry) in &self.entries {
            snap.insert_cloned(*id, entry.value.clone_boxed());
        }
        snap
    }

    /// Starts every dispatched command. A command that is still running from an
    /// earlier dispatch is cancelled and its late writes are discarded.
    pub fn flush_commands(&mut self) {
        let pending = std::mem::take(&mut self.pending);
        for id in pending {
            let snap = self.snapshot();
            let Some(slot) = self.commands.get_mut(&id) else {
                continue;
            };

            slot.generation += 1;
            slot.latest.store(slot.generation, Ordering::Release);
            if let Some(previous) = slot.running.take() {
                debug!(
                    "Cancelling {} generation {}",
                    slot.name,
                    previous.id().generation()
                );
                previous.cancel();
            }

            let task = TaskId::new(id, slot.generation);
            let token = CancellationToken::new();
            slot.running = Some(TaskHandle::new(task, token.clone()));

            let updater = LatestOnlyUpdater::new(self.updater.clone(), task, slot.latest.clone());
            let future = slot.command.run(snap, updater, token.clone());
            let name = slot.name;

            #[cfg(not(target_arch = "wasm32"))]
            spawn_native(&mut self.tasks, name, token, future);
            #[cfg(target_arch = "wasm32")]
            spawn_web(&self.in_flight, name, token, future);
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn reap_tasks(&mut self) {
        while let Some(result) = self.tasks.try_join_next() {
            if let Err(err) = result
                && err.is_panic()
            {
                error!("Command task panicked: {err}");
            }
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn reap_tasks(&mut self) {}

    /// Number of command tasks that have not finished yet.
    pub fn task_count(&self) -> usize {
        #[cfg(not(target_arch = "wasm32"))]
        {
            self.tasks.len()
        }
        #[cfg(target_arch = "wasm32")]
        {
            self.in_flight.load(Ordering::Acquire)
        }
    }

    /// Waits for every running command and applies what they wrote.
    #[cfg(not(target_arch = "wasm32"))]
    pub async fn join_tasks(&mut self) {
        while let Some(result) = self.tasks.join_next().await {
            if let Err(err) = result
                && err.is_panic()
            {
                error!("Command task panicked: {err}");
            }
            self.sync_computes();
        }
        self.sync_computes();
    }

    /// Cancels every running command and waits for the tasks to unwind.
    pub async fn shutdown(&mut self) {
        for slot in self.commands.values_mut() {
            if let Some(handle) = slot.running.take() {
                handle.cancel();
            }
        }
        #[cfg(not(target_arch = "wasm32"))]
        while self.tasks.join_next().await.is_some() {}
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn spawn_native(
    tasks: &mut JoinSet<()>,
    name: &'static str,
    token: CancellationToken,
    future: CommandFuture,
) {
    match tokio::runtime::Handle::try_current() {
        Ok(handle) => {
            tasks.spawn_on(
                async move {
                    tokio::select! {
                        _ = token.cancelled() => debug!("{name} cancelled"),
                        _ = future => {}
                    }
                },
                &handle,
            );
        }
        Err(_) => error!(
            "{}",
            StateError::NoRuntime { name }
        ),
    }
}

#[cfg(target_arch = "wasm32")]
fn spawn_web(
    in_flight: &Arc<AtomicUsize>,
    name: &'static str,
    token: CancellationToken,
    future: CommandFuture,
) {
    let in_flight = in_flight.clone();
    in_flight.fetch_add(1, Ordering::AcqRel);
    wasm_bindgen_futures::spawn_local(async move {
        tokio::select! {
            _ = token.cancelled() => debug!("{name} cancelled"),
            _ = future => {}
        }
        in_flight.fetch_sub(1, Ordering::AcqRel);
    });
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[derive(Debug, Clone, Default)]
    struct Query(String);
    impl State for Query {}

    #[derive(Debug, Clone, Default)]
    struct Upper(String);
    impl Compute for Upper {
        fn deps(&self) -> Vec<TypeId> {
            vec![TypeId::of::<Query>()]
        }

        fn compute(&self, deps: Dep<'_>, updater: Updater) {
            updater.set(Upper(deps.state::<Query>().0.to_uppercase()));
        }
    }

    #[derive(Debug, Clone, Default)]
    struct Length(usize);
    impl Compute for Length {
        fn deps(&self) -> Vec<TypeId> {
            vec![TypeId::of::<Upper>()]
        }

        fn compute(&self, deps: Dep<'_>, updater: Updater) {
            updater.set(Length(deps.compute::<Upper>().0.len()));
        }
    }

    #[derive(Debug, Clone, Default)]
    struct Fetched(Vec<String>);
    impl Compute for Fetched {}

    #[derive(Debug)]
    struct Fetch;
    impl Command for Fetch {
        fn run(
            &self,
            snap: CommandSnapshot,
            updater: LatestOnlyUpdater,
            _cancel: CancellationToken,
        ) -> CommandFuture {
            let query = snap.state::<Query>().0.clone();
            Box::pin(async move {
                updater.set(Fetched(vec![query]));
            })
        }
    }

    #[derive(Debug)]
    struct SlowFetch;
    impl Command for SlowFetch {
        fn run(
            &self,
            snap: CommandSnapshot,
            updater: LatestOnlyUpdater,
            _cancel: CancellationToken,
        ) -> CommandFuture {
            let query = snap.state::<Query>().0.clone();
            Box::pin(async move {
                tokio::time::sleep(Duration::from_millis(50)).await;
                updater.set(Fetched(vec![query]));
            })
        }
    }

    fn ctx() -> StateCtx {
        let mut ctx = StateCtx::new();
        ctx.add_state(Query::default());
        ctx.record_compute(Upper::default());
        ctx.record_compute(Length::default());
        ctx.record_compute(Fetched::default());
        ctx.record_command(Fetch);
        ctx.record_command(SlowFetch);
        ctx.sync_computes();
        ctx
    }

    #[test]
    fn editing_a_state_reruns_the_dependency_chain() {
        let mut ctx = ctx();
        ctx.state_mut::<Query>().0 = "kenya".to_string();
        ctx.sync_computes();

        assert_eq!(ctx.compute::<Upper>().0, "KENYA");
        assert_eq!(ctx.compute::<Length>().0, 5);
    }

    #[test]
    fn dispatching_an_unknown_command_is_an_error() {
        #[derive(Debug)]
        struct Unknown;
        impl Command for Unknown {
            fn run(
                &self,
                _snap: CommandSnapshot,
                _updater: LatestOnlyUpdater,
                _cancel: CancellationToken,
            ) -> CommandFuture {
                Box::pin(async {})
            }
        }

        let mut ctx = ctx();
        assert!(matches!(
            ctx.try_dispatch::<Unknown>(),
            Err(StateError::CommandNotRegistered { .. })
        ));
        assert!(!ctx.has_pending_commands());
    }

    #[test]
    fn cached_returns_none_for_unknown_types() {
        let ctx = ctx();
        assert!(ctx.cached::<String>().is_none());
        assert!(ctx.cached::<Query>().is_some());
    }

    #[tokio::test]
    async fn command_results_land_after_sync() {
        let mut ctx = ctx();
        ctx.state_mut::<Query>().0 = "arusha".to_string();
        ctx.dispatch::<Fetch>();
        ctx.flush_commands();
        ctx.join_tasks().await;

        assert_eq!(ctx.compute::<Fetched>().0, vec!["arusha".to_string()]);
        assert_eq!(ctx.task_count(), 0);
    }

    #[tokio::test]
    async fn repeated_dispatch_in_one_frame_runs_once() {
        let mut ctx = ctx();
        ctx.dispatch::<Fetch>();
        ctx.dispatch::<Fetch>();
        ctx.flush_commands();

        assert_eq!(ctx.task_count(), 1);
        ctx.join_tasks().await;
    }

    #[tokio::test]
    async fn superseded_dispatch_does_not_overwrite_newer_result() {
        let mut ctx = ctx();
        ctx.state_mut::<Query>().0 = "old".to_string();
        ctx.dispatch::<SlowFetch>();
        ctx.flush_commands();

        ctx.state_mut::<Query>().0 = "new".to_string();
        ctx.dispatch::<Fetch>();
        ctx.dispatch::<SlowFetch>();
        ctx.flush_commands();
        ctx.join_tasks().await;

        assert_eq!(ctx.compute::<Fetched>().0, vec!["new".to_string()]);
    }

    #[test]
    fn mismatched_update_leaves_the_value_alone() {
        let mut ctx = ctx();
        ctx.state_mut::<Query>().0 = "moshi".to_string();
        ctx.sync_computes();

        ctx.updater()
            .send_payload::<Query>(Payload::Value(Box::new(5_u32)));
        ctx.updater()
            .send_payload::<Query>(Payload::Edit(Box::new(|value: &mut dyn Any| {
                value.downcast_mut::<u32>().is_some()
            })));
        ctx.sync_computes();

        assert_eq!(ctx.state::<Query>().0, "moshi");
        assert_eq!(ctx.compute::<Upper>().0, "MOSHI");
    }

    #[test]
    fn edits_apply_to_the_value_current_at_sync() {
        let mut ctx = ctx();
        let first = ctx.updater();
        let second = ctx.updater();
        first.edit::<Fetched>(|fetched| fetched.0.push("tsavo".to_string()));
        second.set(Fetched(vec!["amboseli".to_string()]));
        first.edit::<Fetched>(|fetched| fetched.0.push("mara".to_string()));
        ctx.sync_computes();

        assert_eq!(
            ctx.compute::<Fetched>().0,
            vec!["amboseli".to_string(), "mara".to_string()]
        );
    }

    #[test]
    fn flush_without_runtime_drops_the_task() {
        let mut ctx = ctx();
        ctx.dispatch::<Fetch>();
        ctx.flush_commands();

        assert_eq!(ctx.task_count(), 0);
        assert!(!ctx.has_pending_commands());
    }
}
