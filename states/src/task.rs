//! Identity and cancellation for command tasks.
//!
//! Every `flush_commands` dispatch gets a fresh [`TaskId`] whose generation is
//! one higher than the previous dispatch of the same command. The previous
//! dispatch's [`TaskHandle`] is cancelled at that moment.

use std::any::TypeId;

use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId {
    command: TypeId,
    generation: u64,
}

impl TaskId {
    pub fn new(command: TypeId, generation: u64) -> Self {
        Self {
            command,
            generation,
        }
    }

    /// The command type that owns this task.
    pub fn command(&self) -> TypeId {
        self.command
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// A running dispatch plus the token used to stop it.
///
/// Cancellation is cooperative: the runtime races the command future against
/// `token.cancelled()`, and long-running commands may check the token themselves.
#[derive(Debug, Clone)]
pub struct TaskHandle {
    id: TaskId,
    token: CancellationToken,
}

impl TaskHandle {
    pub fn new(id: TaskId, token: CancellationToken) -> Self {
        Self { id, token }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}
