//! Frame-driven state runtime for the Safari admin console.
//!
//! Application data lives in a single [`StateCtx`] as three kinds of entries:
//!
//! - [`State`]: plain values the UI edits directly (form inputs, table views);
//! - [`Compute`]: cached values, either derived from other entries or written by
//!   a command (fetched lists, login status);
//! - [`Command`]: async side effects that only run when explicitly dispatched.
//!
//! ```ignore
//! ctx.sync_computes();              // start of frame
//! ctx.state_mut::<LoginInput>().email = "a@b.c".into();
//! ctx.dispatch::<LoginCommand>();
//! ctx.flush_commands();             // end of frame
//! ```

mod command;
mod compute;
mod ctx;
mod error;
mod state;
mod task;
mod updater;

pub use command::{Command, CommandFuture, CommandSnapshot};
pub use compute::{Compute, Dep};
pub use ctx::StateCtx;
pub use error::StateError;
pub use state::{State, Time};
pub use task::{TaskHandle, TaskId};
pub use updater::{LatestOnlyUpdater, Updater};

pub use tokio_util::sync::CancellationToken;
