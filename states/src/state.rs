use std::any::Any;
use std::fmt::Debug;

use chrono::{DateTime, Utc};

/// A plain value stored in [`StateCtx`](crate::StateCtx).
///
/// States are owned by the context and edited in place by the UI through
/// `state_mut`. Commands see a cloned snapshot of every state when they run,
/// hence the `Clone` bound.
pub trait State: Any + Send + Clone + Debug {}

/// Wall-clock time as seen by the current frame.
///
/// The UI refreshes it once per frame; tests set it directly to make
/// time-dependent logic (session expiry, fetch timestamps) deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Time {
    virt: DateTime<Utc>,
}

impl Time {
    pub fn new(at: DateTime<Utc>) -> Self {
        Self { virt: at }
    }

    pub fn now() -> Self {
        Self::new(Utc::now())
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::now()
    }
}

impl State for Time {}

impl AsMut<DateTime<Utc>> for Time {
    fn as_mut(&mut self) -> &mut DateTime<Utc> {
        &mut self.virt
    }
}

impl AsRef<DateTime<Utc>> for Time {
    fn as_ref(&self) -> &DateTime<Utc> {
        &self.virt
    }
}
