//! Run Event Port
//!
//! Progress of a triggered or followed workflow run.

use crate::domain::entities::RunStatus;
use crate::domain::services::LogPayload;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunEvent {
    /// Run accepted by the platform
    Triggered { id: String },

    /// Current status and logs before following
    Snapshot { status: String, logs: LogPayload },

    /// Following started
    Following,

    /// One non-terminal tick while waiting
    Waiting,

    /// New log content
    Logs { payload: LogPayload },

    /// Terminal status reached
    Finished { status: RunStatus },

    /// Wait cap reached; the run may still be going
    TimedOut,
}

pub trait RunEventSink {
    fn on_event(&self, event: RunEvent);
}

pub struct NoopRunSink;

impl RunEventSink for NoopRunSink {
    fn on_event(&self, _event: RunEvent) {}
}
