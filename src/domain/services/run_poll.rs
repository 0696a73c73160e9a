//! Run observation state machine
//!
//! Drives both `run --wait` (status only, capped) and `logs --follow`
//! (logs then status, uncapped) with the same tick function.

use std::time::Duration;

use super::log_stream::{LogCursor, LogPayload};
use crate::domain::entities::RunStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunPollSettings {
    pub interval: Duration,
    pub max_attempts: Option<u32>,
    pub follow_logs: bool,
}

impl RunPollSettings {
    /// `run --wait`: status every second, at most 300 attempts
    pub const WAIT: RunPollSettings = RunPollSettings {
        interval: Duration::from_secs(1),
        max_attempts: Some(300),
        follow_logs: false,
    };

    /// `logs --follow`: logs and status every two seconds until terminal
    pub const FOLLOW: RunPollSettings = RunPollSettings {
        interval: Duration::from_secs(2),
        max_attempts: None,
        follow_logs: true,
    };
}

/// What one poll saw. Each field is `None` when its fetch failed or was not made.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunObservation {
    pub logs: Option<LogPayload>,
    pub status: Option<RunStatus>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Finished(RunStatus),
    TimedOut,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunTick {
    pub new_logs: Option<LogPayload>,
    pub outcome: Option<RunOutcome>,
}

#[derive(Debug, Clone)]
pub struct RunPoll {
    settings: RunPollSettings,
    attempts: u32,
    cursor: LogCursor,
}

impl RunPoll {
    pub fn new(settings: RunPollSettings) -> Self {
        Self {
            settings,
            attempts: 0,
            cursor: LogCursor::new(),
        }
    }

    /// Start from a cursor that already covers logs printed before following.
    pub fn with_cursor(settings: RunPollSettings, cursor: LogCursor) -> Self {
        Self {
            settings,
            attempts: 0,
            cursor,
        }
    }

    pub fn settings(&self) -> RunPollSettings {
        self.settings
    }

    pub fn tick(&mut self, observation: RunObservation) -> RunTick {
        self.attempts += 1;

        let new_logs = if self.settings.follow_logs {
            observation
                .logs
                .as_ref()
                .and_then(|logs| self.cursor.advance(logs))
        } else {
            None
        };

        let outcome = match observation.status {
            Some(status) if status.is_terminal() => Some(RunOutcome::Finished(status)),
            _ => match self.settings.max_attempts {
                Some(max) if self.attempts >= max => Some(RunOutcome::TimedOut),
                _ => None,
            },
        };

        RunTick { new_logs, outcome }
    }
}
