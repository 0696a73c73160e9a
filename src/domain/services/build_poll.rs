//! Build status polling state machine
//!
//! `BuildPoll::tick` consumes one poll result and reports the log text to
//! emit plus whether a terminal state was reached. The caller owns the timer.

use std::time::Duration;

use super::log_stream::{LogCursor, LogPayload};
use crate::domain::entities::ProjectInfo;

pub const BUILD_POLL_INTERVAL: Duration = Duration::from_secs(1);
pub const BUILD_POLL_MAX_ATTEMPTS: u32 = 120;

/// Terminal build states
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOutcome {
    Deployed,
    /// Remote reported `error`; carries the whole accumulated log
    Failed { full_log: String },
    /// Attempt cap reached; the build may still finish remotely
    TimedOut,
}

/// Output of one tick
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BuildTick {
    /// New log text, always newline-terminated
    pub output: Option<String>,
    pub outcome: Option<BuildOutcome>,
}

#[derive(Debug, Clone)]
pub struct BuildPoll {
    attempts: u32,
    max_attempts: u32,
    cursor: LogCursor,
}

impl Default for BuildPoll {
    fn default() -> Self {
        Self::new(BUILD_POLL_MAX_ATTEMPTS)
    }
}

impl BuildPoll {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            attempts: 0,
            max_attempts,
            cursor: LogCursor::new(),
        }
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Advance by one poll. `None` means the fetch failed; the attempt still
    /// counts toward the cap but nothing else changes.
    pub fn tick(&mut self, response: Option<&ProjectInfo>) -> BuildTick {
        self.attempts += 1;

        let Some(project) = response else {
            return BuildTick {
                output: None,
                outcome: self.cap_reached().then_some(BuildOutcome::TimedOut),
            };
        };

        let log = project.build_log.clone().unwrap_or_default();
        let output = match self.cursor.advance(&LogPayload::Raw(log.clone())) {
            Some(LogPayload::Raw(mut chunk)) => {
                if !chunk.ends_with('\n') {
                    chunk.push('\n');
                }
                Some(chunk)
            }
            _ => None,
        };

        let outcome = match project.status.as_deref() {
            Some("deployed") => Some(BuildOutcome::Deployed),
            Some("error") => Some(BuildOutcome::Failed { full_log: log }),
            _ if self.cap_reached() => Some(BuildOutcome::TimedOut),
            _ => None,
        };

        BuildTick { output, outcome }
    }

    fn cap_reached(&self) -> bool {
        self.attempts >= self.max_attempts
    }
}
