//! Deploy Event Port
//!
//! Provides an observable interface for the deploy lifecycle.
//! Enables console progress output, JSON event streams, and test recording.

use std::path::PathBuf;

use crate::domain::value_objects::Tier;

/// Event emitted during a deploy
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployEvent {
    /// Deploy started
    Started {
        project: String,
        tier: Tier,
        source: PathBuf,
    },

    /// Validation passed, possibly with warnings
    Validated { warnings: Vec<String> },

    /// Remote project for this tier did not exist and is being created
    ProjectCreating { project: String, tier: Tier },

    /// Remote project created
    ProjectCreated { project: String, tier: Tier },

    /// Bundle written
    Archived { bytes: u64 },

    /// Upload started
    Uploading,

    /// Upload accepted; build polling begins
    Queued,

    /// New build log text (newline-terminated)
    BuildLog { chunk: String },

    /// Build finished successfully
    Deployed { slug: String, tier: Tier },

    /// Build reported an error
    BuildFailed { full_log: String },

    /// Attempt cap reached before a terminal status
    TimedOut { attempts: u32 },

    /// Manifest env declarations registered remotely
    DeclarationsSynced { count: usize },

    /// Declaration sync failed (deploy still succeeds)
    DeclarationSyncFailed { error: String },

    /// Value push from the local env file started
    EnvPushStarted,

    /// Manifest declares no variables
    NoDeclarations,

    /// Tier env file absent; carries every declared key
    EnvFileMissing { file: String, keys: Vec<String> },

    /// Declared key absent from the env file
    EnvKeyMissing { key: String, file: String },

    /// Env file holds none of the declared keys
    NothingToPush,

    /// Values pushed
    EnvPushed {
        count: usize,
        file: String,
        created: u64,
        updated: u64,
    },

    /// Value push failed (deploy still succeeds)
    EnvPushFailed { error: String },
}

/// Trait for receiving deploy events
///
/// Implementations:
/// - `ConsoleDeploySink`: coloured progress in the terminal
/// - `JsonEventSink`: NDJSON event stream for CI
/// - `NoopEventSink`: silent operation
pub trait DeployEventSink {
    fn on_event(&self, event: DeployEvent);
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl DeployEventSink for NoopEventSink {
    fn on_event(&self, _event: DeployEvent) {}
}


#[cfg(test)]
mod tests {
    use super::testing::RecordingSink;
    use super::*;

    #[test]
    fn recording_sink_captures_events() {
        let sink = RecordingSink::default();
        sink.on_event(DeployEvent::Uploading);
        sink.on_event(DeployEvent::BuildLog {
            chunk: "step\n".into(),
        });
        assert_eq!(sink.events().len(), 2);
    }
}
