//! JSON Event Sink
//!
//! Outputs deploy and run events as NDJSON for CI/automation consumption.

use crate::domain::ports::{DeployEvent, DeployEventSink, RunEvent, RunEventSink};
use crate::domain::services::LogPayload;
use std::io::{self, Write};
use std::sync::Mutex;

/// Event sink that outputs NDJSON events to stdout
pub struct JsonEventSink {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventSink {
    /// Create a new JSON event sink writing to stdout
    pub fn stdout() -> Self {
        Self {
            writer: Mutex::new(Box::new(io::stdout())),
        }
    }

    /// Create a JSON event sink writing to a custom writer
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn write_event(&self, event: serde_json::Value) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }
}

fn logs_value(payload: &LogPayload) -> serde_json::Value {
    serde_json::to_value(payload).unwrap_or(serde_json::Value::Null)
}

impl DeployEventSink for JsonEventSink {
    fn on_event(&self, event: DeployEvent) {
        let json = match event {
            DeployEvent::Started {
                project,
                tier,
                source,
            } => serde_json::json!({
                "event": "start",
                "command": "deploy",
                "project": project,
                "env": tier.as_str(),
                "source": source.display().to_string(),
            }),

            DeployEvent::Validated { warnings } => serde_json::json!({
                "event": "validated",
                "command": "deploy",
                "warnings": warnings,
            }),

            DeployEvent::ProjectCreating { project, tier } => serde_json::json!({
                "event": "project_creating",
                "command": "deploy",
                "project": project,
                "env": tier.as_str(),
            }),

            DeployEvent::ProjectCreated { project, tier } => serde_json::json!({
                "event": "project_created",
                "command": "deploy",
                "project": project,
                "env": tier.as_str(),
            }),

            DeployEvent::Archived { bytes } => serde_json::json!({
                "event": "archived",
                "command": "deploy",
                "bytes": bytes,
            }),

            DeployEvent::Uploading => serde_json::json!({
                "event": "uploading",
                "command": "deploy",
            }),

            DeployEvent::Queued => serde_json::json!({
                "event": "queued",
                "command": "deploy",
            }),

            DeployEvent::BuildLog { chunk } => serde_json::json!({
                "event": "build_log",
                "command": "deploy",
                "chunk": chunk,
            }),

            DeployEvent::Deployed { slug, tier } => serde_json::json!({
                "event": "complete",
                "command": "deploy",
                "status": "success",
                "slug": slug,
                "env": tier.as_str(),
            }),

            DeployEvent::BuildFailed { full_log } => serde_json::json!({
                "event": "complete",
                "command": "deploy",
                "status": "failed",
                "log": full_log,
            }),

            DeployEvent::TimedOut { attempts } => serde_json::json!({
                "event": "complete",
                "command": "deploy",
                "status": "timeout",
                "attempts": attempts,
            }),

            DeployEvent::DeclarationsSynced { count } => serde_json::json!({
                "event": "declarations_synced",
                "command": "deploy",
                "count": count,
            }),

            DeployEvent::DeclarationSyncFailed { error } => serde_json::json!({
                "event": "warning",
                "command": "deploy",
                "stage": "declarations",
                "message": error,
            }),

            DeployEvent::EnvPushStarted => serde_json::json!({
                "event": "env_push_start",
                "command": "deploy",
            }),

            DeployEvent::NoDeclarations => serde_json::json!({
                "event": "env_push_skipped",
                "command": "deploy",
                "reason": "no_declarations",
            }),

            DeployEvent::EnvFileMissing { file, keys } => serde_json::json!({
                "event": "env_push_skipped",
                "command": "deploy",
                "reason": "file_missing",
                "file": file,
                "keys": keys,
            }),

            DeployEvent::EnvKeyMissing { key, file } => serde_json::json!({
                "event": "env_key_missing",
                "command": "deploy",
                "key": key,
                "file": file,
            }),

            DeployEvent::NothingToPush => serde_json::json!({
                "event": "env_push_skipped",
                "command": "deploy",
                "reason": "nothing_to_push",
            }),

            DeployEvent::EnvPushed {
                count,
                file,
                created,
                updated,
            } => serde_json::json!({
                "event": "env_pushed",
                "command": "deploy",
                "count": count,
                "file": file,
                "created": created,
                "updated": updated,
            }),

            DeployEvent::EnvPushFailed { error } => serde_json::json!({
                "event": "warning",
                "command": "deploy",
                "stage": "env_push",
                "message": error,
            }),
        };

        self.write_event(json);
    }
}

impl RunEventSink for JsonEventSink {
    fn on_event(&self, event: RunEvent) {
        let json = match event {
            RunEvent::Triggered { id } => serde_json::json!({
                "event": "triggered",
                "command": "run",
                "id": id,
            }),
            RunEvent::Snapshot { status, logs } => serde_json::json!({
                "event": "snapshot",
                "command": "logs",
                "status": status,
                "logs": logs_value(&logs),
            }),
            RunEvent::Following => serde_json::json!({
                "event": "following",
                "command": "logs",
            }),
            // Dots are a terminal affordance only
            RunEvent::Waiting => return,
            RunEvent::Logs { payload } => serde_json::json!({
                "event": "logs",
                "command": "logs",
                "logs": logs_value(&payload),
            }),
            RunEvent::Finished { status } => serde_json::json!({
                "event": "complete",
                "command": "run",
                "status": status.as_str(),
                "success": status.is_success(),
            }),
            RunEvent::TimedOut => serde_json::json!({
                "event": "complete",
                "command": "run",
                "status": "timeout",
            }),
        };

        self.write_event(json);
    }
}
