//! Projections of remote projects, runs, schedules and webhooks

use serde::{Deserialize, Serialize};

use super::variables::null_as_default;
use crate::domain::value_objects::{ResourceId, Tier};

/// Project as returned by lookup, create and status polling
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct ProjectInfo {
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub build_log: Option<String>,
}

impl ProjectInfo {
    /// Slug the server knows the project by, falling back to the requested one.
    pub fn slug_or(&self, fallback: &str) -> String {
        self.slug
            .clone()
            .or_else(|| self.name.clone())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| fallback.to_string())
    }
}

/// Body of a project create call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewProject {
    pub name: String,
    pub slug: String,
    pub environment: Tier,
}

impl NewProject {
    pub fn for_tier(name: &str, tier: Tier) -> Self {
        Self {
            name: name.to_string(),
            slug: tier.create_slug(name),
            environment: tier,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WorkflowRef {
    #[serde(default)]
    pub name: Option<String>,
}

/// One workflow run
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RunInfo {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: ResourceId,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub workflow: Option<WorkflowRef>,
    #[serde(default)]
    pub workflow_name: Option<String>,
    #[serde(default)]
    pub started_at: Option<String>,
    #[serde(default)]
    pub completed_at: Option<String>,
}

impl RunInfo {
    pub fn status(&self) -> RunStatus {
        RunStatus::from(self.status.as_deref().unwrap_or(""))
    }

    pub fn workflow_label(&self) -> &str {
        self.workflow
            .as_ref()
            .and_then(|w| w.name.as_deref())
            .or(self.workflow_name.as_deref())
            .unwrap_or("?")
    }
}

/// Observed run state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunStatus {
    Pending,
    Queued,
    Running,
    Completed,
    Failed,
    Acknowledged,
    Other(String),
}

impl RunStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RunStatus::Completed | RunStatus::Failed | RunStatus::Acknowledged
        )
    }

    pub fn is_success(&self) -> bool {
        matches!(self, RunStatus::Completed)
    }

    pub fn as_str(&self) -> &str {
        match self {
            RunStatus::Pending => "pending",
            RunStatus::Queued => "queued",
            RunStatus::Running => "running",
            RunStatus::Completed => "completed",
            RunStatus::Failed => "failed",
            RunStatus::Acknowledged => "acknowledged",
            RunStatus::Other(s) => s,
        }
    }
}

impl From<&str> for RunStatus {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "pending" => RunStatus::Pending,
            "queued" => RunStatus::Queued,
            "running" => RunStatus::Running,
            "completed" => RunStatus::Completed,
            "failed" => RunStatus::Failed,
            "acknowledged" => RunStatus::Acknowledged,
            _ => RunStatus::Other(s.to_string()),
        }
    }
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cron schedule attached to a project
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Schedule {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: ResourceId,
    #[serde(default)]
    pub workflow_name: Option<String>,
    #[serde(default)]
    pub workflow_slug: Option<String>,
    #[serde(default)]
    pub cron_expression: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub enabled: bool,
    #[serde(default)]
    pub next_run_at: Option<String>,
}

impl Schedule {
    pub fn workflow_label(&self) -> &str {
        self.workflow_name
            .as_deref()
            .or(self.workflow_slug.as_deref())
            .unwrap_or("?")
    }
}

/// Body of a schedule create call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewSchedule {
    pub cron: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workflow: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<serde_json::Value>,
}

/// Inbound webhook endpoint of a workflow
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Webhook {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub secret: Option<String>,
}

impl Webhook {
    pub fn label(&self) -> &str {
        self.name
            .as_deref()
            .or(self.slug.as_deref())
            .unwrap_or("?")
    }
}
