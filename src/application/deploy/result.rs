//! Deploy Result

use std::time::Duration;

use crate::application::env_sync::EnvSyncReport;
use crate::domain::services::BuildOutcome;
use crate::error::{SolidError, SolidResult};

/// Result of a deploy that reached a terminal build state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployResult {
    /// Slug the platform knows the tier's project by
    pub slug: String,
    /// Compressed bundle size
    pub bundle_bytes: u64,
    pub outcome: BuildOutcome,
    /// Poll attempts made
    pub attempts: u32,
    /// Validation warnings
    pub warnings: Vec<String>,
    /// Present only after a successful build
    pub env: Option<EnvSyncReport>,
}

impl DeployResult {
    pub fn is_success(&self) -> bool {
        self.outcome == BuildOutcome::Deployed
    }

    /// Turn a failed or timed-out build into its error.
    pub fn into_result(self, poll_budget: Duration) -> SolidResult<Self> {
        match &self.outcome {
            BuildOutcome::Deployed => Ok(self),
            BuildOutcome::Failed { .. } => Err(SolidError::BuildFailed { slug: self.slug }),
            BuildOutcome::TimedOut => Err(SolidError::Timeout {
                what: "build".to_string(),
                waited: poll_budget,
            }),
        }
    }
}
