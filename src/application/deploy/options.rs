//! Deploy Options

use std::path::PathBuf;
use std::time::Duration;

use crate::domain::services::{BUILD_POLL_INTERVAL, BUILD_POLL_MAX_ATTEMPTS};
use crate::domain::value_objects::Tier;

/// Options for the deploy use case
#[derive(Debug, Clone)]
pub struct DeployOptions {
    /// Project name as typed by the user (not tier-qualified)
    pub project: String,
    /// Project root to validate and bundle
    pub source: PathBuf,
    pub tier: Tier,
    /// Create a missing non-production project instead of failing
    pub create: bool,
    pub poll_interval: Duration,
    pub max_attempts: u32,
}

impl DeployOptions {
    pub fn new(project: impl Into<String>, source: impl Into<PathBuf>) -> Self {
        Self {
            project: project.into(),
            source: source.into(),
            tier: Tier::default(),
            create: false,
            poll_interval: BUILD_POLL_INTERVAL,
            max_attempts: BUILD_POLL_MAX_ATTEMPTS,
        }
    }

    pub fn with_tier(mut self, tier: Tier) -> Self {
        self.tier = tier;
        self
    }

    pub fn with_create(mut self, create: bool) -> Self {
        self.create = create;
        self
    }

    pub fn with_polling(mut self, interval: Duration, max_attempts: u32) -> Self {
        self.poll_interval = interval;
        self.max_attempts = max_attempts;
        self
    }

    /// Total time the build may take before giving up
    pub fn poll_budget(&self) -> Duration {
        self.poll_interval * self.max_attempts
    }
}
