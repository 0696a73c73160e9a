//! Post-deploy environment synchronization
//!
//! Declarations are always registered; values from the tier's env file are
//! pushed only when the manifest sets `deployEnv: true`. Both steps are
//! best-effort: failures become warning events and never fail the deploy.

use std::path::Path;

use tracing::{debug, warn};

use crate::domain::entities::WorkflowManifest;
use crate::domain::ports::{DeployEvent, DeployEventSink, PlatformApi};
use crate::domain::services::{dotenv, plan_env_push, DeclarationPayload};
use crate::domain::value_objects::Tier;

/// What the sync did, for the deploy result
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSyncReport {
    /// Declarations registered remotely, `None` when skipped or failed
    pub declarations_synced: Option<usize>,
    /// Values pushed, `None` when the push did not happen
    pub values_pushed: Option<usize>,
    /// Declared keys without a local value
    pub missing: Vec<String>,
}

pub struct EnvSync<'a, A: PlatformApi + ?Sized> {
    api: &'a A,
    events: &'a dyn DeployEventSink,
}

impl<'a, A: PlatformApi + ?Sized> EnvSync<'a, A> {
    pub fn new(api: &'a A, events: &'a dyn DeployEventSink) -> Self {
        Self { api, events }
    }

    pub fn run(
        &self,
        slug: &str,
        manifest: &WorkflowManifest,
        source_dir: &Path,
        tier: Tier,
    ) -> EnvSyncReport {
        let mut report = EnvSyncReport {
            declarations_synced: self.sync_declarations(slug, manifest),
            ..Default::default()
        };
        if manifest.deploy_env {
            self.push_values(slug, manifest, source_dir, tier, &mut report);
        }
        report
    }

    /// Register the manifest's declarations. Empty declaration lists are not sent.
    pub fn sync_declarations(&self, slug: &str, manifest: &WorkflowManifest) -> Option<usize> {
        let payload: Vec<DeclarationPayload> = manifest.env.iter().map(Into::into).collect();
        if payload.is_empty() {
            return None;
        }
        match self.api.sync_declarations(slug, &payload) {
            Ok(()) => {
                self.events.on_event(DeployEvent::DeclarationsSynced {
                    count: payload.len(),
                });
                Some(payload.len())
            }
            Err(e) => {
                warn!(slug, error = %e, "declaration sync failed");
                self.events.on_event(DeployEvent::DeclarationSyncFailed {
                    error: e.to_string(),
                });
                None
            }
        }
    }

    fn push_values(
        &self,
        slug: &str,
        manifest: &WorkflowManifest,
        source_dir: &Path,
        tier: Tier,
        report: &mut EnvSyncReport,
    ) {
        self.events.on_event(DeployEvent::EnvPushStarted);

        let declared = manifest.declared_keys();
        if declared.is_empty() {
            self.events.on_event(DeployEvent::NoDeclarations);
            return;
        }

        let file = tier.env_file_name();
        let content = match std::fs::read_to_string(source_dir.join(&file)) {
            Ok(content) => content,
            Err(e) => {
                debug!(file, error = %e, "env file unreadable");
                self.events.on_event(DeployEvent::EnvFileMissing {
                    file,
                    keys: declared.clone(),
                });
                report.missing = declared;
                return;
            }
        };

        let plan = plan_env_push(&declared, &dotenv::parse(&content));
        for key in &plan.missing {
            self.events.on_event(DeployEvent::EnvKeyMissing {
                key: key.clone(),
                file: file.clone(),
            });
        }
        report.missing = plan.missing;

        if plan.variables.is_empty() {
            self.events.on_event(DeployEvent::NothingToPush);
            return;
        }

        match self.api.push_env_values(slug, &plan.variables) {
            Ok(summary) => {
                report.values_pushed = Some(plan.variables.len());
                self.events.on_event(DeployEvent::EnvPushed {
                    count: plan.variables.len(),
                    file,
                    created: summary.created,
                    updated: summary.updated,
                });
            }
            Err(e) => {
                warn!(slug, error = %e, "env push failed");
                self.events.on_event(DeployEvent::EnvPushFailed {
                    error: e.to_string(),
                });
            }
        }
    }
}
