//! Deploy Use Case
//!
//! Orchestrates the deployment flow:
//! 1. Validate the project and parse the manifest
//! 2. Resolve (or create) the tier's remote project
//! 3. Bundle and upload the source
//! 4. Poll the build, streaming new log text
//! 5. On success, synchronize env declarations and values
//!
//! The bundle file is removed on every exit path, including errors.

use tracing::{debug, info};

use crate::application::env_sync::EnvSync;
use crate::application::validate::validate_project;
use crate::domain::entities::NewProject;
use crate::domain::ports::{DeployEvent, DeployEventSink, NoopEventSink, PlatformApi, Sleeper};
use crate::domain::services::{BuildOutcome, BuildPoll};
use crate::error::{SolidError, SolidResult};
use crate::infrastructure::archive::{create_bundle, BundleGuard, BUNDLE_FILE_NAME};

use super::options::DeployOptions;
use super::result::DeployResult;

/// Deploy use case, parameterized by the platform API and the poll timer
pub struct DeployUseCase<'a, A, S>
where
    A: PlatformApi + ?Sized,
    S: Sleeper + ?Sized,
{
    api: &'a A,
    sleeper: &'a S,
}

impl<'a, A, S> DeployUseCase<'a, A, S>
where
    A: PlatformApi + ?Sized,
    S: Sleeper + ?Sized,
{
    pub fn new(api: &'a A, sleeper: &'a S) -> Self {
        Self { api, sleeper }
    }

    pub fn execute(&self, options: &DeployOptions) -> SolidResult<DeployResult> {
        self.execute_with_events(options, &NoopEventSink)
    }

    /// Run the deploy, reporting progress to `events`.
    ///
    /// Returns `Ok` for every terminal build state; use
    /// [`DeployResult::into_result`] to treat failure and timeout as errors.
    pub fn execute_with_events(
        &self,
        options: &DeployOptions,
        events: &dyn DeployEventSink,
    ) -> SolidResult<DeployResult> {
        let source = options.source.as_path();
        if !source.is_dir() {
            return Err(SolidError::InvalidInput(format!(
                "Source directory not found: {}",
                source.display()
            )));
        }

        events.on_event(DeployEvent::Started {
            project: options.project.clone(),
            tier: options.tier,
            source: source.to_path_buf(),
        });

        let report = validate_project(source);
        let warnings = report.warnings.clone();
        let manifest = report.into_manifest()?;
        events.on_event(DeployEvent::Validated {
            warnings: warnings.clone(),
        });

        let slug = self.resolve_project(options, events)?;

        let guard = BundleGuard::new(source.join(BUNDLE_FILE_NAME));
        let bundle = create_bundle(source, guard.path())?;
        info!(slug, bytes = bundle.bytes, files = bundle.file_count, "bundle created");
        events.on_event(DeployEvent::Archived {
            bytes: bundle.bytes,
        });

        events.on_event(DeployEvent::Uploading);
        self.api.upload_bundle(&slug, guard.path())?;
        events.on_event(DeployEvent::Queued);

        let (outcome, attempts) = self.follow_build(&slug, options, events);
        drop(guard);

        let env = match &outcome {
            BuildOutcome::Deployed => {
                events.on_event(DeployEvent::Deployed {
                    slug: slug.clone(),
                    tier: options.tier,
                });
                Some(EnvSync::new(self.api, events).run(&slug, &manifest, source, options.tier))
            }
            BuildOutcome::Failed { full_log } => {
                events.on_event(DeployEvent::BuildFailed {
                    full_log: full_log.clone(),
                });
                None
            }
            BuildOutcome::TimedOut => {
                events.on_event(DeployEvent::TimedOut { attempts });
                None
            }
        };

        Ok(DeployResult {
            slug,
            bundle_bytes: bundle.bytes,
            outcome,
            attempts,
            warnings,
            env,
        })
    }

    /// Look up the tier's project, creating it when allowed.
    fn resolve_project(
        &self,
        options: &DeployOptions,
        events: &dyn DeployEventSink,
    ) -> SolidResult<String> {
        let tier = options.tier;
        let lookup = tier.project_slug(&options.project);

        match self.api.get_project(&lookup) {
            Ok(project) => Ok(project.slug_or(&lookup)),
            Err(e) if e.is_not_found() => {
                if !tier.is_production() && !options.create {
                    return Err(SolidError::NotFound {
                        resource: format!("Project \"{}\"", lookup),
                        hint: Some(
                            "Use --create to create it, or deploy to production first."
                                .to_string(),
                        ),
                    });
                }

                events.on_event(DeployEvent::ProjectCreating {
                    project: options.project.clone(),
                    tier,
                });
                let new_project = NewProject::for_tier(&options.project, tier);
                let created = self.api.create_project(&new_project)?;
                events.on_event(DeployEvent::ProjectCreated {
                    project: options.project.clone(),
                    tier,
                });
                Ok(created.slug_or(&new_project.slug))
            }
            Err(e) => Err(e),
        }
    }

    /// Drive the build poller until a terminal state. Fetch errors are
    /// logged and count as an attempt.
    fn follow_build(
        &self,
        slug: &str,
        options: &DeployOptions,
        events: &dyn DeployEventSink,
    ) -> (BuildOutcome, u32) {
        let mut poll = BuildPoll::new(options.max_attempts);
        loop {
            self.sleeper.sleep(options.poll_interval);
            let response = match self.api.get_project(slug) {
                Ok(project) => Some(project),
                Err(e) => {
                    debug!(slug, attempt = poll.attempts() + 1, error = %e, "build poll failed");
                    None
                }
            };

            let tick = poll.tick(response.as_ref());
            if let Some(chunk) = tick.output {
                events.on_event(DeployEvent::BuildLog { chunk });
            }
            if let Some(outcome) = tick.outcome {
                return (outcome, poll.attempts());
            }
        }
    }
}

