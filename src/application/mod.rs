//! Application Layer
//!
//! Use cases that orchestrate the client flows. They depend only on domain
//! ports; the binary wires in the HTTP client, prompts and event sinks.
//!
//! ## Use Cases
//!
//! - `DeployUseCase` - validate, bundle, upload, follow the build, sync env
//! - `EnvSync` - push manifest declarations and local `.env` values
//! - `EnvPullUseCase` - write resolved variables to a local env file
//! - `RunMonitor` - trigger runs, wait for them, show and follow logs
//! - `VariablesUseCase` - global variables and project mappings
//! - `ScheduleUseCase` - cron schedules

pub mod deploy;
pub mod env_pull;
pub mod env_sync;
pub mod listing;
pub mod run;
pub mod source_pull;
pub mod validate;
pub mod variables;

#[cfg(test)]
pub(crate) mod testing;

pub use deploy::{DeployOptions, DeployResult, DeployUseCase};
pub use env_pull::{EnvPullOptions, EnvPullOutcome, EnvPullUseCase, OAuthWarning};
pub use env_sync::{EnvSync, EnvSyncReport};
pub use listing::{
    build_log, list_runs, list_webhooks, new_schedule, ScheduleDeleteOutcome, ScheduleUseCase,
    DEFAULT_RUN_LIMIT,
};
pub use run::{outcome_result, parse_input, LogsOutcome, RunMonitor};
pub use source_pull::{pull_source, PullResult};
pub use validate::{validate_project, ValidationReport};
pub use variables::{new_global_variable, DeleteOutcome, DeleteTarget, TierSources, VariablesUseCase};
