//! Platform API port - one method per remote endpoint
//!
//! Implementations map HTTP failures onto the `SolidError` taxonomy:
//! 401 is `Auth`, 404 is `NotFound`, 422 is `RemoteValidation` and any other
//! non-success status is `Remote`.

use std::path::Path;

use crate::domain::entities::{
    BulkPushSummary, EnvValue, GlobalVariable, NewGlobalVariable, NewProject, NewSchedule,
    ProjectInfo, ProjectVariableMapping, RunInfo, Schedule, Webhook,
};
use crate::domain::services::{DeclarationPayload, LogPayload};
use crate::domain::value_objects::ResourceId;
use crate::error::SolidResult;

/// Query flags for listing a project's variable mappings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MappingQuery {
    /// Return secret values in plain text
    pub reveal: bool,
    /// Ask the server to resolve OAuth connections into tokens
    pub resolve_oauth: bool,
}

impl MappingQuery {
    pub const PLAIN: MappingQuery = MappingQuery {
        reveal: false,
        resolve_oauth: false,
    };
}

pub trait PlatformApi {
    // Projects
    fn get_project(&self, slug: &str) -> SolidResult<ProjectInfo>;
    fn create_project(&self, project: &NewProject) -> SolidResult<ProjectInfo>;
    fn upload_bundle(&self, slug: &str, bundle: &Path) -> SolidResult<()>;
    fn get_build_log(&self, slug: &str) -> SolidResult<Option<String>>;
    fn download_source(&self, slug: &str) -> SolidResult<Vec<u8>>;

    // Global variables
    fn list_variables(&self) -> SolidResult<Vec<GlobalVariable>>;
    fn create_variable(&self, variable: &NewGlobalVariable) -> SolidResult<()>;
    fn delete_variable(&self, id: &ResourceId) -> SolidResult<()>;

    // Project variable mappings
    fn list_mappings(
        &self,
        slug: &str,
        query: MappingQuery,
    ) -> SolidResult<Vec<ProjectVariableMapping>>;
    fn create_mapping(
        &self,
        slug: &str,
        project_key: &str,
        global_variable_id: &ResourceId,
    ) -> SolidResult<()>;
    fn delete_mapping(&self, slug: &str, id: &ResourceId) -> SolidResult<()>;
    fn push_env_values(&self, slug: &str, values: &[EnvValue]) -> SolidResult<BulkPushSummary>;
    fn sync_declarations(
        &self,
        slug: &str,
        declarations: &[DeclarationPayload],
    ) -> SolidResult<()>;

    // Runs
    fn trigger_run(
        &self,
        project: &str,
        workflow: &str,
        input: &serde_json::Value,
    ) -> SolidResult<RunInfo>;
    fn list_runs(&self, limit: u32, project: Option<&str>) -> SolidResult<Vec<RunInfo>>;
    fn get_run(&self, id: &str) -> SolidResult<RunInfo>;
    fn get_run_logs(&self, id: &str) -> SolidResult<LogPayload>;

    // Schedules and webhooks
    fn list_schedules(&self, slug: &str) -> SolidResult<Vec<Schedule>>;
    fn create_schedule(&self, slug: &str, schedule: &NewSchedule) -> SolidResult<()>;
    fn delete_schedule(&self, slug: &str, id: &str) -> SolidResult<()>;
    fn list_webhooks(&self, slug: &str, show_secrets: bool) -> SolidResult<Vec<Webhook>>;
}
