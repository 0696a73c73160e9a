//! In-memory `PlatformApi` for use case tests

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::path::Path;

use crate::domain::entities::{
    BulkPushSummary, EnvValue, GlobalVariable, NewGlobalVariable, NewProject, NewSchedule,
    ProjectInfo, ProjectVariableMapping, RunInfo, Schedule, Webhook,
};
use crate::domain::ports::{MappingQuery, PlatformApi};
use crate::domain::services::{DeclarationPayload, LogPayload};
use crate::domain::value_objects::ResourceId;
use crate::error::{SolidError, SolidResult};

fn transient() -> SolidError {
    SolidError::Remote {
        status: 503,
        body: "unavailable".to_string(),
    }
}

/// Scripted fake. `None` entries in a script fail that call with a 503.
#[derive(Default)]
pub struct FakeApi {
    pub projects: RefCell<HashMap<String, ProjectInfo>>,
    pub created_projects: RefCell<Vec<NewProject>>,
    pub uploads: RefCell<Vec<String>>,
    pub build_script: RefCell<VecDeque<Option<ProjectInfo>>>,
    pub build_log: RefCell<Option<String>>,
    pub source: RefCell<Vec<u8>>,

    pub variables: RefCell<Vec<GlobalVariable>>,
    pub created_variables: RefCell<Vec<NewGlobalVariable>>,
    pub deleted_variables: RefCell<Vec<ResourceId>>,

    pub mappings: RefCell<Vec<ProjectVariableMapping>>,
    pub mapping_queries: RefCell<Vec<(String, MappingQuery)>>,
    pub created_mappings: RefCell<Vec<(String, String, ResourceId)>>,
    pub deleted_mappings: RefCell<Vec<(String, ResourceId)>>,
    pub pushed: RefCell<Vec<(String, Vec<EnvValue>)>>,
    pub push_summary: RefCell<BulkPushSummary>,
    pub fail_push: RefCell<bool>,
    pub declarations: RefCell<Vec<(String, Vec<DeclarationPayload>)>>,
    pub fail_declarations: RefCell<bool>,

    pub triggered: RefCell<Vec<(String, String, serde_json::Value)>>,
    pub runs: RefCell<Vec<RunInfo>>,
    pub run_queries: RefCell<Vec<(u32, Option<String>)>>,
    pub run_script: RefCell<VecDeque<Option<RunInfo>>>,
    pub log_script: RefCell<VecDeque<Option<LogPayload>>>,

    pub schedules: RefCell<Vec<Schedule>>,
    pub created_schedules: RefCell<Vec<(String, NewSchedule)>>,
    pub deleted_schedules: RefCell<Vec<(String, String)>>,
    pub webhooks: RefCell<Vec<Webhook>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_project(self, slug: &str) -> Self {
        self.projects.borrow_mut().insert(
            slug.to_string(),
            ProjectInfo {
                slug: Some(slug.to_string()),
                ..Default::default()
            },
        );
        self
    }

    pub fn script_build(&self, steps: Vec<Option<(&str, &str)>>) {
        let mut script = self.build_script.borrow_mut();
        for step in steps {
            script.push_back(step.map(|(status, log)| ProjectInfo {
                status: Some(status.to_string()),
                build_log: Some(log.to_string()),
                ..Default::default()
            }));
        }
    }

    pub fn script_run(&self, statuses: Vec<Option<&str>>) {
        let mut script = self.run_script.borrow_mut();
        for status in statuses {
            script.push_back(status.map(|s| RunInfo {
                id: ResourceId::new("run-1"),
                status: Some(s.to_string()),
                ..Default::default()
            }));
        }
    }

    pub fn script_logs(&self, logs: Vec<Option<LogPayload>>) {
        self.log_script.borrow_mut().extend(logs);
    }
}

impl PlatformApi for FakeApi {
    fn get_project(&self, slug: &str) -> SolidResult<ProjectInfo> {
        if !self.uploads.borrow().is_empty() {
            return match self.build_script.borrow_mut().pop_front() {
                Some(Some(project)) => Ok(project),
                Some(None) => Err(transient()),
                None => Ok(ProjectInfo {
                    status: Some("running".to_string()),
                    ..Default::default()
                }),
            };
        }
        self.projects
            .borrow()
            .get(slug)
            .cloned()
            .ok_or_else(|| SolidError::not_found(format!("/api/v1/projects/{}", slug)))
    }

    fn create_project(&self, project: &NewProject) -> SolidResult<ProjectInfo> {
        self.created_projects.borrow_mut().push(project.clone());
        Ok(ProjectInfo {
            slug: Some(project.slug.clone()),
            name: Some(project.name.clone()),
            ..Default::default()
        })
    }

    fn upload_bundle(&self, slug: &str, bundle: &Path) -> SolidResult<()> {
        assert!(bundle.exists(), "bundle must exist during upload");
        self.uploads.borrow_mut().push(slug.to_string());
        Ok(())
    }

    fn get_build_log(&self, _slug: &str) -> SolidResult<Option<String>> {
        Ok(self.build_log.borrow().clone())
    }

    fn download_source(&self, _slug: &str) -> SolidResult<Vec<u8>> {
        Ok(self.source.borrow().clone())
    }

    fn list_variables(&self) -> SolidResult<Vec<GlobalVariable>> {
        Ok(self.variables.borrow().clone())
    }

    fn create_variable(&self, variable: &NewGlobalVariable) -> SolidResult<()> {
        self.created_variables.borrow_mut().push(variable.clone());
        Ok(())
    }

    fn delete_variable(&self, id: &ResourceId) -> SolidResult<()> {
        self.deleted_variables.borrow_mut().push(id.clone());
        Ok(())
    }

    fn list_mappings(
        &self,
        slug: &str,
        query: MappingQuery,
    ) -> SolidResult<Vec<ProjectVariableMapping>> {
        self.mapping_queries
            .borrow_mut()
            .push((slug.to_string(), query));
        Ok(self.mappings.borrow().clone())
    }

    fn create_mapping(
        &self,
        slug: &str,
        project_key: &str,
        global_variable_id: &ResourceId,
    ) -> SolidResult<()> {
        self.created_mappings.borrow_mut().push((
            slug.to_string(),
            project_key.to_string(),
            global_variable_id.clone(),
        ));
        Ok(())
    }

    fn delete_mapping(&self, slug: &str, id: &ResourceId) -> SolidResult<()> {
        self.deleted_mappings
            .borrow_mut()
            .push((slug.to_string(), id.clone()));
        Ok(())
    }

    fn push_env_values(&self, slug: &str, values: &[EnvValue]) -> SolidResult<BulkPushSummary> {
        if *self.fail_push.borrow() {
            return Err(transient());
        }
        self.pushed
            .borrow_mut()
            .push((slug.to_string(), values.to_vec()));
        Ok(*self.push_summary.borrow())
    }

    fn sync_declarations(
        &self,
        slug: &str,
        declarations: &[DeclarationPayload],
    ) -> SolidResult<()> {
        if *self.fail_declarations.borrow() {
            return Err(transient());
        }
        self.declarations
            .borrow_mut()
            .push((slug.to_string(), declarations.to_vec()));
        Ok(())
    }

    fn trigger_run(
        &self,
        project: &str,
        workflow: &str,
        input: &serde_json::Value,
    ) -> SolidResult<RunInfo> {
        self.triggered.borrow_mut().push((
            project.to_string(),
            workflow.to_string(),
            input.clone(),
        ));
        Ok(RunInfo {
            id: ResourceId::new("run-1"),
            status: Some("queued".to_string()),
            ..Default::default()
        })
    }

    fn list_runs(&self, limit: u32, project: Option<&str>) -> SolidResult<Vec<RunInfo>> {
        self.run_queries
            .borrow_mut()
            .push((limit, project.map(str::to_string)));
        Ok(self.runs.borrow().clone())
    }

    fn get_run(&self, id: &str) -> SolidResult<RunInfo> {
        match self.run_script.borrow_mut().pop_front() {
            Some(Some(run)) => Ok(run),
            Some(None) => Err(transient()),
            None => Err(SolidError::not_found(format!("/api/v1/runs/{}", id))),
        }
    }

    fn get_run_logs(&self, _id: &str) -> SolidResult<LogPayload> {
        match self.log_script.borrow_mut().pop_front() {
            Some(Some(logs)) => Ok(logs),
            Some(None) => Err(transient()),
            None => Ok(LogPayload::default()),
        }
    }

    fn list_schedules(&self, _slug: &str) -> SolidResult<Vec<Schedule>> {
        Ok(self.schedules.borrow().clone())
    }

    fn create_schedule(&self, slug: &str, schedule: &NewSchedule) -> SolidResult<()> {
        self.created_schedules
            .borrow_mut()
            .push((slug.to_string(), schedule.clone()));
        Ok(())
    }

    fn delete_schedule(&self, slug: &str, id: &str) -> SolidResult<()> {
        self.deleted_schedules
            .borrow_mut()
            .push((slug.to_string(), id.to_string()));
        Ok(())
    }

    fn list_webhooks(&self, _slug: &str, _show_secrets: bool) -> SolidResult<Vec<Webhook>> {
        Ok(self.webhooks.borrow().clone())
    }
}
