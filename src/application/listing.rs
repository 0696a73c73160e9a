//! Schedules, webhooks, run listings and build logs

use crate::application::run::parse_input;
use crate::domain::entities::{NewSchedule, RunInfo, Schedule, Webhook};
use crate::domain::ports::{Confirmer, PlatformApi};
use crate::domain::value_objects::Tier;
use crate::error::{SolidError, SolidResult};

pub const DEFAULT_RUN_LIMIT: u32 = 20;

/// Build a schedule body; `input` must be valid JSON when given.
pub fn new_schedule(
    cron: &str,
    workflow: Option<&str>,
    input: Option<&str>,
) -> SolidResult<NewSchedule> {
    let input = match input {
        Some(raw) => Some(parse_input(Some(raw))?),
        None => None,
    };
    Ok(NewSchedule {
        cron: cron.to_string(),
        workflow: workflow.map(str::to_string),
        input,
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleDeleteOutcome {
    Deleted(Schedule),
    Cancelled,
}

pub struct ScheduleUseCase<'a, A, C>
where
    A: PlatformApi + ?Sized,
    C: Confirmer + ?Sized,
{
    api: &'a A,
    confirmer: &'a C,
}

impl<'a, A, C> ScheduleUseCase<'a, A, C>
where
    A: PlatformApi + ?Sized,
    C: Confirmer + ?Sized,
{
    pub fn new(api: &'a A, confirmer: &'a C) -> Self {
        Self { api, confirmer }
    }

    pub fn set(&self, project: &str, schedule: &NewSchedule) -> SolidResult<()> {
        self.api
            .create_schedule(project, schedule)
            .map_err(|e| project_not_found(e, project))
    }

    pub fn list(&self, project: &str) -> SolidResult<Vec<Schedule>> {
        self.api
            .list_schedules(project)
            .map_err(|e| project_not_found(e, project))
    }

    pub fn delete(&self, project: &str, id: &str) -> SolidResult<ScheduleDeleteOutcome> {
        let schedule = self
            .list(project)?
            .into_iter()
            .find(|s| s.id.as_str() == id)
            .ok_or_else(|| {
                SolidError::not_found(format!("Schedule {} in project \"{}\"", id, project))
            })?;

        let question = format!(
            "Delete schedule for workflow \"{}\" ({})?",
            schedule.workflow_label(),
            schedule.cron_expression.as_deref().unwrap_or("?")
        );
        if !self.confirmer.confirm(&question)? {
            return Ok(ScheduleDeleteOutcome::Cancelled);
        }

        self.api.delete_schedule(project, id).map_err(|e| {
            e.or_not_found(
                format!("Project \"{}\" or schedule {}", project, id),
                None,
            )
        })?;
        Ok(ScheduleDeleteOutcome::Deleted(schedule))
    }
}

fn project_not_found(e: SolidError, project: &str) -> SolidError {
    e.or_not_found(format!("Project \"{}\"", project), None)
}

/// Recent runs, optionally for one project.
pub fn list_runs<A>(api: &A, project: Option<&str>, limit: u32) -> SolidResult<Vec<RunInfo>>
where
    A: PlatformApi + ?Sized,
{
    api.list_runs(limit, project)
}

/// Last build log of a project; `None` when there is none yet.
pub fn build_log<A>(api: &A, project: &str) -> SolidResult<Option<String>>
where
    A: PlatformApi + ?Sized,
{
    let log = api
        .get_build_log(project)
        .map_err(|e| project_not_found(e, project))?;
    Ok(log.filter(|l| !l.trim().is_empty()))
}

/// Webhooks of the tier's project.
pub fn list_webhooks<A>(
    api: &A,
    project: &str,
    tier: Tier,
    show_secrets: bool,
) -> SolidResult<Vec<Webhook>>
where
    A: PlatformApi + ?Sized,
{
    let slug = tier.project_slug(project);
    api.list_webhooks(&slug, show_secrets)
        .map_err(|e| project_not_found(e, &slug))
}
