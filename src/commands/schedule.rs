//! `schedule:set`, `schedule:list` and `schedule:delete`

use anyhow::Result;
use chrono::Utc;

use solidactions::application::{new_schedule, ScheduleDeleteOutcome, ScheduleUseCase};

use crate::ui::context::UiContext;
use crate::ui::primitives::text::ColoredText;
use crate::ui::views::schedules::{render_schedule_deleted, render_schedule_set, render_schedules};

pub fn cmd_schedule_set(
    project: &str,
    cron: &str,
    workflow: Option<&str>,
    input: Option<&str>,
    ui: &UiContext,
) -> Result<()> {
    let schedule = new_schedule(cron, workflow, input)?;
    let api = super::platform_api()?;
    super::announce(ui, format!("Setting schedule for project \"{}\"...", project));

    let confirmer = super::confirmer(false);
    ScheduleUseCase::new(&api, confirmer.as_ref()).set(project, &schedule)?;

    if ui.json {
        return super::emit(serde_json::json!({
            "event": "complete",
            "command": "schedule:set",
            "project": project,
            "schedule": schedule,
        }));
    }
    print!("{}", render_schedule_set(&schedule, ui.color));
    Ok(())
}

pub fn cmd_schedule_list(project: &str, ui: &UiContext) -> Result<()> {
    let api = super::platform_api()?;
    let confirmer = super::confirmer(false);
    let schedules = ScheduleUseCase::new(&api, confirmer.as_ref()).list(project)?;

    if ui.json {
        return super::emit(serde_json::json!({
            "event": "schedules",
            "project": project,
            "schedules": schedules,
        }));
    }
    print!("{}", render_schedules(project, &schedules, Utc::now(), ui.color));
    Ok(())
}

pub fn cmd_schedule_delete(project: &str, id: &str, yes: bool, ui: &UiContext) -> Result<()> {
    let api = super::platform_api()?;
    super::announce(ui, format!("Deleting schedule {} from project \"{}\"...", id, project));

    let confirmer = super::confirmer(yes);
    let outcome = ScheduleUseCase::new(&api, confirmer.as_ref()).delete(project, id)?;

    if ui.json {
        let result = match outcome {
            ScheduleDeleteOutcome::Deleted(_) => "deleted",
            ScheduleDeleteOutcome::Cancelled => "cancelled",
        };
        return super::emit(serde_json::json!({
            "event": "complete",
            "command": "schedule:delete",
            "project": project,
            "id": id,
            "result": result,
        }));
    }

    match outcome {
        ScheduleDeleteOutcome::Deleted(schedule) => {
            print!("{}", render_schedule_deleted(&schedule, ui.color))
        }
        ScheduleDeleteOutcome::Cancelled => {
            println!("{}", ColoredText::dim("Cancelled.").render(ui.color))
        }
    }
    Ok(())
}
