use chrono::{DateTime, Utc};

use solidactions::domain::entities::{NewSchedule, Schedule};

use crate::ui::format::{pad, plural, relative_time};
use crate::ui::primitives::text::ColoredText;

pub fn render_schedules(project: &str, schedules: &[Schedule], now: DateTime<Utc>, color: bool) -> String {
    let mut out = format!(
        "{}\n",
        ColoredText::info(format!("Schedules for project \"{}\":", project)).render(color)
    );
    if schedules.is_empty() {
        out.push_str(&format!("{}\n", ColoredText::dim("No schedules found.").render(color)));
        return out;
    }

    out.push_str(&format!(
        "\n{}\n{}\n",
        ColoredText::dim(format!(
            "{}{}{}{}NEXT RUN",
            pad("ID", 8),
            pad("WORKFLOW", 25),
            pad("CRON", 18),
            pad("ENABLED", 10)
        ))
        .render(color),
        ColoredText::dim("-".repeat(95)).render(color)
    ));

    for schedule in schedules {
        let id = if schedule.id.is_empty() { "?" } else { schedule.id.as_str() };
        let enabled = if schedule.enabled {
            ColoredText::success(pad("yes", 10))
        } else {
            ColoredText::error(pad("no", 10))
        };
        let next = schedule
            .next_run_at
            .as_deref()
            .map(|at| relative_time(at, now))
            .unwrap_or_else(|| "-".to_string());
        out.push_str(&format!(
            "{}{}{}{}{}\n",
            ColoredText::dim(pad(id, 8)).render(color),
            pad(schedule.workflow_label(), 25),
            ColoredText::info(pad(schedule.cron_expression.as_deref().unwrap_or("?"), 18)).render(color),
            enabled.render(color),
            ColoredText::dim(next).render(color)
        ));
    }

    out.push_str(&format!(
        "\n{}\n",
        ColoredText::dim(plural(schedules.len(), "schedule")).render(color)
    ));
    out
}

/// Confirmation after `schedule:set`
pub fn render_schedule_set(schedule: &NewSchedule, color: bool) -> String {
    let mut out = format!(
        "{}\n{}\n",
        ColoredText::success("Schedule set successfully!").render(color),
        ColoredText::dim(format!("  Cron: {}", schedule.cron)).render(color)
    );
    if let Some(workflow) = &schedule.workflow {
        out.push_str(&format!(
            "{}\n",
            ColoredText::dim(format!("  Workflow: {}", workflow)).render(color)
        ));
    }
    if let Some(input) = &schedule.input {
        out.push_str(&format!(
            "{}\n",
            ColoredText::dim(format!("  Input: {}", input)).render(color)
        ));
    }
    out
}

/// Confirmation after `schedule:delete`
pub fn render_schedule_deleted(schedule: &Schedule, color: bool) -> String {
    format!(
        "{}\n{}\n{}\n",
        ColoredText::success(format!("Schedule {} deleted successfully.", schedule.id)).render(color),
        ColoredText::dim(format!("  Workflow: {}", schedule.workflow_label())).render(color),
        ColoredText::dim(format!(
            "  Cron: {}",
            schedule.cron_expression.as_deref().unwrap_or("?")
        ))
        .render(color)
    )
}
