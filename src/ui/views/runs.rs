use chrono::{DateTime, Utc};

use solidactions::domain::entities::{RunInfo, RunStatus};

use crate::ui::format::{local_datetime, pad, plural, run_duration};
use crate::ui::primitives::text::ColoredText;

fn status_text(status: &RunStatus, text: String) -> ColoredText {
    match status {
        RunStatus::Completed => ColoredText::success(text),
        RunStatus::Running => ColoredText::info(text),
        RunStatus::Pending | RunStatus::Queued => ColoredText::warning(text),
        RunStatus::Failed => ColoredText::error(text),
        _ => ColoredText::dim(text),
    }
}

pub fn render_runs(project: Option<&str>, runs: &[RunInfo], now: DateTime<Utc>, color: bool) -> String {
    let title = match project {
        Some(project) => format!("Recent runs for \"{}\":", project),
        None => "Recent runs:".to_string(),
    };
    let mut out = format!("{}\n", ColoredText::info(title).render(color));
    if runs.is_empty() {
        out.push_str(&format!("{}\n", ColoredText::dim("No runs found.").render(color)));
        return out;
    }

    out.push_str(&format!(
        "\n{}\n{}\n",
        ColoredText::dim(format!(
            "{}{}{}{}DURATION",
            pad("ID", 38),
            pad("WORKFLOW", 25),
            pad("STATUS", 12),
            pad("STARTED", 22)
        ))
        .render(color),
        ColoredText::dim("-".repeat(110)).render(color)
    ));

    for run in runs {
        let id = if run.id.is_empty() { "?" } else { run.id.as_str() };
        let status_label = run.status.as_deref().unwrap_or("?");
        out.push_str(&format!(
            "{}{}{}{}{}\n",
            ColoredText::dim(pad(id, 38)).render(color),
            pad(run.workflow_label(), 25),
            status_text(&run.status(), pad(status_label, 12)).render(color),
            ColoredText::dim(pad(&local_datetime(run.started_at.as_deref()), 22)).render(color),
            ColoredText::dim(run_duration(
                run.started_at.as_deref(),
                run.completed_at.as_deref(),
                now
            ))
            .render(color)
        ));
    }

    out.push_str(&format!(
        "\n{}\n",
        ColoredText::dim(format!("Showing {}", plural(runs.len(), "run"))).render(color)
    ));
    out
}
