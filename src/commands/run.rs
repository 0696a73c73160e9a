//! `run`, `runs`, `logs` and `logs:build`

use anyhow::Result;
use chrono::Utc;

use solidactions::application::{build_log, list_runs, outcome_result, parse_input, RunMonitor};
use solidactions::domain::ports::RunEventSink;
use solidactions::domain::services::RunPollSettings;
use solidactions::infrastructure::{JsonEventSink, ThreadSleeper};
use solidactions::Tier;

use crate::ui::context::UiContext;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;
use crate::ui::sinks::{ConsoleRunSink, RunView};
use crate::ui::views::runs::render_runs;

fn run_sink(ui: &UiContext, view: RunView) -> Box<dyn RunEventSink> {
    if ui.json {
        Box::new(JsonEventSink::stdout())
    } else {
        Box::new(ConsoleRunSink::stdout(ui, view))
    }
}

pub fn cmd_run(
    project: &str,
    workflow: &str,
    tier: Tier,
    input: Option<&str>,
    wait: bool,
    ui: &UiContext,
) -> Result<()> {
    let input = parse_input(input)?;
    let api = super::platform_api()?;
    super::announce(
        ui,
        format!(
            "Running workflow \"{}\" in project \"{}\"{}...",
            workflow,
            project,
            tier.label()
        ),
    );

    let sink = run_sink(ui, RunView::Wait);
    let monitor = RunMonitor::new(&api, &ThreadSleeper);
    let run = monitor.trigger(project, workflow, tier, &input, sink.as_ref())?;
    let id = run.id.to_string();

    if !wait {
        if !ui.json {
            println!(
                "{}",
                ColoredText::dim(format!("View logs: solidactions logs {}", id)).render(ui.color)
            );
        }
        return Ok(());
    }

    if !ui.json {
        println!("{}", ColoredText::dim("Waiting for completion...").render(ui.color));
    }
    let settings = RunPollSettings::WAIT;
    let outcome = monitor.wait(&id, settings, sink.as_ref());
    outcome_result(&id, outcome, settings)?;
    Ok(())
}

pub fn cmd_runs(project: Option<&str>, limit: u32, ui: &UiContext) -> Result<()> {
    let api = super::platform_api()?;
    let runs = list_runs(&api, project, limit)?;

    if ui.json {
        return super::emit(serde_json::json!({
            "event": "runs",
            "project": project,
            "runs": runs,
        }));
    }

    print!("{}", render_runs(project, &runs, Utc::now(), ui.color));
    Ok(())
}

pub fn cmd_logs(run_id: &str, follow: bool, ui: &UiContext) -> Result<()> {
    let api = super::platform_api()?;
    super::announce(ui, format!("Fetching logs for run {}...", run_id));

    let sink = run_sink(ui, RunView::Logs);
    let monitor = RunMonitor::new(&api, &ThreadSleeper);
    let outcome = monitor.show_logs(run_id, follow, sink.as_ref())?;
    outcome.into_result(run_id)?;
    Ok(())
}

pub fn cmd_logs_build(project: &str, ui: &UiContext) -> Result<()> {
    let api = super::platform_api()?;
    super::announce(ui, format!("Fetching build logs for project \"{}\"...", project));

    let log = build_log(&api, project)?;

    if ui.json {
        return super::emit(serde_json::json!({
            "event": "build_log",
            "project": project,
            "log": log,
        }));
    }

    let c = ui.color;
    match log {
        Some(log) => {
            println!("{}", ColoredText::dim("---").render(c));
            println!("{}", log.trim_end());
            println!("{}", ColoredText::dim("---").render(c));
        }
        None => println!(
            "{} {}",
            Icon::Pending.colored(c, ui.unicode),
            ColoredText::dim("No build logs available.").render(c)
        ),
    }
    Ok(())
}
