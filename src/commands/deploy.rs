//! `deploy` command handler

use std::path::Path;

use anyhow::Result;

use solidactions::application::{DeployOptions, DeployUseCase};
use solidactions::domain::ports::DeployEventSink;
use solidactions::infrastructure::{JsonEventSink, ThreadSleeper};
use solidactions::Tier;

use crate::ui::context::UiContext;
use crate::ui::sinks::ConsoleDeploySink;

pub fn cmd_deploy(project: &str, path: &Path, tier: Tier, create: bool, ui: &UiContext) -> Result<()> {
    let api = super::platform_api()?;
    let options = DeployOptions::new(project, path)
        .with_tier(tier)
        .with_create(create);

    let sink: Box<dyn DeployEventSink> = if ui.json {
        Box::new(JsonEventSink::stdout())
    } else {
        Box::new(ConsoleDeploySink::stdout(ui))
    };

    let use_case = DeployUseCase::new(&api, &ThreadSleeper);
    let result = use_case.execute_with_events(&options, sink.as_ref())?;
    tracing::info!(
        slug = %result.slug,
        attempts = result.attempts,
        bytes = result.bundle_bytes,
        "deploy finished"
    );
    result.into_result(options.poll_budget())?;
    Ok(())
}
