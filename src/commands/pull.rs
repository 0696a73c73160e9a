//! `pull` command handler

use std::path::Path;

use anyhow::Result;

use solidactions::application::pull_source;

use crate::ui::context::UiContext;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

pub fn cmd_pull(project: &str, path: &Path, ui: &UiContext) -> Result<()> {
    let api = super::platform_api()?;
    super::announce(ui, format!("Pulling project \"{}\"...", project));

    let result = pull_source(&api, project, path)?;

    if ui.json {
        return super::emit(serde_json::json!({
            "event": "complete",
            "command": "pull",
            "project": project,
            "destination": result.destination.display().to_string(),
            "bytes": result.bytes,
        }));
    }

    let c = ui.color;
    println!(
        "{}",
        ColoredText::dim(format!("Downloaded {} bytes", result.bytes)).render(c)
    );
    println!(
        "{}",
        ColoredText::warning(format!("Extracted to {}", result.destination.display())).render(c)
    );
    println!(
        "{} {}",
        Icon::Success.colored(c, ui.unicode),
        ColoredText::success(format!("Project \"{}\" pulled successfully!", project)).render(c)
    );
    Ok(())
}
