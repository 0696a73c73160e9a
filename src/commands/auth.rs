//! `init`, `logout` and `whoami`

use anyhow::Result;

use solidactions::config::{self, select_host, ClientConfig};
use solidactions::SolidError;

use crate::ui::context::UiContext;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

pub fn cmd_init(api_key: &str, dev: bool, host: Option<&str>, ui: &UiContext) -> Result<()> {
    let host = select_host(host, dev);
    let api_key = api_key.trim();
    if api_key.is_empty() {
        return Err(SolidError::InvalidInput(format!(
            "API key is required.\nGenerate an API key at: {}/settings/api-keys",
            host.trim_end_matches('/')
        ))
        .into());
    }

    let config = ClientConfig::new(host, api_key);
    let path = config::save(&config)?;
    tracing::info!(path = %path.display(), "configuration saved");

    if ui.json {
        return super::emit(serde_json::json!({
            "event": "complete",
            "command": "init",
            "host": config.host,
            "path": path.display().to_string(),
        }));
    }

    let c = ui.color;
    println!("{}", ColoredText::info("Initializing SolidActions CLI...").render(c));
    println!("{}", ColoredText::dim(format!("Host: {}", config.host)).render(c));
    println!(
        "{} {}",
        Icon::Success.colored(c, ui.unicode),
        ColoredText::success("CLI initialized successfully!").render(c)
    );
    println!(
        "{}",
        ColoredText::dim(format!("Configuration saved to {}", path.display())).render(c)
    );
    println!();
    println!("{}", ColoredText::info("Quick start:").render(c));
    for line in [
        "  solidactions deploy <project-name>    Deploy current directory",
        "  solidactions run <project> <workflow> Run a workflow",
        "  solidactions runs                     List recent runs",
    ] {
        println!("{}", ColoredText::dim(line).render(c));
    }
    Ok(())
}

pub fn cmd_logout(ui: &UiContext) -> Result<()> {
    let removed = config::clear()?;

    if ui.json {
        return super::emit(serde_json::json!({
            "event": "complete",
            "command": "logout",
            "removed": removed,
        }));
    }

    if removed {
        println!("{}", ColoredText::success("Logged out successfully.").render(ui.color));
    } else {
        println!("{}", ColoredText::dim("Not logged in.").render(ui.color));
    }
    Ok(())
}

pub fn cmd_whoami(ui: &UiContext) -> Result<()> {
    let config = config::load()?;

    if ui.json {
        return super::emit(match &config {
            Some(config) => serde_json::json!({
                "event": "whoami",
                "initialized": true,
                "host": config.host,
                "api_key": config.masked_api_key(),
            }),
            None => serde_json::json!({
                "event": "whoami",
                "initialized": false,
            }),
        });
    }

    let c = ui.color;
    match config {
        Some(config) => {
            println!("{}", ColoredText::info("Current configuration:").render(c));
            println!("  Host: {}", config.host);
            println!("  API Key: {}", config.masked_api_key());
        }
        None => {
            println!("{}", ColoredText::warning("Not initialized.").render(c));
            println!(
                "{}",
                ColoredText::dim("Run \"solidactions init <api-key>\" to configure.").render(c)
            );
        }
    }
    Ok(())
}
