//! Command handlers
//!
//! Each handler loads what it needs, runs one application use case and
//! prints the result either as text or as NDJSON events.

pub mod auth;
pub mod deploy;
pub mod env;
pub mod pull;
pub mod run;
pub mod schedule;
pub mod webhooks;

use anyhow::Result;

use solidactions::domain::ports::{Confirmer, FixedAnswer};
use solidactions::infrastructure::{DialoguerConfirmer, HttpPlatformApi};

use crate::ui::context::UiContext;
use crate::ui::primitives::text::ColoredText;

/// API client for the configured host; fails when `init` has not been run.
pub(crate) fn platform_api() -> Result<HttpPlatformApi> {
    let config = solidactions::config::load_required()?;
    Ok(HttpPlatformApi::new(&config)?)
}

/// `--yes` answers every question; otherwise ask on the terminal.
pub(crate) fn confirmer(yes: bool) -> Box<dyn Confirmer> {
    if yes {
        Box::new(FixedAnswer(true))
    } else {
        Box::new(DialoguerConfirmer)
    }
}

/// Print a blue status line in text mode.
pub(crate) fn announce(ui: &UiContext, message: impl Into<String>) {
    if !ui.json {
        println!("{}", ColoredText::info(message).render(ui.color));
    }
}

pub(crate) fn emit(event: serde_json::Value) -> Result<()> {
    crate::ui::json::emit(event)?;
    Ok(())
}
