//! `webhooks` command handler

use anyhow::Result;

use solidactions::application::list_webhooks;
use solidactions::domain::entities::Webhook;
use solidactions::Tier;

use crate::ui::context::UiContext;
use crate::ui::views::webhooks::render_webhooks;

pub fn cmd_webhooks(project: &str, tier: Tier, show_secrets: bool, ui: &UiContext) -> Result<()> {
    let api = super::platform_api()?;
    let webhooks = list_webhooks(&api, project, tier, show_secrets)?;

    if ui.json {
        let webhooks: Vec<Webhook> = webhooks
            .into_iter()
            .map(|mut w| {
                if !show_secrets {
                    w.secret = None;
                }
                w
            })
            .collect();
        return super::emit(serde_json::json!({
            "event": "webhooks",
            "project": project,
            "env": tier.as_str(),
            "webhooks": webhooks,
        }));
    }

    print!("{}", render_webhooks(project, tier, &webhooks, show_secrets, ui.color));
    Ok(())
}
