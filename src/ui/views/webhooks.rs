use solidactions::domain::entities::Webhook;
use solidactions::Tier;

use crate::ui::format::{pad, plural};
use crate::ui::primitives::text::ColoredText;

pub fn render_webhooks(
    project: &str,
    tier: Tier,
    webhooks: &[Webhook],
    show_secrets: bool,
    color: bool,
) -> String {
    let mut out = format!(
        "{}\n",
        ColoredText::info(format!("Webhooks for project \"{}\"{}:", project, tier.label())).render(color)
    );
    if webhooks.is_empty() {
        out.push_str(&format!(
            "{}\n",
            ColoredText::warning(format!("No webhooks found for project \"{}\".", project)).render(color)
        ));
        return out;
    }

    let (header, rule) = if show_secrets {
        (format!("{}{}SECRET", pad("WORKFLOW", 30), pad("URL", 60)), 120)
    } else {
        (format!("{}URL", pad("WORKFLOW", 30)), 90)
    };
    out.push_str(&format!(
        "\n{}\n{}\n",
        ColoredText::dim(header).render(color),
        ColoredText::dim("-".repeat(rule)).render(color)
    ));

    for webhook in webhooks {
        let mut line = format!(
            "{}{}",
            pad(webhook.label(), 30),
            ColoredText::info(pad(webhook.url.as_deref().unwrap_or("?"), 60)).render(color)
        );
        if show_secrets {
            line.push_str(&ColoredText::dim(webhook.secret.as_deref().unwrap_or("-")).render(color));
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }

    out.push_str(&format!(
        "\n{}\n",
        ColoredText::dim(plural(webhooks.len(), "webhook")).render(color)
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hook() -> Webhook {
        Webhook {
            name: Some("ingest".into()),
            url: Some("https://hooks.example/ingest".into()),
            secret: Some("whsec_1".into()),
            ..Default::default()
        }
    }

    #[test]
    fn secrets_hidden_by_default() {
        let out = render_webhooks("shop", Tier::Production, &[hook()], false, false);
        assert!(out.starts_with("Webhooks for project \"shop\":\n"));
        assert!(out.contains(&format!("{}https://hooks.example/ingest\n", pad("ingest", 30))));
        assert!(!out.contains("whsec_1"));
        assert!(!out.contains("SECRET"));
    }

    #[test]
    fn secrets_column_when_requested() {
        let out = render_webhooks("shop", Tier::Staging, &[hook()], true, false);
        assert!(out.starts_with("Webhooks for project \"shop\" (staging):\n"));
        assert!(out.contains(&format!(
            "{}{}whsec_1",
            pad("ingest", 30),
            pad("https://hooks.example/ingest", 60)
        )));
    }

    #[test]
    fn empty_list_warns() {
        let out = render_webhooks("shop", Tier::Production, &[], false, false);
        assert!(out.ends_with("No webhooks found for project \"shop\".\n"));
    }
}
