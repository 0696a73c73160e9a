use solidactions::SolidError;

use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

pub fn format_error(err: &anyhow::Error) -> String {
    let caps = crate::ui::terminal::detect_capabilities();
    format_error_with(err, caps.supports_color, caps.supports_unicode)
}

fn format_error_with(err: &anyhow::Error, supports_color: bool, supports_unicode: bool) -> String {
    let icon = Icon::Error.colored(supports_color, supports_unicode);

    match err.downcast_ref::<SolidError>() {
        Some(SolidError::Validation { errors }) => {
            let mut out = format!(
                "{} {}\n",
                icon,
                ColoredText::error("Deployment failed - validation errors:").render(supports_color)
            );
            for e in errors {
                out.push_str(&format!(
                    "  {} {}\n",
                    Icon::Error.colored(supports_color, supports_unicode),
                    e
                ));
            }
            out
        }
        Some(SolidError::NotFound {
            resource,
            hint: Some(hint),
        }) => format!(
            "{} {}\n{}\n",
            icon,
            ColoredText::error(format!("{} not found.", resource)).render(supports_color),
            ColoredText::dim(hint.as_str()).render(supports_color)
        ),
        Some(SolidError::Timeout { .. }) => format!(
            "{} {}\n",
            Icon::Warning.colored(supports_color, supports_unicode),
            ColoredText::warning(err.to_string()).render(supports_color)
        ),
        _ => format!(
            "{} {}\n",
            icon,
            ColoredText::error(err.to_string()).render(supports_color)
        ),
    }
}

pub fn print_error(err: &anyhow::Error, json: bool) {
    if json {
        let output = serde_json::json!({
            "event": "error",
            "message": err.to_string(),
        });
        let _ = crate::ui::json::emit(output);
        return;
    }

    eprint!("{}", format_error(err));
}
