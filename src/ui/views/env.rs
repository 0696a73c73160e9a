use solidactions::application::{EnvPullOutcome, OAuthWarning};
use solidactions::domain::entities::{DevSource, NewGlobalVariable, StagingSource};

use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;
use crate::ui::theme::SECRET_MASK;

/// Summary printed after `env:create`; secret values are masked.
pub fn render_variable_created(var: &NewGlobalVariable, color: bool) -> String {
    let shown = |value: &str| {
        if var.is_secret {
            SECRET_MASK.to_string()
        } else {
            value.to_string()
        }
    };
    let kind = if var.is_secret { "secret" } else { "variable" };

    let mut lines = vec![ColoredText::success(format!(
        "Global {} \"{}\" created successfully!",
        kind, var.key
    ))
    .render(color)];
    let mut detail = |text: String| lines.push(ColoredText::dim(text).render(color));

    detail(format!("  Production: {}", shown(&var.production_value)));
    match (var.staging_source, var.staging_value.as_deref()) {
        (Some(StagingSource::InheritProduction), _) => {
            detail("  Staging: (inherits from production)".to_string())
        }
        (_, Some(value)) if !value.is_empty() => detail(format!("  Staging: {}", shown(value))),
        _ => {}
    }
    match (var.dev_source, var.dev_value.as_deref()) {
        (Some(DevSource::InheritStaging), _) => detail("  Dev: (inherits from staging)".to_string()),
        (Some(DevSource::InheritProduction), _) => {
            detail("  Dev: (inherits from production)".to_string())
        }
        (_, Some(value)) if !value.is_empty() => detail(format!("  Dev: {}", shown(value))),
        _ => {}
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn render_warnings(warnings: &[OAuthWarning], color: bool, unicode: bool) -> String {
    warnings
        .iter()
        .map(|w| {
            format!(
                "  {} {}\n",
                Icon::Warning.colored(color, unicode),
                ColoredText::warning(format!("{}: {}", w.key, w.message)).render(color)
            )
        })
        .collect()
}

/// Result lines for `env:pull`
pub fn render_env_pull(outcome: &EnvPullOutcome, color: bool, unicode: bool) -> String {
    match outcome {
        EnvPullOutcome::NoVariables => format!(
            "{}\n",
            ColoredText::warning("No environment variables found for this project.").render(color)
        ),
        EnvPullOutcome::Cancelled => format!("{}\n", ColoredText::dim("Cancelled.").render(color)),
        EnvPullOutcome::NoOAuthVariables => format!(
            "{}\n",
            ColoredText::warning("No OAuth variables found for this project.").render(color)
        ),
        EnvPullOutcome::Written {
            file,
            written,
            secrets,
            warnings,
        } => {
            let mut out = format!(
                "\n{} {}\n",
                Icon::Success.colored(color, unicode),
                ColoredText::success(format!("Wrote {} variables to {}", written, file.display()))
                    .render(color)
            );
            if *secrets > 0 {
                let noun = if *secrets > 1 { "values" } else { "value" };
                out.push_str(&format!(
                    "{}\n",
                    ColoredText::warning(format!("  (includes {} secret {})", secrets, noun))
                        .render(color)
                ));
            }
            out.push_str(&render_warnings(warnings, color, unicode));
            out
        }
        EnvPullOutcome::OAuthMerged {
            file,
            count,
            created,
            warnings,
        } => {
            let mut out = String::new();
            if *created {
                out.push_str(&format!(
                    "{}\n",
                    ColoredText::warning(format!(
                        "No {} file found. Created it with OAuth variables only; run a full env:pull for all variables.",
                        file.display()
                    ))
                    .render(color)
                ));
            }
            out.push_str(&format!(
                "\n{} {}\n",
                Icon::Success.colored(color, unicode),
                ColoredText::success(format!(
                    "Updated {} OAuth token(s) in {}",
                    count,
                    file.display()
                ))
                .render(color)
            ));
            out.push_str(&render_warnings(warnings, color, unicode));
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn created_summary_masks_secrets() {
        let var = NewGlobalVariable {
            key: "TOKEN".into(),
            production_value: "abc".into(),
            is_secret: true,
            staging_value: Some("def".into()),
            staging_source: Some(StagingSource::Value),
            dev_source: Some(DevSource::InheritStaging),
            ..Default::default()
        };
        assert_eq!(
            render_variable_created(&var, false),
            "Global secret \"TOKEN\" created successfully!\n  Production: ********\n  Staging: ********\n  Dev: (inherits from staging)\n"
        );
    }

    #[test]
    fn created_summary_plain_values() {
        let var = NewGlobalVariable {
            key: "URL".into(),
            production_value: "https://x".into(),
            staging_source: Some(StagingSource::InheritProduction),
            ..Default::default()
        };
        assert_eq!(
            render_variable_created(&var, false),
            "Global variable \"URL\" created successfully!\n  Production: https://x\n  Staging: (inherits from production)\n"
        );
    }

    #[test]
    fn written_summary_with_secrets_and_warnings() {
        let out = render_env_pull(
            &EnvPullOutcome::Written {
                file: PathBuf::from(".env.staging"),
                written: 3,
                secrets: 2,
                warnings: vec![OAuthWarning {
                    key: "GH_TOKEN".into(),
                    message: "connection expired".into(),
                }],
            },
            false,
            false,
        );
        assert_eq!(
            out,
            "\n[OK] Wrote 3 variables to .env.staging\n  (includes 2 secret values)\n  [WARN] GH_TOKEN: connection expired\n"
        );
    }

    #[test]
    fn oauth_merge_into_new_file_says_so() {
        let out = render_env_pull(
            &EnvPullOutcome::OAuthMerged {
                file: PathBuf::from(".env"),
                count: 1,
                created: true,
                warnings: vec![],
            },
            false,
            false,
        );
        assert!(out.starts_with("No .env file found."));
        assert!(out.ends_with("[OK] Updated 1 OAuth token(s) in .env\n"));
    }
}
