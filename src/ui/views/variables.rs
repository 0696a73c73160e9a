use solidactions::domain::entities::{GlobalVariable, MappingSource, ProjectVariableMapping};
use solidactions::domain::services::env_resolver::{resolve, ResolvedValue};
use solidactions::Tier;

use crate::ui::format::{pad, plural, truncate};
use crate::ui::primitives::text::ColoredText;
use crate::ui::theme::{SECRET_MASK, SECRET_MASK_SHORT};

/// One tier cell: masked, inherited marker, placeholder or the first 18 chars.
fn tier_cell(resolved: ResolvedValue<'_>, is_secret: bool, width: usize, color: bool) -> String {
    if is_secret {
        return ColoredText::warning(pad(SECRET_MASK_SHORT, width)).render(color);
    }
    match (resolved.value, resolved.inherited) {
        (None, true) => ColoredText::dim(pad("(inherited)", width)).render(color),
        (None, false) => ColoredText::dim(pad("-", width)).render(color),
        (Some(value), true) => {
            ColoredText::dim(pad(&format!("{} (inh)", truncate(value, 18)), width)).render(color)
        }
        (Some(value), false) => pad(&truncate(value, 18), width),
    }
}

fn type_cell(is_secret: bool, color: bool) -> String {
    if is_secret {
        ColoredText::warning("secret").render(color)
    } else {
        ColoredText::dim("plain").render(color)
    }
}

/// Global variables, either one column per tier or filtered to one tier.
pub fn render_global_variables(variables: &[GlobalVariable], tier: Option<Tier>, color: bool) -> String {
    let mut out = format!(
        "{}\n",
        ColoredText::info("Global environment variables:").render(color)
    );
    if variables.is_empty() {
        out.push_str(&format!(
            "{}\n",
            ColoredText::dim("No global variables found.").render(color)
        ));
        return out;
    }

    out.push('\n');
    match tier {
        Some(tier) => {
            out.push_str(&format!(
                "{}\n{}\n",
                ColoredText::dim(format!("{}{}TYPE", pad("KEY", 30), pad("VALUE", 40))).render(color),
                ColoredText::dim("-".repeat(80)).render(color)
            ));
            for var in variables {
                out.push_str(&format!(
                    "{}{}{}\n",
                    pad(&var.key, 30),
                    tier_cell(resolve(var, tier), var.is_secret, 40, color),
                    type_cell(var.is_secret, color)
                ));
            }
        }
        None => {
            out.push_str(&format!(
                "{}{}{}{}{}\n{}\n",
                ColoredText::dim(pad("KEY", 24)).render(color),
                ColoredText::success(pad("PRODUCTION", 20)).render(color),
                ColoredText::warning(pad("STAGING", 20)).render(color),
                ColoredText::info(pad("DEV", 20)).render(color),
                ColoredText::dim("TYPE").render(color),
                ColoredText::dim("-".repeat(100)).render(color)
            ));
            for var in variables {
                out.push_str(&format!(
                    "{}{}{}{}{}\n",
                    pad(&truncate(&var.key, 22), 24),
                    tier_cell(resolve(var, Tier::Production), var.is_secret, 20, color),
                    tier_cell(resolve(var, Tier::Staging), var.is_secret, 20, color),
                    tier_cell(resolve(var, Tier::Dev), var.is_secret, 20, color),
                    type_cell(var.is_secret, color)
                ));
            }
        }
    }

    out.push('\n');
    out.push_str(&format!(
        "{}\n",
        ColoredText::dim(plural(variables.len(), "variable")).render(color)
    ));
    if tier.is_none() {
        out.push_str(&format!(
            "{}\n",
            ColoredText::dim("Use --env <production|staging|dev> to filter by environment").render(color)
        ));
    }
    out
}

/// Variable mappings of one project in one tier.
pub fn render_project_mappings(
    project: &str,
    tier: Tier,
    mappings: &[ProjectVariableMapping],
    color: bool,
) -> String {
    let mut out = format!(
        "{}\n",
        ColoredText::info(format!(
            "Environment variables for project \"{}\" ({}):",
            project, tier
        ))
        .render(color)
    );
    if mappings.is_empty() {
        out.push_str(&format!(
            "{}\n",
            ColoredText::dim("No variable mappings found.").render(color)
        ));
        return out;
    }

    out.push_str(&format!(
        "\n{}\n{}\n",
        ColoredText::dim(format!(
            "{}{}{}GLOBAL KEY",
            pad("KEY", 30),
            pad("VALUE", 30),
            pad("SOURCE", 12)
        ))
        .render(color),
        ColoredText::dim("-".repeat(100)).render(color)
    ));

    for mapping in mappings {
        let value = if mapping.is_secret {
            ColoredText::warning(pad(SECRET_MASK, 30)).render(color)
        } else {
            pad(&truncate(mapping.value.as_deref().unwrap_or("-"), 28), 30)
        };
        let source = pad(mapping.source.as_str(), 12);
        let source = match mapping.source {
            MappingSource::Yaml => ColoredText::info(source),
            MappingSource::Override => ColoredText::warning(source),
            MappingSource::Manual => ColoredText::dim(source),
        };
        let global = match mapping.global_variable_key.as_deref() {
            Some(key) => key.to_string(),
            None => ColoredText::dim("(local)").render(color),
        };
        out.push_str(&format!(
            "{}{}{}{}\n",
            pad(&mapping.env_name, 30),
            value,
            source.render(color),
            global
        ));
    }

    out.push('\n');
    out.push_str(&format!(
        "{}\n",
        ColoredText::dim(plural(mappings.len(), "variable")).render(color)
    ));
    out
}
