//! `env:create`, `env:list`, `env:delete`, `env:map` and `env:pull`

use anyhow::Result;

use solidactions::application::{
    new_global_variable, DeleteOutcome, DeleteTarget, EnvPullOptions, EnvPullOutcome,
    EnvPullUseCase, OAuthWarning, TierSources, VariablesUseCase,
};
use solidactions::domain::entities::{GlobalVariable, ProjectVariableMapping};
use solidactions::Tier;

use crate::ui::context::UiContext;
use crate::ui::primitives::text::ColoredText;
use crate::ui::views::env::{render_env_pull, render_variable_created};
use crate::ui::views::variables::{render_global_variables, render_project_mappings};

pub struct EnvCreateArgs<'a> {
    pub key: &'a str,
    pub value: &'a str,
    pub secret: bool,
    pub sources: TierSources,
}

pub fn cmd_env_create(args: EnvCreateArgs<'_>, ui: &UiContext) -> Result<()> {
    let body = new_global_variable(args.key, args.value, args.secret, &args.sources)?;
    let api = super::platform_api()?;
    super::announce(ui, format!("Creating global variable \"{}\"...", body.key));

    let confirmer = super::confirmer(false);
    VariablesUseCase::new(&api, confirmer.as_ref()).create(&body)?;

    if ui.json {
        return super::emit(serde_json::json!({
            "event": "complete",
            "command": "env:create",
            "key": body.key,
            "is_secret": body.is_secret,
        }));
    }
    print!("{}", render_variable_created(&body, ui.color));
    Ok(())
}

fn masked_globals(variables: &[GlobalVariable]) -> Vec<GlobalVariable> {
    variables
        .iter()
        .cloned()
        .map(|mut v| {
            if v.is_secret {
                v.production_value = None;
                v.staging_value = None;
                v.dev_value = None;
            }
            v
        })
        .collect()
}

fn masked_mappings(mappings: &[ProjectVariableMapping]) -> Vec<ProjectVariableMapping> {
    mappings
        .iter()
        .cloned()
        .map(|mut m| {
            if m.is_secret {
                m.value = None;
                m.resolved_value = None;
            }
            m
        })
        .collect()
}

pub fn cmd_env_list(project: Option<&str>, tier: Option<Tier>, ui: &UiContext) -> Result<()> {
    let api = super::platform_api()?;
    let confirmer = super::confirmer(false);
    let use_case = VariablesUseCase::new(&api, confirmer.as_ref());

    match project {
        Some(project) => {
            let tier = tier.unwrap_or_default();
            let mappings = use_case.list_project(project, tier)?;
            if ui.json {
                return super::emit(serde_json::json!({
                    "event": "variables",
                    "project": project,
                    "env": tier.as_str(),
                    "mappings": masked_mappings(&mappings),
                }));
            }
            print!("{}", render_project_mappings(project, tier, &mappings, ui.color));
        }
        None => {
            let variables = use_case.list_global()?;
            if ui.json {
                return super::emit(serde_json::json!({
                    "event": "variables",
                    "env": tier.map(|t| t.as_str()),
                    "variables": masked_globals(&variables),
                }));
            }
            print!("{}", render_global_variables(&variables, tier, ui.color));
        }
    }
    Ok(())
}

pub fn cmd_env_delete(first: &str, second: Option<&str>, yes: bool, ui: &UiContext) -> Result<()> {
    let target = DeleteTarget::from_args(first, second);
    let api = super::platform_api()?;
    match &target {
        DeleteTarget::Global { key } => {
            super::announce(ui, format!("Deleting global variable \"{}\"...", key))
        }
        DeleteTarget::Mapping { project, key } => super::announce(
            ui,
            format!("Deleting variable mapping \"{}\" from project \"{}\"...", key, project),
        ),
    }

    let confirmer = super::confirmer(yes);
    let outcome = VariablesUseCase::new(&api, confirmer.as_ref()).delete(&target)?;

    if ui.json {
        let result = match outcome {
            DeleteOutcome::Deleted => "deleted",
            DeleteOutcome::Cleared => "cleared",
            DeleteOutcome::Cancelled => "cancelled",
        };
        return super::emit(serde_json::json!({
            "event": "complete",
            "command": "env:delete",
            "key": target.key(),
            "result": result,
        }));
    }

    let c = ui.color;
    let message = match (&target, outcome) {
        (_, DeleteOutcome::Cancelled) => ColoredText::dim("Cancelled."),
        (DeleteTarget::Global { key }, _) => {
            ColoredText::success(format!("Global variable \"{}\" deleted successfully.", key))
        }
        (DeleteTarget::Mapping { key, .. }, DeleteOutcome::Cleared) => {
            ColoredText::success(format!("Variable mapping \"{}\" cleared successfully.", key))
        }
        (DeleteTarget::Mapping { key, .. }, DeleteOutcome::Deleted) => {
            ColoredText::success(format!("Variable mapping \"{}\" deleted successfully.", key))
        }
    };
    println!("{}", message.render(c));
    Ok(())
}

pub fn cmd_env_map(project: &str, key: &str, global_key: &str, ui: &UiContext) -> Result<()> {
    let api = super::platform_api()?;
    super::announce(
        ui,
        format!(
            "Mapping global variable \"{}\" to project key \"{}\" in \"{}\"...",
            global_key, key, project
        ),
    );

    let confirmer = super::confirmer(false);
    VariablesUseCase::new(&api, confirmer.as_ref()).map(project, key, global_key)?;

    if ui.json {
        return super::emit(serde_json::json!({
            "event": "complete",
            "command": "env:map",
            "project": project,
            "key": key,
            "global_key": global_key,
        }));
    }

    let c = ui.color;
    println!("{}", ColoredText::success("Variable mapping created!").render(c));
    println!(
        "{}",
        ColoredText::dim(format!("  {} -> {} (in {})", global_key, key, project)).render(c)
    );
    Ok(())
}

pub fn cmd_env_pull(options: EnvPullOptions, ui: &UiContext) -> Result<()> {
    let api = super::platform_api()?;
    super::announce(
        ui,
        format!(
            "Pulling environment variables from \"{}\" ({})...",
            options.project, options.tier
        ),
    );

    let confirmer = super::confirmer(options.yes);
    let outcome = EnvPullUseCase::new(&api, confirmer.as_ref()).execute(&options)?;

    if ui.json {
        return super::emit(pull_event(&outcome));
    }
    print!("{}", render_env_pull(&outcome, ui.color, ui.unicode));
    Ok(())
}

fn warnings(warnings: &[OAuthWarning]) -> Vec<serde_json::Value> {
    warnings
        .iter()
        .map(|w| serde_json::json!({"key": w.key, "message": w.message}))
        .collect()
}

fn pull_event(outcome: &EnvPullOutcome) -> serde_json::Value {
    match outcome {
        EnvPullOutcome::NoVariables => serde_json::json!({
            "event": "complete", "command": "env:pull", "result": "no_variables",
        }),
        EnvPullOutcome::Cancelled => serde_json::json!({
            "event": "complete", "command": "env:pull", "result": "cancelled",
        }),
        EnvPullOutcome::NoOAuthVariables => serde_json::json!({
            "event": "complete", "command": "env:pull", "result": "no_oauth_variables",
        }),
        EnvPullOutcome::Written {
            file,
            written,
            secrets,
            warnings: w,
        } => serde_json::json!({
            "event": "complete",
            "command": "env:pull",
            "result": "written",
            "file": file.display().to_string(),
            "written": written,
            "secrets": secrets,
            "warnings": warnings(w),
        }),
        EnvPullOutcome::OAuthMerged {
            file,
            count,
            created,
            warnings: w,
        } => serde_json::json!({
            "event": "complete",
            "command": "env:pull",
            "result": "oauth_merged",
            "file": file.display().to_string(),
            "count": count,
            "created": created,
            "warnings": warnings(w),
        }),
    }
}
