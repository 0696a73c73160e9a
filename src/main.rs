//! SolidActions CLI - deploy and manage workflow automation
//!
//! Usage: solidactions <COMMAND>
//!
//! Commands:
//!   deploy     Bundle a project, upload it and follow the build
//!   run        Trigger a workflow, optionally waiting for it
//!   logs       Show or follow a run's logs
//!   env:*      Manage global variables and project mappings
//!   schedule:* Manage cron schedules

mod cli;
mod commands;
mod ui;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use solidactions::application::{EnvPullOptions, TierSources};

use crate::cli::{Cli, Commands};
use crate::commands::env::EnvCreateArgs;
use crate::ui::context::UiContext;

/// `-v` info, `-vv` debug, `-vvv` trace; `RUST_LOG` wins when set.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("solidactions={}", level)));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn dispatch(command: Commands, ui: &UiContext) -> anyhow::Result<()> {
    match command {
        Commands::Init { api_key, dev, host } => {
            commands::auth::cmd_init(&api_key, dev, host.as_deref(), ui)
        }
        Commands::Logout => commands::auth::cmd_logout(ui),
        Commands::Whoami => commands::auth::cmd_whoami(ui),
        Commands::Deploy {
            project,
            path,
            env,
            create,
        } => commands::deploy::cmd_deploy(&project, &path, env, create, ui),
        Commands::Pull { project, path } => commands::pull::cmd_pull(&project, &path, ui),
        Commands::Run {
            project,
            workflow,
            env,
            input,
            wait,
        } => commands::run::cmd_run(&project, &workflow, env, input.as_deref(), wait, ui),
        Commands::Runs { project, limit } => commands::run::cmd_runs(project.as_deref(), limit, ui),
        Commands::Logs { run_id, follow } => commands::run::cmd_logs(&run_id, follow, ui),
        Commands::LogsBuild { project } => commands::run::cmd_logs_build(&project, ui),
        Commands::EnvCreate {
            key,
            value,
            secret,
            staging_value,
            dev_value,
            staging_inherit,
            dev_inherit,
            dev_inherit_staging,
        } => commands::env::cmd_env_create(
            EnvCreateArgs {
                key: &key,
                value: &value,
                secret,
                sources: TierSources {
                    staging_value,
                    staging_inherit,
                    dev_value,
                    dev_inherit,
                    dev_inherit_staging,
                },
            },
            ui,
        ),
        Commands::EnvList { project, env } => {
            commands::env::cmd_env_list(project.as_deref(), env, ui)
        }
        Commands::EnvDelete {
            key_or_project,
            key,
            yes,
        } => commands::env::cmd_env_delete(&key_or_project, key.as_deref(), yes, ui),
        Commands::EnvMap {
            project,
            key,
            global_key,
        } => commands::env::cmd_env_map(&project, &key, &global_key, ui),
        Commands::EnvPull {
            project,
            env,
            output,
            yes,
            update_oauth,
        } => {
            let options = EnvPullOptions::new(project, env, std::env::current_dir()?)
                .with_output(output)
                .with_yes(yes)
                .with_update_oauth(update_oauth);
            commands::env::cmd_env_pull(options, ui)
        }
        Commands::ScheduleSet {
            project,
            cron,
            workflow,
            input,
        } => commands::schedule::cmd_schedule_set(
            &project,
            &cron,
            workflow.as_deref(),
            input.as_deref(),
            ui,
        ),
        Commands::ScheduleList { project } => commands::schedule::cmd_schedule_list(&project, ui),
        Commands::ScheduleDelete {
            project,
            schedule_id,
            yes,
        } => commands::schedule::cmd_schedule_delete(&project, &schedule_id, yes, ui),
        Commands::Webhooks {
            project,
            env,
            show_secrets,
        } => commands::webhooks::cmd_webhooks(&project, env, show_secrets, ui),
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let ui = UiContext::new(cli.json, cli.verbose);
    if let Err(err) = dispatch(cli.command, &ui) {
        ui::error::print_error(&err, ui.json);
        std::process::exit(1);
    }
}
