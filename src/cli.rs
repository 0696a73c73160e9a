use std::path::PathBuf;

use clap::{Parser, Subcommand};
use solidactions::Tier;

/// SolidActions CLI - Deploy and manage workflow automation
#[derive(Parser, Debug)]
#[command(name = "solidactions")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Emit NDJSON events instead of human-readable output
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize the CLI with your API key
    Init {
        /// Your SolidActions API key
        api_key: String,

        /// Use local development server (http://localhost:8000)
        #[arg(long)]
        dev: bool,

        /// Custom API host URL
        #[arg(long)]
        host: Option<String>,
    },

    /// Remove saved credentials
    Logout,

    /// Show current configuration
    Whoami,

    /// Deploy a project to SolidActions
    Deploy {
        /// Project name
        project: String,

        /// Source directory to deploy
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Target environment
        #[arg(short, long = "env", value_enum, ignore_case = true, default_value_t = Tier::Dev)]
        env: Tier,

        /// Create the environment project if it doesn't exist
        #[arg(long)]
        create: bool,
    },

    /// Pull project source from SolidActions
    Pull {
        /// Project name
        project: String,

        /// Destination directory
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Trigger a workflow run
    Run {
        /// Project name
        project: String,

        /// Workflow name
        workflow: String,

        /// Environment
        #[arg(short, long = "env", value_enum, ignore_case = true, default_value_t = Tier::Dev)]
        env: Tier,

        /// JSON input for the workflow
        #[arg(short, long)]
        input: Option<String>,

        /// Wait for the workflow to complete
        #[arg(short, long)]
        wait: bool,
    },

    /// List recent workflow runs
    Runs {
        /// Filter by project name
        project: Option<String>,

        /// Number of runs to show
        #[arg(short, long, default_value_t = solidactions::application::DEFAULT_RUN_LIMIT)]
        limit: u32,
    },

    /// View logs for a workflow run
    Logs {
        /// Run ID
        run_id: String,

        /// Follow log output (tail -f style)
        #[arg(short, long)]
        follow: bool,
    },

    /// View build/deployment logs for a project
    #[command(name = "logs:build")]
    LogsBuild {
        /// Project name
        project: String,
    },

    /// Create a global environment variable
    #[command(name = "env:create")]
    EnvCreate {
        /// Variable name
        key: String,

        /// Production value
        value: String,

        /// Mark as encrypted secret
        #[arg(short, long)]
        secret: bool,

        /// Staging environment value
        #[arg(long, conflicts_with = "staging_inherit")]
        staging_value: Option<String>,

        /// Dev environment value
        #[arg(long)]
        dev_value: Option<String>,

        /// Staging inherits from production
        #[arg(long)]
        staging_inherit: bool,

        /// Dev inherits from production
        #[arg(long)]
        dev_inherit: bool,

        /// Dev inherits from staging
        #[arg(long)]
        dev_inherit_staging: bool,
    },

    /// List environment variables
    #[command(name = "env:list")]
    EnvList {
        /// Project name (omit for global variables)
        project: Option<String>,

        /// Environment (filters the global list; selects the project's tier)
        #[arg(short, long = "env", value_enum, ignore_case = true)]
        env: Option<Tier>,
    },

    /// Delete an environment variable
    #[command(name = "env:delete")]
    EnvDelete {
        /// Variable key (global) or project name
        key_or_project: String,

        /// Variable key (if first arg is project)
        key: Option<String>,

        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Map a global variable to a project-specific key
    #[command(name = "env:map")]
    EnvMap {
        /// Project name
        project: String,

        /// Project-specific variable name
        key: String,

        /// Global variable name to map from
        global_key: String,
    },

    /// Pull resolved environment variables to a local file
    #[command(name = "env:pull")]
    EnvPull {
        /// Project name
        project: String,

        /// Environment
        #[arg(short, long = "env", value_enum, ignore_case = true, default_value_t = Tier::Dev)]
        env: Tier,

        /// Output file path (defaults to .env or .env.{environment})
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Skip confirmation for secrets
        #[arg(short, long)]
        yes: bool,

        /// Only pull OAuth tokens and merge into existing .env file
        #[arg(long)]
        update_oauth: bool,
    },

    /// Set a cron schedule for a workflow
    #[command(name = "schedule:set")]
    ScheduleSet {
        /// Project name
        project: String,

        /// Cron expression (e.g., "0 9 * * *" for daily at 9am)
        cron: String,

        /// Workflow name (if project has multiple)
        #[arg(short, long)]
        workflow: Option<String>,

        /// JSON input to pass to scheduled runs
        #[arg(short, long)]
        input: Option<String>,
    },

    /// List schedules for a project
    #[command(name = "schedule:list")]
    ScheduleList {
        /// Project name
        project: String,
    },

    /// Delete a schedule
    #[command(name = "schedule:delete")]
    ScheduleDelete {
        /// Project name
        project: String,

        /// Schedule ID
        schedule_id: String,

        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// List webhook URLs for a project
    Webhooks {
        /// Project name
        project: String,

        /// Environment
        #[arg(short, long = "env", value_enum, ignore_case = true, default_value_t = Tier::Production)]
        env: Tier,

        /// Show webhook secrets
        #[arg(long)]
        show_secrets: bool,
    },
}
