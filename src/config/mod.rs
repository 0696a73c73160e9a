//! Client configuration
//!
//! Resolution order for each field:
//! 1. Environment variables (`SOLIDACTIONS_HOST`, `SOLIDACTIONS_API_KEY`)
//! 2. `~/.solidactions/config.json` (written by `init`)
//! 3. Built-in default host

mod loader;
mod types;

pub use loader::{
    clear, clear_at, config_path, load, load_from, load_required, save, save_to,
    with_env_overrides, API_KEY_ENV_VAR, CONFIG_DIR_NAME, CONFIG_FILE_NAME, HOST_ENV_VAR,
};
pub use types::{mask_api_key, select_host, ClientConfig, DEFAULT_HOST, DEV_HOST};
