//! Loading and saving `~/.solidactions/config.json`

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tracing::debug;

use super::types::{ClientConfig, StoredConfig};
use crate::error::{SolidError, SolidResult};
use crate::infrastructure::fs::{set_mode, solidactions_home_dir, write_atomic};

pub const CONFIG_DIR_NAME: &str = ".solidactions";
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Overrides the stored host
pub const HOST_ENV_VAR: &str = "SOLIDACTIONS_HOST";
/// Overrides the stored API key
pub const API_KEY_ENV_VAR: &str = "SOLIDACTIONS_API_KEY";

/// Location of the config file, `None` when no home directory is known.
pub fn config_path() -> Option<PathBuf> {
    solidactions_home_dir().map(|home| home.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

fn require_path() -> SolidResult<PathBuf> {
    config_path().ok_or_else(|| SolidError::Config {
        path: PathBuf::from("~").join(CONFIG_DIR_NAME),
        message: "could not determine home directory".to_string(),
    })
}

/// Read a config file. A missing file is `Ok(None)`.
pub fn load_from(path: &Path) -> SolidResult<Option<ClientConfig>> {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let stored: StoredConfig = serde_json::from_str(&content).map_err(|e| SolidError::Config {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    Ok(stored.into_config())
}

/// Apply `SOLIDACTIONS_HOST` / `SOLIDACTIONS_API_KEY` on top of a stored config.
pub fn with_env_overrides(
    stored: Option<ClientConfig>,
    host: Option<String>,
    api_key: Option<String>,
) -> Option<ClientConfig> {
    let host = host.filter(|h| !h.is_empty());
    let api_key = api_key.filter(|k| !k.is_empty());

    let mut config = match (stored, &api_key) {
        (Some(config), _) => config,
        (None, Some(key)) => ClientConfig::new(super::DEFAULT_HOST, key.clone()),
        (None, None) => return None,
    };
    if let Some(key) = api_key {
        config.api_key = key;
    }
    if let Some(host) = host {
        config.host = host;
    }
    Some(config)
}

/// Load the effective configuration for this invocation.
pub fn load() -> SolidResult<Option<ClientConfig>> {
    let stored = match config_path() {
        Some(path) => load_from(&path)?,
        None => None,
    };
    Ok(with_env_overrides(
        stored,
        std::env::var(HOST_ENV_VAR).ok(),
        std::env::var(API_KEY_ENV_VAR).ok(),
    ))
}

/// Load and fail with `NotInitialized` when nothing is configured.
pub fn load_required() -> SolidResult<ClientConfig> {
    load()?.ok_or(SolidError::NotInitialized)
}

fn lock(dir: &Path) -> SolidResult<File> {
    let lock_file = OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .open(dir.join(".lock"))?;
    lock_file.lock_exclusive()?;
    Ok(lock_file)
}

/// Persist `config` at `path` (directory 0700, file 0600 on Unix).
pub fn save_to(path: &Path, config: &ClientConfig) -> SolidResult<()> {
    let dir = path.parent().ok_or_else(|| SolidError::Config {
        path: path.to_path_buf(),
        message: "config path has no parent directory".to_string(),
    })?;
    fs::create_dir_all(dir)?;
    set_mode(dir, 0o700)?;

    let lock_file = lock(dir)?;
    let content = serde_json::to_string_pretty(config)?;
    let result = write_atomic(path, content.as_bytes()).and_then(|_| set_mode(path, 0o600));
    let _ = FileExt::unlock(&lock_file);

    debug!(path = %path.display(), "saved client config");
    result
}

/// Persist to the default location and return the path written.
pub fn save(config: &ClientConfig) -> SolidResult<PathBuf> {
    let path = require_path()?;
    save_to(&path, config)?;
    Ok(path)
}

/// Remove the config file. Returns whether one existed.
pub fn clear_at(path: &Path) -> SolidResult<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}

pub fn clear() -> SolidResult<bool> {
    clear_at(&require_path()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME);
        let config = ClientConfig::new("http://localhost:8000", "sa_key");

        save_to(&path, &config).unwrap();
        assert_eq!(load_from(&path).unwrap(), Some(config));
    }

    #[cfg(unix)]
    #[test]
    fn saved_file_is_private() {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME);
        save_to(&path, &ClientConfig::new("h", "k")).unwrap();

        let file_mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        let dir_mode = fs::metadata(path.parent().unwrap())
            .unwrap()
            .permissions()
            .mode()
            & 0o777;
        assert_eq!(file_mode, 0o600);
        assert_eq!(dir_mode, 0o700);
    }

    #[test]
    fn missing_file_is_none() {
        let dir = tempdir().unwrap();
        assert_eq!(load_from(&dir.path().join("nope.json")).unwrap(), None);
    }

    #[test]
    fn malformed_file_is_config_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{not json").unwrap();
        assert!(matches!(
            load_from(&path),
            Err(SolidError::Config { .. })
        ));
    }

    #[test]
    fn env_overrides() {
        let stored = Some(ClientConfig::new("http://stored", "stored_key"));
        let config = with_env_overrides(stored.clone(), Some("http://env".into()), None).unwrap();
        assert_eq!(config, ClientConfig::new("http://env", "stored_key"));

        let config = with_env_overrides(None, None, Some("env_key".into())).unwrap();
        assert_eq!(config, ClientConfig::new(super::super::DEFAULT_HOST, "env_key"));

        assert_eq!(with_env_overrides(None, Some("http://env".into()), None), None);
        assert_eq!(with_env_overrides(stored.clone(), Some(String::new()), None), stored);
    }

    #[test]
    fn clear_reports_whether_file_existed() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{}").unwrap();
        assert!(clear_at(&path).unwrap());
        assert!(!clear_at(&path).unwrap());
    }
}
