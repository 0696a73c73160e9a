//! Home directory resolution with test isolation support.
//!
//! `dirs::home_dir()` ignores `HOME` on Windows, so integration tests cannot
//! redirect it. `solidactions_home_dir()` checks `SOLIDACTIONS_TEST_HOME`
//! first and only then asks the system.

use std::path::PathBuf;

/// Environment variable for test isolation of the home directory.
pub const SOLIDACTIONS_TEST_HOME_VAR: &str = "SOLIDACTIONS_TEST_HOME";

/// Home directory used for `~/.solidactions`.
pub fn solidactions_home_dir() -> Option<PathBuf> {
    home_dir_from(std::env::var(SOLIDACTIONS_TEST_HOME_VAR).ok())
}

fn home_dir_from(test_home: Option<String>) -> Option<PathBuf> {
    test_home
        .filter(|h| !h.is_empty())
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
}
