//! File system helpers

mod atomic;
mod home;

pub use atomic::{set_mode, write_atomic};
pub use home::{solidactions_home_dir, SOLIDACTIONS_TEST_HOME_VAR};
