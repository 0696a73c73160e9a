//! Terminal adapters for the confirmation and timer ports

use std::time::Duration;

use dialoguer::Confirm;

use crate::domain::ports::{Confirmer, Sleeper};
use crate::error::{SolidError, SolidResult};

/// Asks on the terminal, defaulting to "no"
pub struct DialoguerConfirmer;

impl Confirmer for DialoguerConfirmer {
    fn confirm(&self, question: &str) -> SolidResult<bool> {
        Confirm::new()
            .with_prompt(question)
            .default(false)
            .interact()
            .map_err(|e| SolidError::Io(std::io::Error::other(e.to_string())))
    }
}

/// Blocks the current thread
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}
