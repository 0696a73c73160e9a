//! Confirmation prompt port

use crate::error::SolidResult;

pub trait Confirmer {
    /// Ask a yes/no question. Defaults to "no".
    fn confirm(&self, question: &str) -> SolidResult<bool>;
}

/// Answers every question with a fixed value (`--yes`, tests)
#[derive(Debug, Clone, Copy)]
pub struct FixedAnswer(pub bool);

impl Confirmer for FixedAnswer {
    fn confirm(&self, _question: &str) -> SolidResult<bool> {
        Ok(self.0)
    }
}
