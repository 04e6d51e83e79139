use thiserror::Error;

use pitchboard_types::models::ParseVoteTypeError;

/// Failures surfaced by ledger operations.
///
/// `Validation` and `NotFound` are caller faults. `Storage` wraps anything the
/// database layer reports and is never retried here.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

impl LedgerError {
    pub fn idea_not_found() -> Self {
        Self::NotFound("Idea not found".to_string())
    }
}

impl From<ParseVoteTypeError> for LedgerError {
    fn from(e: ParseVoteTypeError) -> Self {
        Self::Validation(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LedgerError>;
