//! Errors raised by the budget engine.
//!
//! - [`InvalidInput`] a mutating call was given a malformed title or number;
//!   the call is rejected and nothing changes.
//! - [`PersistenceReadFailure`] a stored value could not be decoded at startup;
//!   the value falls back to its default.
//!
//!  [`InvalidInput`]: BudgetError::InvalidInput
//!  [`PersistenceReadFailure`]: BudgetError::PersistenceReadFailure
use thiserror::Error;

pub type Result<T> = std::result::Result<T, BudgetError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BudgetError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Stored \"{key}\" is unreadable: {reason}")]
    PersistenceReadFailure { key: &'static str, reason: String },
}

impl BudgetError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
