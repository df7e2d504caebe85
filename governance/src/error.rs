//! Governance error types

use eden_core::{AccountName, Asset, CoreError, ErrorCategory, Symbol};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GovernanceError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Election nr overflow")]
    RoundOverflow,

    #[error("No election round has been started")]
    NoActiveRound,

    #[error("Already voted: {submitter} in round {round}")]
    AlreadyVoted { submitter: AccountName, round: u64 },

    #[error("Too small group: {size} accounts, minimum {min}")]
    GroupTooSmall { size: usize, min: usize },

    #[error("Too big group: {size} accounts, maximum {max}")]
    GroupTooLarge { size: usize, max: usize },

    #[error("Account does not exist: {0}")]
    AccountNotFound(AccountName),

    #[error("Reward pool must be denominated in {expected}, got {found}")]
    WrongPoolSymbol { expected: Symbol, found: Symbol },

    #[error("Invalid reward pool: {0}")]
    InvalidPool(Asset),
}

impl GovernanceError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            GovernanceError::Core(e) => e.category(),
            GovernanceError::RoundOverflow => ErrorCategory::Capacity,
            GovernanceError::NoActiveRound | GovernanceError::AccountNotFound(_) => {
                ErrorCategory::NotFound
            }
            GovernanceError::AlreadyVoted { .. } => ErrorCategory::StateConflict,
            GovernanceError::GroupTooSmall { .. }
            | GovernanceError::GroupTooLarge { .. }
            | GovernanceError::WrongPoolSymbol { .. }
            | GovernanceError::InvalidPool(_) => ErrorCategory::Validation,
        }
    }
}

pub type Result<T> = std::result::Result<T, GovernanceError>;
