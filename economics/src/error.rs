//! Reward engine error types

use eden_core::{AccountName, Asset, ErrorCategory};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RewardError {
    #[error("Number of groups is too small: {count}, minimum {min}")]
    TooFewGroups { count: usize, min: usize },

    #[error("Group {group} size too small: {size} accounts, minimum {min}")]
    GroupTooSmall { group: usize, size: usize, min: usize },

    #[error("Group {group} size too large: {size} accounts, maximum {max}")]
    GroupTooLarge { group: usize, size: usize, max: usize },

    #[error("Account {0} listed more than once")]
    DuplicateAccount(AccountName),

    #[error("Account {0} does not exist")]
    AccountNotFound(AccountName),

    #[error("Configured pool {pool} is too small to pay tier {tier}")]
    PoolTooSmall { pool: Asset, tier: usize },

    #[error("Rank index {rank_index} outside the reward tiers")]
    TierOutOfRange { rank_index: usize },

    #[error("Primary reward for Fibonacci index {index} does not fit an asset amount")]
    CreditOverflow { index: usize },
}

impl RewardError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            RewardError::TooFewGroups { .. }
            | RewardError::GroupTooSmall { .. }
            | RewardError::GroupTooLarge { .. }
            | RewardError::DuplicateAccount(_) => ErrorCategory::Validation,
            RewardError::AccountNotFound(_) => ErrorCategory::NotFound,
            RewardError::PoolTooSmall { .. }
            | RewardError::TierOutOfRange { .. }
            | RewardError::CreditOverflow { .. } => ErrorCategory::Computation,
        }
    }
}

pub type Result<T> = std::result::Result<T, RewardError>;
