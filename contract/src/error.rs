//! Contract error types

use crate::config::ConfigError;
use eden_core::{CoreError, ErrorCategory};
use eden_economics::RewardError;
use eden_governance::GovernanceError;
use eden_ledger::LedgerError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Governance(#[from] GovernanceError),

    #[error(transparent)]
    Reward(#[from] RewardError),

    #[error("Reward configuration has not been initialized")]
    RewardConfigMissing,

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl ContractError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ContractError::Core(err) => err.category(),
            ContractError::Ledger(err) => err.category(),
            ContractError::Governance(err) => err.category(),
            ContractError::Reward(err) => err.category(),
            ContractError::RewardConfigMissing => ErrorCategory::NotFound,
            ContractError::Config(_) => ErrorCategory::Validation,
        }
    }
}

pub type Result<T> = std::result::Result<T, ContractError>;
