//! Core error types and the error categories every crate reports

use crate::account::AccountName;
use crate::asset::Symbol;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Coarse classification of a failed action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCategory {
    /// Missing required signer or capability
    Authorization,
    /// Malformed input: symbol, amount, memo, group size
    Validation,
    /// Unknown account or missing record
    NotFound,
    /// Duplicate creation or vote, closing a funded row
    StateConflict,
    /// Ceilings, overdrafts and counter overflow
    Capacity,
    /// Reward arithmetic that cannot produce a payable amount
    Computation,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorCategory::Authorization => "authorization",
            ErrorCategory::Validation => "validation",
            ErrorCategory::NotFound => "not-found",
            ErrorCategory::StateConflict => "state-conflict",
            ErrorCategory::Capacity => "capacity",
            ErrorCategory::Computation => "computation",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Invalid account name: {0}")]
    InvalidName(String),

    #[error("Invalid symbol: {0}")]
    InvalidSymbol(String),

    #[error("Invalid asset: {0}")]
    InvalidAsset(String),

    #[error("Symbol mismatch: expected {expected}, found {found}")]
    SymbolMismatch { expected: Symbol, found: Symbol },

    #[error("Asset amount overflow")]
    AmountOverflow,

    #[error("Missing required authority of {0}")]
    MissingAuthority(AccountName),

    #[error("Missing required authority of admin account")]
    MissingAdminAuthority,
}

impl CoreError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CoreError::InvalidName(_)
            | CoreError::InvalidSymbol(_)
            | CoreError::InvalidAsset(_)
            | CoreError::SymbolMismatch { .. } => ErrorCategory::Validation,
            CoreError::AmountOverflow => ErrorCategory::Capacity,
            CoreError::MissingAuthority(_) | CoreError::MissingAdminAuthority => {
                ErrorCategory::Authorization
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
