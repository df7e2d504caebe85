//! Ledger error types

use eden_core::{AccountName, Asset, CoreError, ErrorCategory, Symbol, SymbolCode};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Symbol precision mismatch: {0} is not a recognized symbol")]
    UnrecognizedSymbol(Symbol),

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(Asset),

    #[error("Quantity must be positive: {0}")]
    NonPositiveQuantity(Asset),

    #[error("Max-supply must be positive: {0}")]
    NonPositiveMaxSupply(Asset),

    #[error("Memo has more than 256 bytes: {0} bytes")]
    MemoTooLong(usize),

    #[error("Tokens can only be issued to the contract account, not {0}")]
    IssueToNonContract(AccountName),

    #[error("Cannot transfer {0}: only the contract distributes it")]
    NotTransferable(SymbolCode),

    #[error("Cannot transfer to self")]
    SelfTransfer,

    #[error("Account does not exist: {0}")]
    AccountNotFound(AccountName),

    #[error("Token with symbol already exists: {0}")]
    SymbolExists(SymbolCode),

    #[error("Token with symbol does not exist: {0}")]
    SupplyNotFound(SymbolCode),

    #[error("No balance object found for {owner} in {symbol}")]
    BalanceNotFound { owner: AccountName, symbol: SymbolCode },

    #[error("Specified owner {owner} already holds a {symbol} balance")]
    BalanceAlreadyOpen { owner: AccountName, symbol: SymbolCode },

    #[error("Cannot close {owner}: balance is not zero ({balance})")]
    NonZeroBalance { owner: AccountName, balance: Asset },

    #[error("Quantity exceeds available supply: requested {requested}, available {available}")]
    SupplyExceeded { requested: Asset, available: Asset },

    #[error("Overdrawn balance for {owner}: requested {requested}, available {available}")]
    Overdrawn {
        owner: AccountName,
        requested: Asset,
        available: Asset,
    },
}

impl LedgerError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            LedgerError::Core(e) => e.category(),
            LedgerError::UnrecognizedSymbol(_)
            | LedgerError::InvalidQuantity(_)
            | LedgerError::NonPositiveQuantity(_)
            | LedgerError::NonPositiveMaxSupply(_)
            | LedgerError::MemoTooLong(_)
            | LedgerError::IssueToNonContract(_)
            | LedgerError::SelfTransfer => ErrorCategory::Validation,
            LedgerError::NotTransferable(_) => ErrorCategory::Authorization,
            LedgerError::AccountNotFound(_)
            | LedgerError::SupplyNotFound(_)
            | LedgerError::BalanceNotFound { .. } => ErrorCategory::NotFound,
            LedgerError::SymbolExists(_)
            | LedgerError::BalanceAlreadyOpen { .. }
            | LedgerError::NonZeroBalance { .. } => ErrorCategory::StateConflict,
            LedgerError::SupplyExceeded { .. } | LedgerError::Overdrawn { .. } => {
                ErrorCategory::Capacity
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, LedgerError>;
