//! Events emitted by ledger actions

use eden_core::{AccountName, Asset, Symbol};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LedgerEvent {
    SymbolCreated {
        issuer: AccountName,
        max_supply: Asset,
    },
    Issued {
        to: AccountName,
        quantity: Asset,
        memo: String,
    },
    Retired {
        issuer: AccountName,
        quantity: Asset,
        memo: String,
    },
    Transferred {
        from: AccountName,
        to: AccountName,
        quantity: Asset,
        memo: String,
        payer: AccountName,
    },
    AccountOpened {
        owner: AccountName,
        symbol: Symbol,
        payer: AccountName,
    },
    AccountClosed {
        owner: AccountName,
        symbol: Symbol,
    },
}

impl LedgerEvent {
    /// Accounts that receive a notification of this event
    pub fn notified(&self) -> Vec<&AccountName> {
        match self {
            LedgerEvent::Transferred { from, to, .. } => vec![from, to],
            _ => Vec::new(),
        }
    }
}
