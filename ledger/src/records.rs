//! Persisted ledger rows

use eden_core::{AccountName, Asset};
use serde::{Deserialize, Serialize};

/// Supply and ceiling of one symbol
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplyRecord {
    pub supply: Asset,
    pub max_supply: Asset,
    pub issuer: AccountName,
}

impl SupplyRecord {
    /// Room left below the ceiling
    pub fn available(&self) -> Asset {
        Asset::new(
            self.max_supply.amount - self.supply.amount,
            self.supply.symbol.clone(),
        )
    }
}

/// Balance of one owner in one symbol
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceRecord {
    pub balance: Asset,
    /// Account billed for the row's storage
    pub payer: AccountName,
}
