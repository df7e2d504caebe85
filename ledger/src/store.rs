//! In-memory ledger tables
//!
//! Supply records are keyed by symbol code; balance rows are scoped by owner,
//! then keyed by symbol code.

use crate::error::{LedgerError, Result};
use crate::records::{BalanceRecord, SupplyRecord};
use eden_core::{AccountName, Asset, Symbol, SymbolCode};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerStore {
    stats: BTreeMap<SymbolCode, SupplyRecord>,
    accounts: BTreeMap<AccountName, BTreeMap<SymbolCode, BalanceRecord>>,
}

impl LedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn supply(&self, code: &SymbolCode) -> Option<&SupplyRecord> {
        self.stats.get(code)
    }

    pub fn supplies(&self) -> impl Iterator<Item = &SupplyRecord> {
        self.stats.values()
    }

    pub fn balance_record(
        &self,
        owner: &AccountName,
        code: &SymbolCode,
    ) -> Option<&BalanceRecord> {
        self.accounts.get(owner).and_then(|rows| rows.get(code))
    }

    /// Balance of `owner`, zero when no row exists
    pub fn balance(&self, owner: &AccountName, symbol: &Symbol) -> Asset {
        self.balance_record(owner, symbol.code())
            .map(|row| row.balance.clone())
            .unwrap_or_else(|| Asset::zero(symbol.clone()))
    }

    /// All rows held in one symbol
    pub fn holders(&self, code: &SymbolCode) -> Vec<(&AccountName, &BalanceRecord)> {
        self.accounts
            .iter()
            .filter_map(|(owner, rows)| rows.get(code).map(|row| (owner, row)))
            .collect()
    }

    /// Sum of all balances in one symbol
    pub fn circulating(&self, code: &SymbolCode) -> i128 {
        self.holders(code)
            .iter()
            .map(|(_, row)| i128::from(row.balance.amount))
            .sum()
    }

    /// Checks the conservation invariants: balances sum to supply, nothing is
    /// negative and no supply above its ceiling. A row for a symbol that was
    /// never created must be empty (`open` may precede `create`).
    pub fn is_balanced(&self) -> bool {
        let supplies_ok = self.stats.iter().all(|(code, record)| {
            record.supply.amount >= 0
                && record.supply.amount <= record.max_supply.amount
                && self.circulating(code) == i128::from(record.supply.amount)
        });

        let rows_ok = self
            .accounts
            .values()
            .flat_map(|rows| rows.iter())
            .all(|(code, row)| {
                row.balance.amount >= 0
                    && match self.stats.get(code) {
                        Some(record) => record.supply.symbol == row.balance.symbol,
                        None => row.balance.amount == 0,
                    }
            });

        supplies_ok && rows_ok
    }

    pub(crate) fn insert_supply(&mut self, record: SupplyRecord) {
        self.stats
            .insert(record.supply.symbol.code().clone(), record);
    }

    pub(crate) fn supply_mut(&mut self, code: &SymbolCode) -> Result<&mut SupplyRecord> {
        self.stats
            .get_mut(code)
            .ok_or_else(|| LedgerError::SupplyNotFound(code.clone()))
    }

    /// Debit `owner`; the row must exist and cover the amount
    pub(crate) fn sub_balance(&mut self, owner: &AccountName, value: &Asset) -> Result<()> {
        let code = value.symbol.code();
        let row = self
            .accounts
            .get_mut(owner)
            .and_then(|rows| rows.get_mut(code))
            .ok_or_else(|| LedgerError::BalanceNotFound {
                owner: owner.clone(),
                symbol: code.clone(),
            })?;

        if row.balance.amount < value.amount {
            return Err(LedgerError::Overdrawn {
                owner: owner.clone(),
                requested: value.clone(),
                available: row.balance.clone(),
            });
        }

        row.balance = row.balance.checked_sub(value)?;
        Ok(())
    }

    /// Credit `owner`, creating the row billed to `payer` when absent
    pub(crate) fn add_balance(
        &mut self,
        owner: &AccountName,
        value: &Asset,
        payer: &AccountName,
    ) -> Result<()> {
        let rows = self.accounts.entry(owner.clone()).or_default();
        match rows.get_mut(value.symbol.code()) {
            Some(row) => {
                row.balance = row.balance.checked_add(value)?;
            }
            None => {
                rows.insert(
                    value.symbol.code().clone(),
                    BalanceRecord {
                        balance: value.clone(),
                        payer: payer.clone(),
                    },
                );
            }
        }
        Ok(())
    }

    pub(crate) fn insert_row(&mut self, owner: &AccountName, record: BalanceRecord) {
        self.accounts
            .entry(owner.clone())
            .or_default()
            .insert(record.balance.symbol.code().clone(), record);
    }

    pub(crate) fn remove_row(
        &mut self,
        owner: &AccountName,
        code: &SymbolCode,
    ) -> Option<BalanceRecord> {
        let rows = self.accounts.get_mut(owner)?;
        let removed = rows.remove(code);
        if rows.is_empty() {
            self.accounts.remove(owner);
        }
        removed
    }
}
