//! Token actions over the ledger tables
//!
//! Each action validates everything it needs before touching the store,
//! except where a later check depends on an earlier mutation (issue/transfer
//! credit after debit). Callers that need all-or-nothing semantics across
//! several actions run them against a staged copy of the store.

use crate::error::{LedgerError, Result};
use crate::events::LedgerEvent;
use crate::records::{BalanceRecord, SupplyRecord};
use crate::store::LedgerStore;
use eden_core::constants::MAX_MEMO_BYTES;
use eden_core::{AccountDirectory, AccountName, Asset, Authorization, Symbol};
use serde::{Deserialize, Serialize};

/// The two symbols the ledger accepts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSymbols {
    /// Mintable, distribution-only token
    pub primary: Symbol,
    /// Pool-funded reward token
    pub secondary: Symbol,
}

impl TokenSymbols {
    pub fn is_recognized(&self, symbol: &Symbol) -> bool {
        *symbol == self.primary || *symbol == self.secondary
    }
}

/// Host capabilities and identity for one call
#[derive(Clone, Copy)]
pub struct TokenContext<'a> {
    /// Account hosting the contract; the system authority
    pub contract: &'a AccountName,
    pub symbols: &'a TokenSymbols,
    pub auth: &'a dyn Authorization,
    pub accounts: &'a dyn AccountDirectory,
}

impl<'a> TokenContext<'a> {
    fn validate_symbol(&self, symbol: &Symbol) -> Result<()> {
        if self.symbols.is_recognized(symbol) {
            Ok(())
        } else {
            Err(LedgerError::UnrecognizedSymbol(symbol.clone()))
        }
    }

    fn validate_quantity(&self, quantity: &Asset) -> Result<()> {
        if !quantity.is_valid() {
            return Err(LedgerError::InvalidQuantity(quantity.clone()));
        }
        if quantity.amount <= 0 {
            return Err(LedgerError::NonPositiveQuantity(quantity.clone()));
        }
        Ok(())
    }

    fn validate_memo(&self, memo: &str) -> Result<()> {
        if memo.len() > MAX_MEMO_BYTES {
            return Err(LedgerError::MemoTooLong(memo.len()));
        }
        Ok(())
    }

    fn require_account(&self, account: &AccountName) -> Result<()> {
        if self.accounts.is_account(account) {
            Ok(())
        } else {
            Err(LedgerError::AccountNotFound(account.clone()))
        }
    }
}

impl LedgerStore {
    /// Register a new symbol with a supply ceiling
    pub fn create(
        &mut self,
        ctx: &TokenContext<'_>,
        issuer: &AccountName,
        max_supply: &Asset,
    ) -> Result<LedgerEvent> {
        ctx.auth.require_auth(ctx.contract)?;

        ctx.validate_symbol(&max_supply.symbol)?;
        if !max_supply.is_valid() {
            return Err(LedgerError::InvalidQuantity(max_supply.clone()));
        }
        if max_supply.amount <= 0 {
            return Err(LedgerError::NonPositiveMaxSupply(max_supply.clone()));
        }

        let code = max_supply.symbol.code();
        if self.supply(code).is_some() {
            return Err(LedgerError::SymbolExists(code.clone()));
        }

        self.insert_supply(SupplyRecord {
            supply: Asset::zero(max_supply.symbol.clone()),
            max_supply: max_supply.clone(),
            issuer: issuer.clone(),
        });

        Ok(LedgerEvent::SymbolCreated {
            issuer: issuer.clone(),
            max_supply: max_supply.clone(),
        })
    }

    /// Mint new tokens into the contract's own holding account
    pub fn issue(
        &mut self,
        ctx: &TokenContext<'_>,
        to: &AccountName,
        quantity: &Asset,
        memo: &str,
    ) -> Result<LedgerEvent> {
        if to != ctx.contract {
            return Err(LedgerError::IssueToNonContract(to.clone()));
        }
        ctx.auth.require_auth(ctx.contract)?;

        ctx.validate_symbol(&quantity.symbol)?;
        ctx.validate_quantity(quantity)?;
        ctx.validate_memo(memo)?;

        let record = self.supply_mut(quantity.symbol.code())?;
        let available = record.available();
        if quantity.amount > available.amount {
            return Err(LedgerError::SupplyExceeded {
                requested: quantity.clone(),
                available,
            });
        }
        record.supply = record.supply.checked_add(quantity)?;

        self.add_balance(to, quantity, to)?;

        Ok(LedgerEvent::Issued {
            to: to.clone(),
            quantity: quantity.clone(),
            memo: memo.to_string(),
        })
    }

    /// Burn tokens held by the issuer
    pub fn retire(
        &mut self,
        ctx: &TokenContext<'_>,
        quantity: &Asset,
        memo: &str,
    ) -> Result<LedgerEvent> {
        ctx.validate_symbol(&quantity.symbol)?;
        ctx.validate_quantity(quantity)?;
        ctx.validate_memo(memo)?;

        let issuer = self
            .supply(quantity.symbol.code())
            .map(|record| record.issuer.clone())
            .ok_or_else(|| LedgerError::SupplyNotFound(quantity.symbol.code().clone()))?;
        ctx.auth.require_auth(&issuer)?;

        self.sub_balance(&issuer, quantity)?;
        let record = self.supply_mut(quantity.symbol.code())?;
        record.supply = record.supply.checked_sub(quantity)?;

        Ok(LedgerEvent::Retired {
            issuer,
            quantity: quantity.clone(),
            memo: memo.to_string(),
        })
    }

    /// Move tokens between accounts; the primary symbol only leaves the contract
    pub fn transfer(
        &mut self,
        ctx: &TokenContext<'_>,
        from: &AccountName,
        to: &AccountName,
        quantity: &Asset,
        memo: &str,
    ) -> Result<LedgerEvent> {
        if quantity.symbol == ctx.symbols.primary && from != ctx.contract {
            return Err(LedgerError::NotTransferable(
                quantity.symbol.code().clone(),
            ));
        }
        ctx.auth.require_auth(from)?;

        ctx.validate_symbol(&quantity.symbol)?;
        ctx.validate_quantity(quantity)?;
        ctx.validate_memo(memo)?;

        if from == to {
            return Err(LedgerError::SelfTransfer);
        }
        ctx.require_account(to)?;

        let payer = if ctx.auth.has_auth(to) { to } else { from };

        self.sub_balance(from, quantity)?;
        self.add_balance(to, quantity, payer)?;

        Ok(LedgerEvent::Transferred {
            from: from.clone(),
            to: to.clone(),
            quantity: quantity.clone(),
            memo: memo.to_string(),
            payer: payer.clone(),
        })
    }

    /// Create an empty balance row billed to `payer`
    pub fn open(
        &mut self,
        ctx: &TokenContext<'_>,
        owner: &AccountName,
        symbol: &Symbol,
        payer: &AccountName,
    ) -> Result<LedgerEvent> {
        ctx.auth.require_auth(payer)?;
        ctx.validate_symbol(symbol)?;
        ctx.require_account(owner)?;

        if self.balance_record(owner, symbol.code()).is_some() {
            return Err(LedgerError::BalanceAlreadyOpen {
                owner: owner.clone(),
                symbol: symbol.code().clone(),
            });
        }

        self.insert_row(
            owner,
            BalanceRecord {
                balance: Asset::zero(symbol.clone()),
                payer: payer.clone(),
            },
        );

        Ok(LedgerEvent::AccountOpened {
            owner: owner.clone(),
            symbol: symbol.clone(),
            payer: payer.clone(),
        })
    }

    /// Remove an empty balance row
    pub fn close(
        &mut self,
        ctx: &TokenContext<'_>,
        owner: &AccountName,
        symbol: &Symbol,
    ) -> Result<LedgerEvent> {
        ctx.auth.require_auth(owner)?;

        let row = self
            .balance_record(owner, symbol.code())
            .ok_or_else(|| LedgerError::BalanceNotFound {
                owner: owner.clone(),
                symbol: symbol.code().clone(),
            })?;
        if row.balance.amount != 0 {
            return Err(LedgerError::NonZeroBalance {
                owner: owner.clone(),
                balance: row.balance.clone(),
            });
        }

        self.remove_row(owner, symbol.code());

        Ok(LedgerEvent::AccountClosed {
            owner: owner.clone(),
            symbol: symbol.clone(),
        })
    }
}
