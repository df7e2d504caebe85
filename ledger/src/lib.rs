//! Eden Creator Ledger
//!
//! Balance and supply bookkeeping for the two recognized assets:
//! - Supply records with a hard ceiling per symbol
//! - Per-owner balance rows with a storage payer annotation
//! - Token actions (create, issue, retire, transfer, open, close)
//!
//! For every symbol the sum of balances equals the recorded supply.

pub mod error;
pub mod events;
pub mod records;
pub mod store;
pub mod token;

pub use error::{LedgerError, Result};
pub use events::LedgerEvent;
pub use records::{BalanceRecord, SupplyRecord};
pub use store::LedgerStore;
pub use token::{TokenContext, TokenSymbols};
