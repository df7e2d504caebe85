//! Eden Creator Contract
//!
//! The contract facade tying the ledger, governance and reward engine
//! together. Every action runs against a staged copy of the state and is
//! committed only when it succeeds, so a failed action leaves no trace.

pub mod action;
pub mod config;
pub mod contract;
pub mod error;
pub mod shared;
pub mod state;

pub use action::{Action, ActionReceipt};
pub use config::{ConfigError, ContractConfig};
pub use contract::EdenCreator;
pub use error::{ContractError, Result};
pub use shared::SharedEdenCreator;
pub use state::ContractState;
