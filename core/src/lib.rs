//! Eden Creator Core Library
//!
//! Shared primitives for the Eden Creator ledger:
//! - Account names and the account directory
//! - Symbols and fixed-point assets
//! - Authorization capability and the administrator policy
//! - Error categories shared by every crate

pub mod account;
pub mod asset;
pub mod auth;
pub mod constants;
pub mod error;

// Re-export main types
pub use account::{AccountDirectory, AccountName, AccountRegistry};
pub use asset::{Asset, Symbol, SymbolCode};
pub use auth::{AdminPolicy, Authorization, Signers};
pub use error::{CoreError, ErrorCategory, Result};

#[cfg(test)]
mod tests {
    use super::constants::*;

    #[test]
    fn test_module_constants() {
        assert_eq!(MAX_MEMO_BYTES, 256);
        assert_eq!(MIN_GROUPS, 2);
        assert_eq!(MIN_GROUP_SIZE, 4);
        assert_eq!(MAX_GROUP_SIZE, 6);
        assert_eq!(MAX_ASSET_AMOUNT, 4_611_686_018_427_387_903);
    }
}
