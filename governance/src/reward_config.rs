//! Reward pool configuration

use crate::error::{GovernanceError, Result};
use eden_core::{AccountName, Asset, Authorization, Symbol};
use serde::{Deserialize, Serialize};

/// Pool paid out per round and the Fibonacci offset for primary credits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardConfig {
    /// Secondary-asset amount split across all groups of a round
    pub pool: Asset,
    pub fib_offset: u8,
}

impl RewardConfig {
    /// Validate and build a new configuration; only the contract may set it
    pub fn configure(
        contract: &AccountName,
        secondary: &Symbol,
        auth: &dyn Authorization,
        pool: &Asset,
        fib_offset: u8,
    ) -> Result<RewardConfig> {
        auth.require_auth(contract)?;

        if pool.symbol != *secondary {
            return Err(GovernanceError::WrongPoolSymbol {
                expected: secondary.clone(),
                found: pool.symbol.clone(),
            });
        }
        if !pool.is_valid() {
            return Err(GovernanceError::InvalidPool(pool.clone()));
        }

        Ok(RewardConfig {
            pool: pool.clone(),
            fib_offset,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eden_core::{ErrorCategory, Signers};

    #[test]
    fn test_configure() {
        let contract: AccountName = "edencreator".parse().unwrap();
        let eos = Symbol::new(4, "EOS").unwrap();
        let pool: Asset = "100.0000 EOS".parse().unwrap();

        let auth = Signers::single(contract.clone());
        let config = RewardConfig::configure(&contract, &eos, &auth, &pool, 5).unwrap();
        assert_eq!(config.pool.amount, 1_000_000);
        assert_eq!(config.fib_offset, 5);
    }

    #[test]
    fn test_configure_rejections() {
        let contract: AccountName = "edencreator".parse().unwrap();
        let eos = Symbol::new(4, "EOS").unwrap();
        let auth = Signers::single(contract.clone());

        let wrong: Asset = "1.0000 CREATOR".parse().unwrap();
        let err = RewardConfig::configure(&contract, &eos, &auth, &wrong, 0).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Validation);

        let pool: Asset = "1.0000 EOS".parse().unwrap();
        let outsider = Signers::single("dan".parse().unwrap());
        let err = RewardConfig::configure(&contract, &eos, &outsider, &pool, 0).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Authorization);
    }
}
