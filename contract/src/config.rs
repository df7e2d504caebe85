//! Contract configuration (TOML)
//!
//! Example:
//! ```toml
//! contract = "edencreator"
//! primary_symbol = "4,CREATOR"
//! secondary_symbol = "4,EOS"
//! admins = ["dan"]
//! accounts = ["alice", "bob"]
//! ```

use eden_core::constants::{
    DEFAULT_ADMIN, DEFAULT_CONTRACT_ACCOUNT, DEFAULT_PRECISION, PRIMARY_TICKER, SECONDARY_TICKER,
};
use eden_core::{AccountName, AdminPolicy, CoreError, Symbol};
use eden_ledger::TokenSymbols;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Serialize error: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error(transparent)]
    Core(#[from] CoreError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractConfig {
    /// Account hosting the contract
    pub contract: AccountName,
    pub primary_symbol: Symbol,
    pub secondary_symbol: Symbol,
    /// Accounts allowed to start a round
    pub admins: Vec<AccountName>,
    /// Accounts known to the directory besides the contract and admins
    #[serde(default)]
    pub accounts: Vec<AccountName>,
}

impl ContractConfig {
    /// Built-in deployment: `edencreator` run by `dan`, paying CREATOR and EOS
    pub fn standard() -> Result<Self, ConfigError> {
        Ok(Self {
            contract: AccountName::new(DEFAULT_CONTRACT_ACCOUNT)?,
            primary_symbol: Symbol::new(DEFAULT_PRECISION, PRIMARY_TICKER)?,
            secondary_symbol: Symbol::new(DEFAULT_PRECISION, SECONDARY_TICKER)?,
            admins: vec![AccountName::new(DEFAULT_ADMIN)?],
            accounts: Vec::new(),
        })
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: ContractConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.primary_symbol.code() == self.secondary_symbol.code() {
            return Err(ConfigError::Invalid(format!(
                "primary and secondary symbols share the code {}",
                self.primary_symbol.code()
            )));
        }
        if self.admins.is_empty() {
            return Err(ConfigError::Invalid(
                "at least one administrator is required".to_string(),
            ));
        }
        Ok(())
    }

    pub fn token_symbols(&self) -> TokenSymbols {
        TokenSymbols {
            primary: self.primary_symbol.clone(),
            secondary: self.secondary_symbol.clone(),
        }
    }

    pub fn admin_policy(&self) -> AdminPolicy {
        AdminPolicy::new(self.admins.iter().cloned())
    }

    /// Contract, administrators and configured accounts, deduplicated
    pub fn known_accounts(&self) -> Vec<AccountName> {
        let mut known = vec![self.contract.clone()];
        known.extend(self.admins.iter().cloned());
        known.extend(self.accounts.iter().cloned());
        known.sort();
        known.dedup();
        known
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_config() {
        let config = ContractConfig::standard().unwrap();
        assert_eq!(config.contract.as_str(), "edencreator");
        assert_eq!(config.primary_symbol.to_string(), "4,CREATOR");
        assert_eq!(config.secondary_symbol.to_string(), "4,EOS");
        assert!(config.admin_policy().is_admin(&"dan".parse().unwrap()));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_toml() {
        let config = ContractConfig::from_toml_str(
            r#"
contract = "edencreator"
primary_symbol = "4,CREATOR"
secondary_symbol = "4,EOS"
admins = ["dan", "eve"]
accounts = ["alice", "bob", "dan"]
"#,
        )
        .unwrap();

        assert_eq!(config.admins.len(), 2);
        let known: Vec<String> = config
            .known_accounts()
            .iter()
            .map(|a| a.to_string())
            .collect();
        assert_eq!(known, vec!["alice", "bob", "dan", "edencreator", "eve"]);
    }

    #[test]
    fn test_reject_invalid_config() {
        let same_code = r#"
contract = "edencreator"
primary_symbol = "4,EOS"
secondary_symbol = "2,EOS"
admins = ["dan"]
"#;
        assert!(matches!(
            ContractConfig::from_toml_str(same_code),
            Err(ConfigError::Invalid(_))
        ));

        let no_admins = r#"
contract = "edencreator"
primary_symbol = "4,CREATOR"
secondary_symbol = "4,EOS"
admins = []
"#;
        assert!(matches!(
            ContractConfig::from_toml_str(no_admins),
            Err(ConfigError::Invalid(_))
        ));

        let bad_name = r#"
contract = "Eden_Creator"
primary_symbol = "4,CREATOR"
secondary_symbol = "4,EOS"
admins = ["dan"]
"#;
        assert!(matches!(
            ContractConfig::from_toml_str(bad_name),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contract.toml");

        let config = ContractConfig::standard().unwrap();
        config.save(&path).unwrap();
        assert_eq!(ContractConfig::load(&path).unwrap(), config);
    }
}
