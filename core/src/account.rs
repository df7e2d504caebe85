//! Account names and the account directory

use crate::constants::MAX_ACCOUNT_NAME_LEN;
use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Account identifier: 1 to 12 characters from `a-z`, `1-5` and `.`,
/// not ending in a dot.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountName(String);

impl AccountName {
    pub fn new(name: impl Into<String>) -> Result<Self, CoreError> {
        let name = name.into();
        let valid_chars = name
            .chars()
            .all(|c| c == '.' || ('a'..='z').contains(&c) || ('1'..='5').contains(&c));

        if name.is_empty()
            || name.len() > MAX_ACCOUNT_NAME_LEN
            || !valid_chars
            || name.ends_with('.')
        {
            return Err(CoreError::InvalidName(name));
        }

        Ok(AccountName(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for AccountName {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AccountName::new(s)
    }
}

impl TryFrom<String> for AccountName {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        AccountName::new(value)
    }
}

impl From<AccountName> for String {
    fn from(name: AccountName) -> Self {
        name.0
    }
}

/// Host capability answering whether an account exists
pub trait AccountDirectory {
    fn is_account(&self, name: &AccountName) -> bool;
}

/// In-memory account directory
#[derive(Debug, Clone, Default)]
pub struct AccountRegistry {
    accounts: BTreeSet<AccountName>,
}

impl AccountRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_accounts<I>(accounts: I) -> Self
    where
        I: IntoIterator<Item = AccountName>,
    {
        Self {
            accounts: accounts.into_iter().collect(),
        }
    }

    /// Returns false if the account was already registered
    pub fn register(&mut self, name: AccountName) -> bool {
        self.accounts.insert(name)
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

impl AccountDirectory for AccountRegistry {
    fn is_account(&self, name: &AccountName) -> bool {
        self.accounts.contains(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        assert!(AccountName::new("dan").is_ok());
        assert!(AccountName::new("edencreator").is_ok());
        assert!(AccountName::new("eosio.token").is_ok());
        assert!(AccountName::new("a1b2c3d4e5a1").is_ok());
    }

    #[test]
    fn test_invalid_names() {
        assert!(AccountName::new("").is_err());
        assert!(AccountName::new("Alice").is_err());
        assert!(AccountName::new("toolongname123").is_err());
        assert!(AccountName::new("user6").is_err());
        assert!(AccountName::new("trailing.").is_err());
    }

    #[test]
    fn test_registry_lookup() {
        let alice: AccountName = "alice".parse().unwrap();
        let mut registry = AccountRegistry::new();
        assert!(!registry.is_account(&alice));

        assert!(registry.register(alice.clone()));
        assert!(!registry.register(alice.clone()));
        assert!(registry.is_account(&alice));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_name_serde_validates() {
        let name: AccountName = serde_json::from_str("\"bob\"").unwrap();
        assert_eq!(name.as_str(), "bob");
        assert!(serde_json::from_str::<AccountName>("\"BOB\"").is_err());
    }
}
