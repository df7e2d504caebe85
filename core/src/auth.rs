//! Authorization capability
//!
//! Signature verification belongs to the host. Actions only ask whether a
//! given account has authorized the current call.

use crate::account::AccountName;
use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Authorization assertions for the current call
pub trait Authorization {
    fn has_auth(&self, account: &AccountName) -> bool;

    fn require_auth(&self, account: &AccountName) -> Result<(), CoreError> {
        if self.has_auth(account) {
            Ok(())
        } else {
            Err(CoreError::MissingAuthority(account.clone()))
        }
    }
}

/// Set of accounts that signed the current call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signers {
    accounts: BTreeSet<AccountName>,
}

impl Signers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(account: AccountName) -> Self {
        let mut signers = Self::new();
        signers.insert(account);
        signers
    }

    pub fn insert(&mut self, account: AccountName) {
        self.accounts.insert(account);
    }

    pub fn iter(&self) -> impl Iterator<Item = &AccountName> {
        self.accounts.iter()
    }
}

impl FromIterator<AccountName> for Signers {
    fn from_iter<I: IntoIterator<Item = AccountName>>(iter: I) -> Self {
        Self {
            accounts: iter.into_iter().collect(),
        }
    }
}

impl Authorization for Signers {
    fn has_auth(&self, account: &AccountName) -> bool {
        self.accounts.contains(account)
    }
}

/// Fixed administrator set, injected at construction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminPolicy {
    admins: BTreeSet<AccountName>,
}

impl AdminPolicy {
    pub fn new<I>(admins: I) -> Self
    where
        I: IntoIterator<Item = AccountName>,
    {
        Self {
            admins: admins.into_iter().collect(),
        }
    }

    pub fn is_admin(&self, account: &AccountName) -> bool {
        self.admins.contains(account)
    }

    pub fn admins(&self) -> impl Iterator<Item = &AccountName> {
        self.admins.iter()
    }

    /// Satisfied when any administrator authorized the call
    pub fn require_admin(&self, auth: &dyn Authorization) -> Result<(), CoreError> {
        if self.admins.iter().any(|admin| auth.has_auth(admin)) {
            Ok(())
        } else {
            Err(CoreError::MissingAdminAuthority)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCategory;

    fn name(s: &str) -> AccountName {
        s.parse().unwrap()
    }

    #[test]
    fn test_require_auth() {
        let signers = Signers::single(name("alice"));
        assert!(signers.require_auth(&name("alice")).is_ok());

        let err = signers.require_auth(&name("bob")).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Authorization);
    }

    #[test]
    fn test_admin_policy_any_admin() {
        let policy = AdminPolicy::new([name("dan"), name("eve")]);

        let signers: Signers = [name("alice"), name("eve")].into_iter().collect();
        assert!(policy.require_admin(&signers).is_ok());

        let outsiders = Signers::single(name("alice"));
        assert_eq!(
            policy.require_admin(&outsiders),
            Err(CoreError::MissingAdminAuthority)
        );
    }
}
