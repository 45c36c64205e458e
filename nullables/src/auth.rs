//! Nullable authorizer: scripted answers with a record of every question.

use cbc_ledger::AuthorizationOracle;
use cbc_types::Account;
use std::collections::HashSet;
use std::sync::Mutex;

/// An [`AuthorizationOracle`] with a fixed policy that remembers who it was asked about.
pub struct NullAuthorizer {
    policy: Policy,
    asked: Mutex<Vec<Account>>,
}

enum Policy {
    AllowAll,
    DenyAll,
    Only(HashSet<Account>),
}

impl NullAuthorizer {
    pub fn allow_all() -> Self {
        Self::with_policy(Policy::AllowAll)
    }

    pub fn deny_all() -> Self {
        Self::with_policy(Policy::DenyAll)
    }

    /// Authorize exactly the given accounts.
    pub fn only(accounts: impl IntoIterator<Item = Account>) -> Self {
        Self::with_policy(Policy::Only(accounts.into_iter().collect()))
    }

    fn with_policy(policy: Policy) -> Self {
        Self {
            policy,
            asked: Mutex::new(Vec::new()),
        }
    }

    /// Every account the ledger asked about, in order.
    pub fn asked(&self) -> Vec<Account> {
        self.asked.lock().unwrap().clone()
    }
}

impl AuthorizationOracle for NullAuthorizer {
    fn is_authorized(&self, account: &Account) -> bool {
        self.asked.lock().unwrap().push(account.clone());
        match &self.policy {
            Policy::AllowAll => true,
            Policy::DenyAll => false,
            Policy::Only(set) => set.contains(account),
        }
    }
}
