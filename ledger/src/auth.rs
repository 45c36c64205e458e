//! Authorization of the acting principal.
//!
//! The ledger never verifies signatures itself. Each mutating operation is
//! handed an [`AuthorizationOracle`] describing who authorized the current
//! call, and asks it about exactly one account.

use std::collections::HashSet;

use cbc_types::Account;

/// Answers whether the current operation is authorized by an account.
pub trait AuthorizationOracle {
    fn is_authorized(&self, account: &Account) -> bool;
}

impl<F> AuthorizationOracle for F
where
    F: Fn(&Account) -> bool,
{
    fn is_authorized(&self, account: &Account) -> bool {
        self(account)
    }
}

/// The set of accounts that witnessed (signed) the current invocation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WitnessSet {
    witnesses: HashSet<Account>,
}

impl WitnessSet {
    /// No witnesses: every authorization check fails.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with(mut self, account: Account) -> Self {
        self.witnesses.insert(account);
        self
    }

    pub fn insert(&mut self, account: Account) -> bool {
        self.witnesses.insert(account)
    }

    pub fn len(&self) -> usize {
        self.witnesses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.witnesses.is_empty()
    }
}

impl FromIterator<Account> for WitnessSet {
    fn from_iter<I: IntoIterator<Item = Account>>(iter: I) -> Self {
        Self {
            witnesses: iter.into_iter().collect(),
        }
    }
}

impl AuthorizationOracle for WitnessSet {
    fn is_authorized(&self, account: &Account) -> bool {
        self.witnesses.contains(account)
    }
}
