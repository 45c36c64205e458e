//! Ledger snapshots: the full holder set at a point in time.
//!
//! The snapshot hash is computed deterministically from the supply and the
//! holder entries in key order, so two ledgers in the same state hash equal.

use serde::Serialize;

use cbc_types::{Account, TokenAmount};

/// One stored balance entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Holder {
    pub account: Account,
    pub balance: TokenAmount,
}

/// Supply and every stored balance, as read under the ledger lock.
#[derive(Clone, Debug, Serialize)]
pub struct LedgerSnapshot {
    pub total_supply: TokenAmount,
    pub holders: Vec<Holder>,
    /// Sum of all holder balances.
    pub circulating: TokenAmount,
    /// Blake2b-256 of the supply and holder entries, hex encoded.
    pub hash: String,
}

impl LedgerSnapshot {
    /// Build a snapshot; `None` if the balances overflow when summed.
    pub fn create(total_supply: TokenAmount, holders: Vec<Holder>) -> Option<Self> {
        let circulating = holders
            .iter()
            .try_fold(TokenAmount::ZERO, |acc, h| acc.checked_add(h.balance))?;
        let hash = compute_hash(total_supply, &holders);
        Some(Self {
            total_supply,
            holders,
            circulating,
            hash,
        })
    }

    /// Conservation holds and no holder entry is zero.
    pub fn is_consistent(&self) -> bool {
        self.circulating == self.total_supply && self.zero_entries() == 0
    }

    pub fn zero_entries(&self) -> usize {
        self.holders.iter().filter(|h| h.balance.is_zero()).count()
    }
}

fn compute_hash(total_supply: TokenAmount, holders: &[Holder]) -> String {
    use blake2::digest::consts::U32;
    use blake2::{Blake2b, Digest};

    let mut hasher = Blake2b::<U32>::new();
    hasher.update(total_supply.to_le_bytes());
    for holder in holders {
        hasher.update((holder.account.len() as u32).to_le_bytes());
        hasher.update(holder.account.as_bytes());
        hasher.update(holder.balance.to_le_bytes());
    }
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn holder(byte: u8, balance: u128) -> Holder {
        Holder {
            account: Account::new(vec![byte; 20]),
            balance: TokenAmount::new(balance),
        }
    }

    #[test]
    fn hash_is_deterministic() {
        let a = LedgerSnapshot::create(TokenAmount::new(10), vec![holder(1, 10)]).unwrap();
        let b = LedgerSnapshot::create(TokenAmount::new(10), vec![holder(1, 10)]).unwrap();
        assert_eq!(a.hash, b.hash);
    }

    #[test]
    fn hash_changes_with_balances() {
        let a = LedgerSnapshot::create(TokenAmount::new(10), vec![holder(1, 10)]).unwrap();
        let b = LedgerSnapshot::create(TokenAmount::new(10), vec![holder(1, 4), holder(2, 6)])
            .unwrap();
        assert_ne!(a.hash, b.hash);
        assert!(a.is_consistent());
        assert!(b.is_consistent());
    }

    #[test]
    fn detects_zero_entries_and_leaks() {
        let snap = LedgerSnapshot::create(TokenAmount::new(10), vec![holder(1, 10), holder(2, 0)])
            .unwrap();
        assert_eq!(snap.zero_entries(), 1);
        assert!(!snap.is_consistent());

        let leaky = LedgerSnapshot::create(TokenAmount::new(10), vec![holder(1, 9)]).unwrap();
        assert!(!leaky.is_consistent());
    }

    #[test]
    fn overflowing_balances_yield_none() {
        let holders = vec![holder(1, u128::MAX), holder(2, 1)];
        assert!(LedgerSnapshot::create(TokenAmount::new(1), holders).is_none());
    }
}
