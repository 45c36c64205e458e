//! The token ledger state machine.
//!
//! Balances, allowances and the supply cell live in a [`PersistentStore`].
//! Every mutating operation takes the ledger's operation lock, reads what it
//! needs, validates all preconditions, and only then commits its writes as a
//! single [`WriteBatch`]. A rejected call therefore never leaves partial state.

use std::sync::{Mutex, MutexGuard, PoisonError};

use cbc_store::{PersistentStore, WriteBatch};
use cbc_types::{Account, TokenAmount, TokenMetadata};

use crate::auth::AuthorizationOracle;
use crate::event::{EventBus, Notification};
use crate::genesis::GenesisConfig;
use crate::keys;
use crate::snapshot::{Holder, LedgerSnapshot};
use crate::LedgerError;

/// A fungible-token ledger over a persistent store.
///
/// Operations are serialized by an internal lock, so a `Ledger` can be shared
/// between threads (e.g. behind an `Arc`) and still behave as if every call
/// ran alone against the store.
pub struct Ledger<S> {
    store: S,
    genesis: GenesisConfig,
    events: EventBus,
    op_lock: Mutex<()>,
}

impl<S: PersistentStore> Ledger<S> {
    pub fn new(store: S, genesis: GenesisConfig) -> Self {
        Self {
            store,
            genesis,
            events: EventBus::new(),
            op_lock: Mutex::new(()),
        }
    }

    /// Register a notification listener. See [`EventBus`] for the rules.
    pub fn subscribe(&mut self, listener: Box<dyn Fn(&Notification) + Send + Sync>) {
        self.events.subscribe(listener);
    }

    pub fn metadata(&self) -> &TokenMetadata {
        &self.genesis.metadata
    }

    pub fn genesis(&self) -> &GenesisConfig {
        &self.genesis
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    // ── Initialization ──────────────────────────────────────────────────

    /// Whether the supply cell has been written.
    pub fn is_initialized(&self) -> Result<bool, LedgerError> {
        Ok(self.store.exists(keys::TOTAL_SUPPLY_KEY)?)
    }

    /// Credit the genesis account with the whole supply and record the supply.
    ///
    /// Only the first call has an effect; later calls fail with
    /// [`LedgerError::AlreadyInitialized`] and change nothing.
    pub fn initialize(&self) -> Result<(), LedgerError> {
        let _guard = self.lock();

        if self.is_initialized()? {
            tracing::debug!("initialize rejected: supply already recorded");
            return Err(LedgerError::AlreadyInitialized);
        }

        let owner = &self.genesis.owner;
        let supply = self.genesis.total_supply;

        let mut batch = WriteBatch::new();
        stage_balance(&mut batch, owner, supply);
        batch.put(keys::TOTAL_SUPPLY_KEY, keys::encode_amount(supply));
        self.store.commit(batch)?;

        tracing::info!(owner = %owner, supply = %supply, "ledger initialized");
        self.events.emit(&Notification::Transfer {
            from: None,
            to: owner.clone(),
            amount: supply,
        });
        Ok(())
    }

    // ── Reads ───────────────────────────────────────────────────────────

    /// The recorded supply, zero before initialization.
    pub fn total_supply(&self) -> Result<TokenAmount, LedgerError> {
        self.read_amount(keys::TOTAL_SUPPLY_KEY)
    }

    pub fn balance_of(&self, account: &Account) -> Result<TokenAmount, LedgerError> {
        self.read_amount(&keys::balance_key(account))
    }

    pub fn allowance(&self, owner: &Account, spender: &Account) -> Result<TokenAmount, LedgerError> {
        self.read_amount(&keys::allowance_key(owner, spender))
    }

    /// Supply plus every stored balance entry, read as one consistent view.
    pub fn snapshot(&self) -> Result<LedgerSnapshot, LedgerError> {
        let _guard = self.lock();

        let total_supply = self.total_supply()?;
        let mut holders = Vec::new();
        for (key, value) in self.store.scan_prefix(&[keys::BALANCE_PREFIX])? {
            let Some(account) = keys::account_from_balance_key(&key) else {
                continue;
            };
            let balance = keys::decode_amount(&key, &value)?;
            holders.push(Holder { account, balance });
        }
        LedgerSnapshot::create(total_supply, holders).ok_or(LedgerError::Overflow)
    }

    // ── Transfers ───────────────────────────────────────────────────────

    /// Move `amount` from `from` to `to`, authorized by `from`.
    ///
    /// A transfer to oneself succeeds without touching the store and without
    /// checking the balance.
    pub fn transfer<A>(
        &self,
        auth: &A,
        from: &Account,
        to: &Account,
        amount: TokenAmount,
    ) -> Result<(), LedgerError>
    where
        A: AuthorizationOracle + ?Sized,
    {
        if amount.is_zero() {
            return Err(LedgerError::InvalidAmount);
        }
        if !auth.is_authorized(from) {
            tracing::debug!(from = %from, "transfer rejected: not authorized");
            return Err(LedgerError::Unauthorized(from.clone()));
        }
        if from == to {
            tracing::debug!(account = %from, amount = %amount, "self-transfer accepted as no-op");
            return Ok(());
        }

        let _guard = self.lock();

        let from_balance = self.balance_of(from)?;
        let remaining = from_balance
            .checked_sub(amount)
            .ok_or(LedgerError::InsufficientFunds {
                needed: amount.raw(),
                available: from_balance.raw(),
            })?;
        let credited = self
            .balance_of(to)?
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;

        let mut batch = WriteBatch::new();
        stage_balance(&mut batch, from, remaining);
        stage_balance(&mut batch, to, credited);
        self.store.commit(batch)?;

        tracing::debug!(from = %from, to = %to, amount = %amount, "transfer committed");
        self.events.emit(&Notification::Transfer {
            from: Some(from.clone()),
            to: to.clone(),
            amount,
        });
        Ok(())
    }

    /// Set the amount `spender` may move out of `owner`'s balance.
    ///
    /// Replaces any previous allowance outright; it is not added to it, and a
    /// spender who sees the change coming can still spend the old value first.
    pub fn approve<A>(
        &self,
        auth: &A,
        owner: &Account,
        spender: &Account,
        amount: TokenAmount,
    ) -> Result<(), LedgerError>
    where
        A: AuthorizationOracle + ?Sized,
    {
        if !auth.is_authorized(owner) {
            tracing::debug!(owner = %owner, "approve rejected: not authorized");
            return Err(LedgerError::Unauthorized(owner.clone()));
        }

        let _guard = self.lock();

        let mut batch = WriteBatch::new();
        batch.put(keys::allowance_key(owner, spender), keys::encode_amount(amount));
        self.store.commit(batch)?;

        tracing::debug!(owner = %owner, spender = %spender, amount = %amount, "allowance set");
        self.events.emit(&Notification::Approval {
            owner: owner.clone(),
            spender: spender.clone(),
            amount,
        });
        Ok(())
    }

    /// Move `amount` from `from` to `to` on behalf of `from`, authorized by `spender`.
    ///
    /// Requires a positive amount, a sufficient balance and a sufficient
    /// `(from, spender)` allowance. The allowance is decremented and kept even
    /// when it reaches zero.
    pub fn transfer_from<A>(
        &self,
        auth: &A,
        spender: &Account,
        from: &Account,
        to: &Account,
        amount: TokenAmount,
    ) -> Result<(), LedgerError>
    where
        A: AuthorizationOracle + ?Sized,
    {
        if !auth.is_authorized(spender) {
            tracing::debug!(spender = %spender, "transfer_from rejected: not authorized");
            return Err(LedgerError::Unauthorized(spender.clone()));
        }
        if amount.is_zero() {
            return Err(LedgerError::InvalidAmount);
        }

        let _guard = self.lock();

        let allowance_key = keys::allowance_key(from, spender);
        let allowance = self.read_amount(&allowance_key)?;
        let remaining_allowance =
            allowance
                .checked_sub(amount)
                .ok_or(LedgerError::InsufficientAllowance {
                    needed: amount.raw(),
                    available: allowance.raw(),
                })?;
        let from_balance = self.balance_of(from)?;
        let remaining = from_balance
            .checked_sub(amount)
            .ok_or(LedgerError::InsufficientFunds {
                needed: amount.raw(),
                available: from_balance.raw(),
            })?;

        let mut batch = WriteBatch::new();
        batch.put(allowance_key, keys::encode_amount(remaining_allowance));
        if from != to {
            let credited = self
                .balance_of(to)?
                .checked_add(amount)
                .ok_or(LedgerError::Overflow)?;
            stage_balance(&mut batch, to, credited);
            stage_balance(&mut batch, from, remaining);
        }
        self.store.commit(batch)?;

        tracing::debug!(
            spender = %spender,
            from = %from,
            to = %to,
            amount = %amount,
            "delegated transfer committed"
        );
        self.events.emit(&Notification::Transfer {
            from: Some(from.clone()),
            to: to.clone(),
            amount,
        });
        Ok(())
    }

    // ── Internals ───────────────────────────────────────────────────────

    fn lock(&self) -> MutexGuard<'_, ()> {
        // The lock guards no data, so a panic in another holder leaves nothing torn.
        self.op_lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn read_amount(&self, key: &[u8]) -> Result<TokenAmount, LedgerError> {
        match self.store.get(key)? {
            Some(bytes) => Ok(keys::decode_amount(key, &bytes)?),
            None => Ok(TokenAmount::ZERO),
        }
    }
}

/// Stage a balance write; a zero balance removes the entry.
fn stage_balance(batch: &mut WriteBatch, account: &Account, balance: TokenAmount) {
    let key = keys::balance_key(account);
    if balance.is_zero() {
        batch.delete(key);
    } else {
        batch.put(key, keys::encode_amount(balance));
    }
}
