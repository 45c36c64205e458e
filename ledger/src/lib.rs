//! Fungible-token ledger.
//!
//! Accounts hold balances, owners grant spenders allowances, and the total
//! supply is minted exactly once into the genesis account. Every mutating
//! operation is authorized through an injected [`AuthorizationOracle`] and
//! either commits completely or leaves the store untouched.

pub mod auth;
pub mod error;
pub mod event;
pub mod genesis;
pub mod keys;
pub mod ledger;
pub mod snapshot;

pub use auth::{AuthorizationOracle, WitnessSet};
pub use error::LedgerError;
pub use event::{EventBus, Notification};
pub use genesis::GenesisConfig;
pub use ledger::Ledger;
pub use snapshot::{Holder, LedgerSnapshot};
