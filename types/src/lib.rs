//! Fundamental types for the CBC token ledger.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! account identifiers, token amounts, token metadata and key material.

pub mod account;
pub mod amount;
pub mod error;
pub mod keys;
pub mod metadata;

pub use account::Account;
pub use amount::TokenAmount;
pub use error::TypeError;
pub use keys::{KeyPair, PrivateKey, PublicKey, Signature};
pub use metadata::TokenMetadata;
