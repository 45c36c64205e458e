//! Cryptographic primitives for the CBC token ledger.
//!
//! - **Ed25519** for signing invocations and verifying witnesses
//! - **Blake2b** for hashing invocation messages and deriving account ids

pub mod account;
pub mod error;
pub mod hash;
pub mod keys;
pub mod sign;

pub use account::derive_account;
pub use error::CryptoError;
pub use hash::{blake2b_160, blake2b_256};
pub use keys::{keypair_from_seed, parse_seed};
pub use sign::{sign_message, verify_signature};
