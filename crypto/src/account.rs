//! Account id derivation.

use cbc_types::{Account, PublicKey};

use crate::blake2b_160;

/// Derive the account id owned by a public key: Blake2b-160 of the key bytes.
pub fn derive_account(public_key: &PublicKey) -> Account {
    Account::from(blake2b_160(public_key.as_bytes()))
}
