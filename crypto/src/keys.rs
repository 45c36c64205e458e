//! Ed25519 key derivation.

use cbc_types::{KeyPair, PrivateKey, PublicKey};
use ed25519_dalek::SigningKey;

use crate::CryptoError;

/// Derive a key pair from a 32-byte seed (deterministic).
pub fn keypair_from_seed(seed: &[u8; 32]) -> KeyPair {
    let signing_key = SigningKey::from_bytes(seed);
    KeyPair {
        public: PublicKey(signing_key.verifying_key().to_bytes()),
        private: PrivateKey(signing_key.to_bytes()),
    }
}

/// Parse a 64-character hex seed, with or without a `0x` prefix.
pub fn parse_seed(s: &str) -> Result<[u8; 32], CryptoError> {
    let digits = s.trim().strip_prefix("0x").unwrap_or(s.trim());
    let bytes = hex::decode(digits).map_err(|e| CryptoError::InvalidSeed(e.to_string()))?;
    bytes
        .try_into()
        .map_err(|v: Vec<u8>| CryptoError::InvalidSeed(format!("expected 32 bytes, got {}", v.len())))
}
