use thiserror::Error;

#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("invalid seed: {0}")]
    InvalidSeed(String),

    #[error("invalid public key")]
    InvalidPublicKey,
}
