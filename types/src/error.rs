//! Errors raised while constructing core types from untrusted input.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid account: {0}")]
    InvalidAccount(String),
}
