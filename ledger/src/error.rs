use cbc_types::Account;
use thiserror::Error;

/// Why a ledger operation was rejected.
///
/// Every variant except [`LedgerError::Store`] and [`LedgerError::Overflow`]
/// is a soft failure: an expected outcome of a single call that leaves the
/// ledger untouched.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("operation not authorized by {0}")]
    Unauthorized(Account),

    #[error("insufficient balance: need {needed}, have {available}")]
    InsufficientFunds { needed: u128, available: u128 },

    #[error("insufficient allowance: need {needed}, have {available}")]
    InsufficientAllowance { needed: u128, available: u128 },

    #[error("amount must be greater than zero")]
    InvalidAmount,

    #[error("ledger is already initialized")]
    AlreadyInitialized,

    #[error("invalid genesis configuration: {0}")]
    InvalidGenesis(String),

    #[error("balance arithmetic overflowed")]
    Overflow,

    #[error("storage error: {0}")]
    Store(#[from] cbc_store::StoreError),
}

impl LedgerError {
    /// Whether this is an expected, call-local rejection rather than a fault.
    pub fn is_soft(&self) -> bool {
        !matches!(
            self,
            LedgerError::Store(_) | LedgerError::Overflow | LedgerError::InvalidGenesis(_)
        )
    }
}
