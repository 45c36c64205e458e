use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContractError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("ledger fault: {0}")]
    Ledger(#[from] cbc_ledger::LedgerError),
}
