//! Shared utilities for the CBC token ledger.

pub mod logging;

pub use logging::{init_logging, LogFormat, LoggingError};
