//! Invocation dispatch for the CBC token ledger.
//!
//! A host hands the contract an [`Invocation`] (trigger, operation name,
//! loosely typed arguments) together with the witnesses that signed it.
//! The contract validates the argument shapes, routes the call to the
//! [`cbc_ledger::Ledger`], and folds every soft failure into a `false` or
//! `0` [`Outcome`]. Malformed input never panics.

pub mod dispatch;
pub mod error;
pub mod invocation;
pub mod witness;

pub use dispatch::Contract;
pub use error::ContractError;
pub use invocation::{Arg, Invocation, Operation, Outcome, Trigger};
pub use witness::{SignedInvocation, Witness, WitnessInfo};
