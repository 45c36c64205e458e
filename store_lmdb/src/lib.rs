//! LMDB storage backend for the CBC token ledger.
//!
//! Implements [`cbc_store::PersistentStore`] on top of the `heed` LMDB bindings.
//! All ledger entries live in one named database; a [`cbc_store::WriteBatch`]
//! maps onto a single LMDB write transaction.

pub mod environment;
pub mod error;
pub mod store;

pub use environment::{LmdbEnvironment, DEFAULT_MAP_SIZE};
pub use error::LmdbError;
pub use store::LmdbStore;
