//! Nullable infrastructure for deterministic testing.
//!
//! Every collaborator of the ledger (storage, authorization, notification
//! delivery) sits behind a trait or callback. This crate provides
//! test-friendly implementations that:
//! - Never touch the filesystem
//! - Can be controlled programmatically
//! - Record how they were used
//!
//! Usage: swap real implementations for nullables in tests.

pub mod auth;
pub mod events;
pub mod store;

pub use auth::NullAuthorizer;
pub use events::NotificationRecorder;
pub use store::NullStore;
