//! Persistence contracts and implementations.
//!
//! # Responsibility
//! - Define the injected key-value store used for durable client state.
//! - Keep SQLite details behind the store boundary.
//!
//! # Invariants
//! - Readers of persisted state degrade to defaults instead of failing.
//! - Writers replace whole values; there is no partial update.

pub mod history_repo;
pub mod kv_store;
