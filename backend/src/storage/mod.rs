//! # Storage Module
//!
//! Handles all data persistence for TaskPoint.
//!
//! The domain layer only sees the traits in [`traits`]; the concrete backend
//! (SQLite via SQLx) lives in [`sqlite`] and can be swapped without touching
//! business logic or the balance invariants.

pub mod sqlite;
pub mod traits;

pub use sqlite::DbConnection;
pub use traits::{
    ActivityStorage, LedgerStorage, PushSubscriptionStorage, UserStorage,
};
