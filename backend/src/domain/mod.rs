//! # Domain Module
//!
//! Business logic for TaskPoint: identity and access, the per-user activity
//! catalog, the append-only points ledger, and the balance views derived from
//! it. Services operate over the storage traits only, so the invariants here
//! hold for any backend.
//!
//! ## Core Concepts
//!
//! - **Activity**: a reusable template (name + point value) a user performs
//!   to generate a log entry
//! - **Ledger**: append-only earning (log) and spending (redemption) records
//! - **Balance**: never stored; always the fold `Σ points − Σ cost` over one
//!   user's ledger
//!
//! ## Business Rules
//!
//! - Ledger rows are immutable once created; deleting an activity never
//!   touches the history that references it
//! - A redemption only exists if the balance covered its cost at creation
//!   time; concurrent redemptions are linearized per user by the storage
//!   layer
//! - Admin status is re-read from the store on every privileged operation

pub mod activity_service;
pub mod balance_service;
pub mod identity_service;
pub mod ledger_service;
pub mod models;

pub use activity_service::ActivityService;
pub use balance_service::BalanceService;
pub use identity_service::IdentityService;
pub use ledger_service::LedgerService;
