//! SQLite storage adapter, built on SQLx.

pub mod activity_repository;
pub mod connection;
pub mod ledger_repository;
pub mod push_repository;
pub mod user_repository;

pub use activity_repository::ActivityRepository;
pub use connection::DbConnection;
pub use ledger_repository::LedgerRepository;
pub use push_repository::PushRepository;
pub use user_repository::UserRepository;
