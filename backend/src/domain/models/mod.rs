//! Domain entities, distinct from the wire DTOs in `shared`.
//!
//! Storage adapters and services speak these types; mappers in `io::rest`
//! translate them to the public shapes (dropping internals like the
//! credential hash and owner ids).

pub mod activity;
pub mod ledger;
pub mod push;
pub mod user;
