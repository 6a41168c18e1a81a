//! # REST API Interface Layer
//!
//! HTTP endpoints for TaskPoint. This layer handles:
//! - Request/response serialization
//! - Identity extraction from bearer tokens (and the admin gate)
//! - Error translation from domain errors to HTTP status codes
//! - Request logging
//!
//! Business logic stays in the domain layer; handlers translate only.

pub mod activity_apis;
pub mod admin_apis;
pub mod auth_apis;
pub mod extractors;
pub mod ledger_apis;
pub mod mappers;
pub mod push_apis;
