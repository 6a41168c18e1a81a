//! Best-effort browser push notifications.
//!
//! Delivery carries no guarantees: each endpoint gets one bounded-timeout
//! send attempt, failures are isolated per endpoint, and endpoints that
//! report themselves gone are pruned from storage instead of retried.

pub mod client;
pub mod service;

pub use client::{DeliveryOutcome, HttpPushClient, PushSender};
pub use service::PushService;
