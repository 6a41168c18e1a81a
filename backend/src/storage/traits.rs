//! # Storage Traits
//!
//! This module defines the storage abstraction traits that allow different
//! storage backends to be used interchangeably in the domain layer. The
//! balance invariants live in the services and are implemented exactly once;
//! adapters only have to honor the contracts spelled out here.

use async_trait::async_trait;

use crate::domain::models::activity::Activity;
use crate::domain::models::ledger::{DailyBucket, LedgerTotals, LogEntry, Redemption};
use crate::domain::models::push::PushSubscription;
use crate::domain::models::user::User;
use crate::error::DomainError;

/// Storage interface for accounts.
#[async_trait]
pub trait UserStorage: Send + Sync {
    /// Store a new user. Fails with `DuplicateEmail` if the email is taken,
    /// distinctly from any other failure.
    async fn store_user(&self, user: &User) -> Result<(), DomainError>;

    /// Retrieve a user by id.
    async fn get_user(&self, user_id: &str) -> Result<Option<User>, DomainError>;

    /// Retrieve a user by email.
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// List all users, newest first.
    async fn list_users(&self) -> Result<Vec<User>, DomainError>;

    /// Overwrite a user's admin flag. Returns false if the user is unknown.
    async fn set_admin(&self, user_id: &str, is_admin: bool) -> Result<bool, DomainError>;
}

/// Storage interface for the per-user activity catalog.
///
/// Every operation is owner-scoped: a cross-owner id behaves exactly like a
/// missing one.
#[async_trait]
pub trait ActivityStorage: Send + Sync {
    /// Store a new activity.
    async fn store_activity(&self, activity: &Activity) -> Result<(), DomainError>;

    /// Retrieve an activity owned by `owner_id`.
    async fn get_activity(
        &self,
        owner_id: &str,
        activity_id: &str,
    ) -> Result<Option<Activity>, DomainError>;

    /// List the owner's activities, oldest first.
    async fn list_activities(&self, owner_id: &str) -> Result<Vec<Activity>, DomainError>;

    /// Overwrite an activity's mutable fields, scoped to its owner.
    /// Returns false when nothing matched.
    async fn update_activity(&self, activity: &Activity) -> Result<bool, DomainError>;

    /// Delete an activity, scoped to its owner. Returns false when nothing
    /// matched. Never touches historical log entries.
    async fn delete_activity(
        &self,
        owner_id: &str,
        activity_id: &str,
    ) -> Result<bool, DomainError>;
}

/// Storage interface for the append-only points ledger.
#[async_trait]
pub trait LedgerStorage: Send + Sync {
    /// Append an earning event.
    async fn store_log_entry(&self, entry: &LogEntry) -> Result<(), DomainError>;

    /// List the owner's earning events, newest first.
    async fn list_log_entries(&self, owner_id: &str) -> Result<Vec<LogEntry>, DomainError>;

    /// Append a redemption if and only if the owner's balance covers its cost.
    ///
    /// The balance check and the insert MUST be a single atomic unit per
    /// owner: concurrent redemptions that would jointly overdraw must not
    /// both succeed. Returns false (and changes nothing) when the balance is
    /// insufficient.
    async fn try_store_redemption(&self, redemption: &Redemption) -> Result<bool, DomainError>;

    /// List the owner's redemption events, newest first.
    async fn list_redemptions(&self, owner_id: &str) -> Result<Vec<Redemption>, DomainError>;

    /// Lifetime earned/spent totals for one owner.
    async fn totals_for(&self, owner_id: &str) -> Result<LedgerTotals, DomainError>;

    /// Sum of points earned on the given UTC day ("YYYY-MM-DD").
    async fn earned_on_day(&self, owner_id: &str, day: &str) -> Result<i64, DomainError>;

    /// Per-UTC-day earning buckets across all users, newest day first.
    async fn daily_log_buckets(&self, limit: u32) -> Result<Vec<DailyBucket>, DomainError>;

    /// Per-UTC-day redemption buckets across all users, newest day first.
    async fn daily_redemption_buckets(&self, limit: u32)
        -> Result<Vec<DailyBucket>, DomainError>;
}

/// Storage interface for browser push subscriptions.
#[async_trait]
pub trait PushSubscriptionStorage: Send + Sync {
    /// Store a subscription; storing the same (owner, endpoint) twice is a
    /// no-op, making subscribe idempotent by endpoint.
    async fn upsert_subscription(&self, sub: &PushSubscription) -> Result<(), DomainError>;

    /// List every stored subscription across all users.
    async fn list_all_subscriptions(&self) -> Result<Vec<PushSubscription>, DomainError>;

    /// Remove a subscription after a terminal delivery failure.
    async fn delete_subscription(&self, owner_id: &str, endpoint: &str)
        -> Result<(), DomainError>;
}
