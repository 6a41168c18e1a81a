use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A registered account, as exposed over the wire.
///
/// The credential hash never leaves the backend; this is the public shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    pub is_admin: bool,
    /// RFC 3339 UTC timestamp
    pub created_at: String,
}

/// A reusable activity template: performing it earns `value` points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: String,
    pub name: String,
    /// Points earned each time the activity is performed
    pub value: i64,
    pub icon: String,
    /// RFC 3339 UTC timestamp
    pub created_at: String,
}

/// A point-earning event. Immutable once recorded.
///
/// The activity name and points are snapshots taken at record time, so the
/// entry survives later edits or deletion of the referenced activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: String,
    /// Referenced activity, if any; kept even after the activity is deleted
    pub activity_id: Option<String>,
    pub activity_name: String,
    pub points: i64,
    /// RFC 3339 UTC timestamp
    pub timestamp: String,
}

/// A point-spending event. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Redemption {
    pub id: String,
    pub reward_name: String,
    pub cost: i64,
    /// RFC 3339 UTC timestamp
    pub timestamp: String,
}

// --- Auth ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Third-party signed identity assertion (e.g. an OAuth identity token).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FederatedLoginRequest {
    pub assertion: String,
}

/// Returned by all three login paths: the account plus a bearer token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub user: User,
    pub token: String,
}

// --- Activity catalog ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateActivityRequest {
    pub name: String,
    pub value: i64,
    /// Defaults to "zap" when absent
    pub icon: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateActivityRequest {
    pub name: Option<String>,
    pub value: Option<i64>,
    pub icon: Option<String>,
}

// --- Ledger ---

/// Request to record an earning event.
///
/// With `activity_id`, the backend snapshots the activity's current name and
/// value; `activity_name` and `points` are only honored for ad-hoc entries
/// that reference no activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordEarningRequest {
    pub activity_id: Option<String>,
    pub activity_name: Option<String>,
    pub points: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordRedemptionRequest {
    pub reward_name: String,
    pub cost: i64,
}

/// Derived view over the ledger; never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceResponse {
    pub balance: i64,
    /// Points earned on the current UTC calendar day
    pub today_points: i64,
}

// --- Admin ---

/// A user enriched with lifetime ledger totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminUserSummary {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    pub is_admin: bool,
    pub created_at: String,
    pub total_earned: i64,
    pub total_spent: i64,
}

/// One UTC-day bucket of earning activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyLogStat {
    /// UTC day, "YYYY-MM-DD"
    pub day: String,
    pub count: i64,
    pub points: i64,
}

/// One UTC-day bucket of redemption activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRedemptionStat {
    pub day: String,
    pub count: i64,
    pub cost: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyStatsResponse {
    pub logs: Vec<DailyLogStat>,
    pub redemptions: Vec<DailyRedemptionStat>,
}

// --- Push notifications ---

/// Browser push subscription, keyed by its endpoint URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PushSubscription {
    pub endpoint: String,
    pub keys: PushKeys,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PushKeys {
    pub p256dh: String,
    pub auth: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PushTestRequest {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PushTestResponse {
    pub success: bool,
    pub success_count: u32,
    pub fail_count: u32,
}

/// Uniform error body for all 4xx/5xx responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

// --- Opaque ids ---
//
// Every entity id is a namespaced string "<entity>::<uuid>"; storage-level
// identifiers are never surfaced.

impl User {
    pub fn generate_id() -> String {
        format!("user::{}", Uuid::new_v4())
    }
}

impl Activity {
    pub fn generate_id() -> String {
        format!("activity::{}", Uuid::new_v4())
    }
}

impl LogEntry {
    pub fn generate_id() -> String {
        format!("log::{}", Uuid::new_v4())
    }
}

impl Redemption {
    pub fn generate_id() -> String {
        format!("redemption::{}", Uuid::new_v4())
    }
}

/// Split a namespaced id into its entity tag and uuid part.
pub fn parse_id(id: &str) -> Result<(&str, &str), IdError> {
    let (entity, rest) = id.split_once("::").ok_or(IdError::InvalidFormat)?;
    if entity.is_empty() || rest.is_empty() {
        return Err(IdError::InvalidFormat);
    }
    Uuid::parse_str(rest).map_err(|_| IdError::InvalidUuid)?;
    Ok((entity, rest))
}

#[derive(Debug, Clone, PartialEq)]
pub enum IdError {
    InvalidFormat,
    InvalidUuid,
}

impl fmt::Display for IdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdError::InvalidFormat => write!(f, "Invalid id format"),
            IdError::InvalidUuid => write!(f, "Invalid uuid in id"),
        }
    }
}

impl std::error::Error for IdError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_ids_are_namespaced() {
        assert!(User::generate_id().starts_with("user::"));
        assert!(Activity::generate_id().starts_with("activity::"));
        assert!(LogEntry::generate_id().starts_with("log::"));
        assert!(Redemption::generate_id().starts_with("redemption::"));
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let a = LogEntry::generate_id();
        let b = LogEntry::generate_id();
        assert_ne!(a, b);
    }

    #[test]
    fn test_parse_id_roundtrip() {
        let id = Activity::generate_id();
        let (entity, _) = parse_id(&id).unwrap();
        assert_eq!(entity, "activity");
    }

    #[test]
    fn test_parse_id_rejects_garbage() {
        assert_eq!(parse_id("no-separator"), Err(IdError::InvalidFormat));
        assert_eq!(parse_id("::"), Err(IdError::InvalidFormat));
        assert_eq!(parse_id("user::not-a-uuid"), Err(IdError::InvalidUuid));
    }

    #[test]
    fn test_error_response_serialization() {
        let body = ErrorResponse {
            error: "Invalid email or password".to_string(),
        };
        let json = serde_json::to_string(&body).unwrap();
        assert_eq!(json, r#"{"error":"Invalid email or password"}"#);
    }
}
