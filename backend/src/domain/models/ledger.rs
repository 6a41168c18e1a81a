//! Ledger entities: the append-only record of earning and spending events.
//!
//! Neither type is ever updated or deleted through the public contract, which
//! makes a user's balance a pure fold over their history.

/// A point-earning event.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub id: String,
    pub owner_id: String,
    /// Referenced activity, if any; nullable so the entry survives deletion
    pub activity_id: Option<String>,
    /// Name snapshot taken at record time
    pub activity_name: String,
    /// Points snapshot taken at record time
    pub points: i64,
    /// RFC 3339 UTC timestamp
    pub timestamp: String,
}

/// A point-spending event.
#[derive(Debug, Clone, PartialEq)]
pub struct Redemption {
    pub id: String,
    pub owner_id: String,
    pub reward_name: String,
    pub cost: i64,
    /// RFC 3339 UTC timestamp
    pub timestamp: String,
}

/// Lifetime ledger totals for one user.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LedgerTotals {
    pub total_earned: i64,
    pub total_spent: i64,
}

impl LedgerTotals {
    pub fn balance(&self) -> i64 {
        self.total_earned - self.total_spent
    }
}

/// One calendar-day bucket of ledger activity (UTC days).
#[derive(Debug, Clone, PartialEq)]
pub struct DailyBucket {
    /// "YYYY-MM-DD", UTC
    pub day: String,
    pub count: i64,
    /// Sum of points for log buckets, sum of cost for redemption buckets
    pub total: i64,
}
