/// A per-user activity template. Owned exclusively by one user.
#[derive(Debug, Clone, PartialEq)]
pub struct Activity {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    /// Points earned each time the activity is performed
    pub value: i64,
    pub icon: String,
    /// RFC 3339 UTC timestamp
    pub created_at: String,
}

/// Owner-supplied changes to an activity. `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct ActivityChanges {
    pub name: Option<String>,
    pub value: Option<i64>,
    pub icon: Option<String>,
}
