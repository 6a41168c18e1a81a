/// A registered account, including the stored credential.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: String,
    pub email: String,
    /// Argon2 PHC string, or the federated sentinel for accounts provisioned
    /// through a federated login (those can never password-login)
    pub password_hash: String,
    pub name: Option<String>,
    pub is_admin: bool,
    /// RFC 3339 UTC timestamp
    pub created_at: String,
}

/// Identity attached to an authenticated request.
#[derive(Debug, Clone, PartialEq)]
pub struct Identity {
    pub id: String,
    pub email: String,
    /// Admin flag as carried in the token; privileged checks re-resolve the
    /// stored flag instead of trusting this copy
    pub is_admin: bool,
}
