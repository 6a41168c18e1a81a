//! Bearer-token issuance and validation.
//!
//! Tokens are HS256-signed JWTs embedding the account id, email, and a
//! point-in-time copy of the admin flag. The embedded flag is informational
//! only: admin-gated requests re-resolve it from the store. Logout is purely
//! client-side token deletion; there is no revocation list.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::domain::models::user::User;
use crate::error::DomainError;

/// Payload stored in a bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Account id
    pub sub: String,
    pub email: String,
    /// Admin flag at issuance time; stale after a toggle until reissued
    pub is_admin: bool,
    /// Issued at (Unix timestamp)
    pub iat: u64,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
}

/// Issues and verifies bearer tokens.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_secs: u64,
}

impl TokenService {
    pub fn new(secret: &str, ttl_secs: u64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl_secs,
        }
    }

    /// Issue a token for an authenticated account.
    pub fn issue(&self, user: &User) -> Result<String, DomainError> {
        let now = unix_now()?;
        let claims = Claims {
            sub: user.id.clone(),
            email: user.email.clone(),
            is_admin: user.is_admin,
            iat: now,
            exp: now + self.ttl_secs,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| DomainError::Internal(anyhow::anyhow!("Failed to sign token: {e}")))
    }

    /// Verify a presented token and return its claims.
    ///
    /// Malformed, forged, and expired tokens all collapse to `InvalidToken`.
    pub fn verify(&self, token: &str) -> Result<Claims, DomainError> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|_| DomainError::InvalidToken)
    }
}

/// Extract the token from an Authorization header value.
///
/// Only the "Bearer <token>" form is accepted.
pub fn extract_bearer(auth_header: Option<&str>) -> Option<&str> {
    let token = auth_header?.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then_some(token)
}

fn unix_now() -> Result<u64, DomainError> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .map_err(|e| DomainError::Internal(anyhow::anyhow!("System time error: {e}")))
}
