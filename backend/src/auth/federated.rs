//! Federated identity assertion verification.
//!
//! A federated login presents a third-party-signed identity token (e.g. an
//! OAuth identity token). The assertion must carry a signature made with the
//! configured federation key, an `aud` claim matching the configured
//! audience, and an unexpired `exp`. On success the asserted email (and
//! display name, when present) identify the account to provision or log in.

use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Claims required of an identity assertion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssertionClaims {
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    pub aud: String,
    pub exp: u64,
}

/// Verified identity extracted from an assertion.
#[derive(Debug, Clone, PartialEq)]
pub struct FederatedIdentity {
    pub email: String,
    pub name: Option<String>,
}

#[derive(Clone)]
pub struct FederatedVerifier {
    decoding_key: DecodingKey,
    audience: String,
}

impl FederatedVerifier {
    pub fn new(secret: &str, audience: &str) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            audience: audience.to_string(),
        }
    }

    /// Verify an assertion and extract the asserted identity.
    ///
    /// Bad signature, wrong audience, and expiry all collapse into one
    /// verification failure; callers learn nothing about which check failed.
    pub fn verify(&self, assertion: &str) -> Result<FederatedIdentity, DomainError> {
        let mut validation = Validation::default();
        validation.set_audience(&[&self.audience]);

        let data = decode::<AssertionClaims>(assertion, &self.decoding_key, &validation)
            .map_err(|_| DomainError::FederationVerificationFailed)?;

        Ok(FederatedIdentity {
            email: data.claims.email,
            name: data.claims.name,
        })
    }
}
