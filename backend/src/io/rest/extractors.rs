//! Identity extractors: every authenticated route takes one of these instead
//! of reading headers itself.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::domain::models::user::{Identity, User};
use crate::error::DomainError;
use crate::AppState;

/// The identity attached to a request via its bearer token.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Identity);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = DomainError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok());
        let identity = state.identity_service.authenticate(header)?;
        Ok(AuthUser(identity))
    }
}

/// An authenticated request whose account is an admin *right now*: the flag
/// is re-read from the store, not taken from the token.
#[derive(Debug, Clone)]
pub struct AdminUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for AdminUser {
    type Rejection = DomainError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let AuthUser(identity) = AuthUser::from_request_parts(parts, state).await?;
        let user = state.identity_service.require_admin(&identity.id).await?;
        Ok(AdminUser(user))
    }
}
