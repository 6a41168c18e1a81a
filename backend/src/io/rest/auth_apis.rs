//! # REST API for Authentication
//!
//! Signup, password login, and federated login. These are the only routes
//! that accept unauthenticated requests.

use axum::{extract::State, response::Json};
use tracing::info;

use crate::error::DomainError;
use crate::io::rest::mappers::user_mapper::UserMapper;
use crate::AppState;
use shared::{AuthResponse, FederatedLoginRequest, LoginRequest, SignupRequest};

/// Create an account and issue a bearer token.
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<Json<AuthResponse>, DomainError> {
    info!("POST /api/auth/signup - email: {}", request.email);

    let (user, token) = state
        .identity_service
        .signup(&request.email, &request.password, request.name)
        .await?;
    Ok(Json(UserMapper::to_auth_response(user, token)))
}

/// Authenticate with email and password.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, DomainError> {
    info!("POST /api/auth/login - email: {}", request.email);

    let (user, token) = state
        .identity_service
        .login(&request.email, &request.password)
        .await?;
    Ok(Json(UserMapper::to_auth_response(user, token)))
}

/// Authenticate with a third-party identity assertion.
pub async fn login_federated(
    State(state): State<AppState>,
    Json(request): Json<FederatedLoginRequest>,
) -> Result<Json<AuthResponse>, DomainError> {
    info!("POST /api/auth/federated");

    let (user, token) = state
        .identity_service
        .login_federated(&request.assertion)
        .await?;
    Ok(Json(UserMapper::to_auth_response(user, token)))
}
