//! # REST API for Push Notifications
//!
//! Subscription registration (any user) and the admin test broadcast.

use axum::{extract::State, http::StatusCode, response::Json};
use serde_json::{json, Value};
use tracing::info;

use crate::error::DomainError;
use crate::io::rest::extractors::{AdminUser, AuthUser};
use crate::AppState;
use shared::{PushSubscription, PushTestRequest, PushTestResponse};

/// Register a push endpoint for the caller. Idempotent by endpoint.
pub async fn subscribe(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Json(subscription): Json<PushSubscription>,
) -> Result<(StatusCode, Json<Value>), DomainError> {
    info!("POST /api/push/subscribe - user: {}", identity.id);

    state.push_service.subscribe(&identity.id, subscription).await?;
    Ok((StatusCode::CREATED, Json(json!({}))))
}

/// Broadcast a test notification to every stored subscription.
pub async fn test_broadcast(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Json(request): Json<PushTestRequest>,
) -> Result<Json<PushTestResponse>, DomainError> {
    info!("POST /api/push/test - admin: {}", admin.id);

    let outcome = state
        .push_service
        .broadcast(&request.title, &request.body)
        .await?;
    Ok(Json(PushTestResponse {
        success: true,
        success_count: outcome.success_count,
        fail_count: outcome.fail_count,
    }))
}
