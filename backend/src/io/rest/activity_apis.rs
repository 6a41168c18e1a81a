//! # REST API for the Activity Catalog
//!
//! Owner-scoped CRUD; a cross-owner id 404s exactly like a missing one.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use tracing::info;

use crate::domain::models::activity::ActivityChanges;
use crate::error::DomainError;
use crate::io::rest::extractors::AuthUser;
use crate::io::rest::mappers::activity_mapper::ActivityMapper;
use crate::AppState;
use shared::{Activity, CreateActivityRequest, UpdateActivityRequest};

/// List the caller's activities, oldest first.
pub async fn list_activities(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
) -> Result<Json<Vec<Activity>>, DomainError> {
    info!("GET /api/activities - user: {}", identity.id);

    let activities = state.activity_service.list(&identity.id).await?;
    Ok(Json(
        activities.into_iter().map(ActivityMapper::to_dto).collect(),
    ))
}

/// Create a new activity for the caller.
pub async fn create_activity(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Json(request): Json<CreateActivityRequest>,
) -> Result<(StatusCode, Json<Activity>), DomainError> {
    info!("POST /api/activities - user: {}", identity.id);

    let activity = state
        .activity_service
        .create(&identity.id, &request.name, request.value, request.icon)
        .await?;
    Ok((StatusCode::CREATED, Json(ActivityMapper::to_dto(activity))))
}

/// Update one of the caller's activities.
pub async fn update_activity(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Path(activity_id): Path<String>,
    Json(request): Json<UpdateActivityRequest>,
) -> Result<Json<Activity>, DomainError> {
    info!(
        "PUT /api/activities/{} - user: {}",
        activity_id, identity.id
    );

    let changes = ActivityChanges {
        name: request.name,
        value: request.value,
        icon: request.icon,
    };
    let activity = state
        .activity_service
        .update(&identity.id, &activity_id, changes)
        .await?;
    Ok(Json(ActivityMapper::to_dto(activity)))
}

/// Delete one of the caller's activities. Historical log entries survive.
pub async fn delete_activity(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Path(activity_id): Path<String>,
) -> Result<StatusCode, DomainError> {
    info!(
        "DELETE /api/activities/{} - user: {}",
        activity_id, identity.id
    );

    state
        .activity_service
        .delete(&identity.id, &activity_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
