//! # REST API for Administration
//!
//! Aggregate views over all users plus the admin toggle. Every handler takes
//! `AdminUser`, which re-resolves the stored admin flag per request.

use axum::{
    extract::{Path, State},
    response::Json,
};
use tracing::info;

use crate::error::DomainError;
use crate::io::rest::extractors::AdminUser;
use crate::io::rest::mappers::ledger_mapper::LedgerMapper;
use crate::io::rest::mappers::user_mapper::UserMapper;
use crate::AppState;
use shared::{AdminUserSummary, DailyStatsResponse, User};

/// All users, newest first, enriched with lifetime earned/spent totals.
pub async fn list_users(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
) -> Result<Json<Vec<AdminUserSummary>>, DomainError> {
    info!("GET /api/admin/users - admin: {}", admin.id);

    let summary = state.balance_service.admin_summary().await?;
    Ok(Json(
        summary
            .into_iter()
            .map(|(user, totals)| UserMapper::to_admin_summary(user, totals))
            .collect(),
    ))
}

/// Day-bucketed usage across all users, most recent 30 buckets each.
pub async fn daily_stats(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
) -> Result<Json<DailyStatsResponse>, DomainError> {
    info!("GET /api/admin/stats/daily - admin: {}", admin.id);

    let (logs, redemptions) = state.balance_service.daily_stats().await?;
    Ok(Json(DailyStatsResponse {
        logs: logs.into_iter().map(LedgerMapper::log_bucket_to_dto).collect(),
        redemptions: redemptions
            .into_iter()
            .map(LedgerMapper::redemption_bucket_to_dto)
            .collect(),
    }))
}

/// Flip a user's admin flag.
pub async fn toggle_admin(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(user_id): Path<String>,
) -> Result<Json<User>, DomainError> {
    info!(
        "POST /api/admin/users/{}/toggle-admin - admin: {}",
        user_id, admin.id
    );

    let user = state.identity_service.toggle_admin(&user_id).await?;
    Ok(Json(UserMapper::to_dto(user)))
}
