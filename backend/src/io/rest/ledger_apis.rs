//! # REST API for the Ledger and Balance View
//!
//! Earning and redemption history, recording endpoints, and the derived
//! balance. All aggregates are recomputed per request; nothing is cached.

use axum::{extract::State, http::StatusCode, response::Json};
use chrono::Utc;
use tracing::info;

use crate::error::DomainError;
use crate::io::rest::extractors::AuthUser;
use crate::io::rest::mappers::ledger_mapper::LedgerMapper;
use crate::AppState;
use shared::{
    BalanceResponse, LogEntry, RecordEarningRequest, RecordRedemptionRequest, Redemption,
};

/// The caller's earning history, newest first.
pub async fn list_logs(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
) -> Result<Json<Vec<LogEntry>>, DomainError> {
    info!("GET /api/logs - user: {}", identity.id);

    let entries = state.ledger_service.list_earnings(&identity.id).await?;
    Ok(Json(
        entries.into_iter().map(LedgerMapper::log_to_dto).collect(),
    ))
}

/// Record an earning event for the caller.
pub async fn create_log(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Json(request): Json<RecordEarningRequest>,
) -> Result<(StatusCode, Json<LogEntry>), DomainError> {
    info!("POST /api/logs - user: {}", identity.id);

    let entry = state
        .ledger_service
        .record_earning(&identity.id, request)
        .await?;
    Ok((StatusCode::CREATED, Json(LedgerMapper::log_to_dto(entry))))
}

/// The caller's redemption history, newest first.
pub async fn list_redemptions(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
) -> Result<Json<Vec<Redemption>>, DomainError> {
    info!("GET /api/redemptions - user: {}", identity.id);

    let redemptions = state.ledger_service.list_redemptions(&identity.id).await?;
    Ok(Json(
        redemptions
            .into_iter()
            .map(LedgerMapper::redemption_to_dto)
            .collect(),
    ))
}

/// Redeem points. Rejected outright when the cost exceeds the balance.
pub async fn create_redemption(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Json(request): Json<RecordRedemptionRequest>,
) -> Result<(StatusCode, Json<Redemption>), DomainError> {
    info!("POST /api/redemptions - user: {}", identity.id);

    let redemption = state
        .ledger_service
        .record_redemption(&identity.id, &request.reward_name, request.cost)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(LedgerMapper::redemption_to_dto(redemption)),
    ))
}

/// The caller's current balance and today's earnings (UTC day).
pub async fn get_balance(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
) -> Result<Json<BalanceResponse>, DomainError> {
    info!("GET /api/balance - user: {}", identity.id);

    let balance = state.balance_service.balance_of(&identity.id).await?;
    let today_points = state
        .balance_service
        .today_earnings_of(&identity.id, Utc::now())
        .await?;
    Ok(Json(BalanceResponse {
        balance,
        today_points,
    }))
}
