//! # TaskPoint Backend
//!
//! Token-authenticated REST API for the TaskPoint gamification tracker.
//!
//! The crate follows a layered architecture:
//! ```text
//! IO Layer (REST API, handlers, extractors)
//!     ↓
//! Domain Layer (identity, catalog, ledger, balance services)
//!     ↓
//! Storage Layer (trait-abstracted persistence, SQLite adapter)
//! ```
//!
//! The invariant-bearing core is the points ledger: an append-only record of
//! earning and spending events from which every balance is derived on read.
//! Auth plumbing, push delivery, and static file serving are thin
//! collaborators around that ledger.

pub mod auth;
pub mod config;
pub mod domain;
pub mod error;
pub mod io;
pub mod push;
pub mod storage;

use axum::{
    http::Method,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::auth::{FederatedVerifier, TokenService};
use crate::config::Config;
use crate::domain::{ActivityService, BalanceService, IdentityService, LedgerService};
use crate::push::{HttpPushClient, PushService};
use crate::storage::sqlite::{
    ActivityRepository, DbConnection, LedgerRepository, PushRepository, UserRepository,
};
use crate::storage::{ActivityStorage, LedgerStorage, PushSubscriptionStorage, UserStorage};

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub identity_service: IdentityService,
    pub activity_service: ActivityService,
    pub ledger_service: LedgerService,
    pub balance_service: BalanceService,
    pub push_service: PushService,
}

/// Initialize the backend with all required services
pub async fn initialize_backend(config: &Config) -> anyhow::Result<AppState> {
    info!("Setting up database");
    let db = DbConnection::new(&config.database_url).await?;

    let users: Arc<dyn UserStorage> = Arc::new(UserRepository::new(db.clone()));
    let activities: Arc<dyn ActivityStorage> = Arc::new(ActivityRepository::new(db.clone()));
    let ledger: Arc<dyn LedgerStorage> = Arc::new(LedgerRepository::new(db.clone()));
    let subscriptions: Arc<dyn PushSubscriptionStorage> = Arc::new(PushRepository::new(db));

    info!("Setting up domain model");
    let tokens = TokenService::new(&config.jwt_secret, config.token_ttl_secs);
    let federation =
        FederatedVerifier::new(&config.federated_secret, &config.federated_audience);
    let push_client = HttpPushClient::new(config.push_timeout_secs)?;

    Ok(AppState {
        identity_service: IdentityService::new(users.clone(), tokens, federation),
        activity_service: ActivityService::new(activities.clone()),
        ledger_service: LedgerService::new(ledger.clone(), activities),
        balance_service: BalanceService::new(ledger, users),
        push_service: PushService::new(subscriptions, Arc::new(push_client)),
    })
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router {
    // CORS setup to allow the SPA to make requests from anywhere
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    // Set up our application routes
    let api_routes = Router::new()
        .route("/auth/signup", post(io::rest::auth_apis::signup))
        .route("/auth/login", post(io::rest::auth_apis::login))
        .route("/auth/federated", post(io::rest::auth_apis::login_federated))
        .route(
            "/activities",
            get(io::rest::activity_apis::list_activities)
                .post(io::rest::activity_apis::create_activity),
        )
        .route(
            "/activities/:id",
            axum::routing::put(io::rest::activity_apis::update_activity)
                .delete(io::rest::activity_apis::delete_activity),
        )
        .route(
            "/logs",
            get(io::rest::ledger_apis::list_logs).post(io::rest::ledger_apis::create_log),
        )
        .route(
            "/redemptions",
            get(io::rest::ledger_apis::list_redemptions)
                .post(io::rest::ledger_apis::create_redemption),
        )
        .route("/balance", get(io::rest::ledger_apis::get_balance))
        .route("/admin/users", get(io::rest::admin_apis::list_users))
        .route("/admin/stats/daily", get(io::rest::admin_apis::daily_stats))
        .route(
            "/admin/users/:id/toggle-admin",
            post(io::rest::admin_apis::toggle_admin),
        )
        .route("/push/subscribe", post(io::rest::push_apis::subscribe))
        .route("/push/test", post(io::rest::push_apis::test_broadcast));

    // Define our main application router
    Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .with_state(app_state)
}
