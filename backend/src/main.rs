use tower_http::services::ServeDir;
use tracing::info;
use tracing_subscriber::EnvFilter;

use taskpoint_backend::config::Config;
use taskpoint_backend::{create_router, initialize_backend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    let state = initialize_backend(&config).await?;

    // API routes plus the built SPA for everything else
    let app = create_router(state).fallback_service(ServeDir::new(&config.static_dir));

    info!("Starting server on {}", config.bind_addr);
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("Listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
