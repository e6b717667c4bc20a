//! # estored: estore address and catalogue daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars)
//! - Install the `tracing` subscriber
//! - Initialize the `SQLite` connection pool and run migrations
//! - Construct repository implementations (adapters)
//! - Construct application services, injecting repositories via port traits
//! - Build the axum router, injecting application services
//! - Bind to a TCP port and serve until SIGTERM/SIGINT
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer; no domain logic belongs here.

mod config;

use estore_adapter_http_axum::state::AppState;
use estore_adapter_storage_sqlite_sqlx::{
    SqliteAddressRepository, SqliteCategoryRepository, SqliteCityRepository,
    SqliteLocalityRepository, SqliteStateRepository, SqliteUserRepository,
};
use estore_app::services::address_service::AddressService;
use estore_app::services::category_service::CategoryService;
use estore_app::services::geo_service::GeoService;
use estore_app::services::user_service::UserService;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.logging.filter)?)
        .init();

    // Database
    let db = estore_adapter_storage_sqlite_sqlx::Config {
        database_url: config.database_url().to_string(),
    }
    .build()
    .await?;
    let pool = db.pool().clone();
    tracing::info!(url = config.database_url(), "database ready");

    // Services
    let address_service = AddressService::new(
        SqliteAddressRepository::new(pool.clone()),
        SqliteUserRepository::new(pool.clone()),
        SqliteLocalityRepository::new(pool.clone()),
    );
    let geo_service = GeoService::new(
        SqliteStateRepository::new(pool.clone()),
        SqliteCityRepository::new(pool.clone()),
        SqliteLocalityRepository::new(pool.clone()),
    );
    let category_service = CategoryService::new(SqliteCategoryRepository::new(pool.clone()));
    let user_service = UserService::new(SqliteUserRepository::new(pool));

    // HTTP
    let state = AppState::new(address_service, geo_service, category_service, user_service);
    let app = estore_adapter_http_axum::router::build(state);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(%bind_addr, "estored listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("estored stopped");
    Ok(())
}

/// Resolve on Ctrl-C or, on unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received Ctrl-C, shutting down"),
        () = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
