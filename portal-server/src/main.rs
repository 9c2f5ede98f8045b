pub mod api;
pub mod config;
pub mod error;
pub mod health;
pub mod logger;
pub mod routes;
pub mod state;

pub use api::{
    admin::{
        admin::{list_users, verify_admin},
        verify_admin_response::VerifyAdminResponse,
    },
    delete_response::DeleteResponse,
    error::ApiError,
    error::Result as ApiResult,
    extractors::bearer_token::BearerToken,
    profiles::{
        profile_dto::ProfileDto,
        profile_list_response::ProfileListResponse,
        profile_query::ProfileQuery,
        profile_response::ProfileResponse,
        profiles::{delete_profile, get_profile, update_profile, upsert_profile},
        update_profile_request::UpdateProfileRequest,
        upsert_profile_request::UpsertProfileRequest,
    },
};

pub use crate::config::Config;
pub use crate::routes::build_router;
pub use crate::state::AppState;

use portal_auth::{JwtValidator, SessionRoleGate};
use portal_store::SqliteProfileStore;

use std::error::Error;
use std::sync::Arc;

use log::{error, info};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Load and validate configuration
    let config = Config::from_env()?;
    config.validate()?;

    // Initialize logger (before any other logging)
    logger::initialize(&config.log_level, config.log_file.clone(), config.log_colored)?;

    info!("Starting portal-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    // Initialize database pool
    info!("Connecting to database: {}", config.database_path.display());

    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect_with(
            SqliteConnectOptions::new()
                .filename(&config.database_path)
                .create_if_missing(true)
                .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
                .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
                .busy_timeout(std::time::Duration::from_secs(5)),
        )
        .await?;

    info!("Database connection established");

    // Run migrations
    info!("Running database migrations...");
    SqliteProfileStore::migrate(&pool).await?;
    info!("Migrations complete");

    // Token verification, preferring RS256 when a public key is configured
    let validator = JwtValidator::new(&config.jwt_algorithm()?)?;
    let gate = Arc::new(SessionRoleGate::new(validator));

    let store = Arc::new(SqliteProfileStore::new(pool));

    // Build router
    let app = build_router(AppState::new(store, gate));

    // Create TCP listener
    let listener = TcpListener::bind(&config.bind_addr).await?;
    let actual_addr = listener.local_addr()?;
    info!("Server listening on {}", actual_addr);

    // Start server with graceful shutdown on Ctrl+C
    info!("Server ready to accept connections");
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => info!("Received SIGINT (Ctrl+C), shutting down"),
                Err(e) => error!("Failed to listen for SIGINT: {}", e),
            }
        })
        .await?;

    Ok(())
}
