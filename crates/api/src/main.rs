use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use petcare_api::background::availability_reconciler;
use petcare_api::config::ServerConfig;
use petcare_api::payments::stripe::StripeProvider;
use petcare_api::router::build_app_router;
use petcare_api::state::AppState;
use petcare_core::adoption::AdoptionCoordinator;
use petcare_db::PgAdoptionStore;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "petcare_api=debug,petcare_core=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        hold_policy = %config.hold_policy,
        store_timeout_ms = config.store_timeout_ms,
        "Loaded server configuration"
    );

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = petcare_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    petcare_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    petcare_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Adoption coordinator ---
    let adoptions = Arc::new(AdoptionCoordinator::new(
        Arc::new(PgAdoptionStore::new(pool.clone())),
        config.hold_policy,
        config.store_timeout(),
    ));

    // --- Background jobs ---
    let cancel = CancellationToken::new();
    let reconciler_handle = if config.reconcile_interval_secs > 0 {
        Some(tokio::spawn(availability_reconciler::run(
            Arc::clone(&adoptions),
            Duration::from_secs(config.reconcile_interval_secs),
            cancel.clone(),
        )))
    } else {
        tracing::info!("Availability reconciler disabled");
        None
    };

    // --- App state ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        adoptions,
        payments: Arc::new(StripeProvider::new(&config.payment)),
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    cancel.cancel();
    if let Some(handle) = reconciler_handle {
        let grace = Duration::from_secs(config.shutdown_timeout_secs);
        if tokio::time::timeout(grace, handle).await.is_err() {
            tracing::warn!("Availability reconciler did not stop in time");
        }
    }

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
