//! API server entry point.

use api::config::Config;
use document_store::PostgresDocumentStore;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use tokio::signal;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Waits for a shutdown signal (SIGINT or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install SIGINT handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("received SIGINT, starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("received SIGTERM, starting graceful shutdown");
        }
    }
}

/// Connects to PostgreSQL if configured.
///
/// Any failure leaves the service running without a store; store-backed
/// endpoints then answer with a server error.
async fn connect_store(config: &Config) -> Option<PostgresDocumentStore> {
    let Some(url) = config.database_url.as_deref() else {
        tracing::warn!("DATABASE_URL not set, running without a database");
        return None;
    };

    let mut options: PgConnectOptions = match url.parse() {
        Ok(options) => options,
        Err(e) => {
            tracing::error!(error = %e, "invalid DATABASE_URL, running without a database");
            return None;
        }
    };
    if let Some(name) = &config.database_name {
        options = options.database(name);
    }

    let pool = match PgPoolOptions::new()
        .acquire_timeout(config.store_timeout)
        .connect_with(options)
        .await
    {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!(error = %e, "database connection failed, running without a database");
            return None;
        }
    };

    let store = PostgresDocumentStore::new(pool);
    if let Err(e) = store.run_migrations().await {
        tracing::error!(error = %e, "database migration failed, running without a database");
        return None;
    }

    tracing::info!(database = ?config.database_name, "connected to database");
    Some(store)
}

#[tokio::main]
async fn main() {
    let config = Config::from_env();

    // 1. Initialize tracing
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 2. Install Prometheus metrics recorder
    let metrics_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .expect("failed to install Prometheus recorder");

    // 3. Connect the document store and build application state
    let store = connect_store(&config).await;
    let state = api::AppState::new(store, config.clone());

    // 4. Build the application
    let app = api::create_app(state, metrics_handle);

    // 5. Start server
    let addr = config.addr();
    tracing::info!(%addr, "starting API server");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind address");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");

    tracing::info!("server shut down gracefully");
}
