//! Book catalog server
//!
//! REST API over a MySQL book table.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bookmgr_server::{
    api,
    config::{AppConfig, LoggingConfig},
    db,
    repository::BooksRepository,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;

    init_tracing(&config.logging);

    tracing::info!("Starting Book API Server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Database: {}", config.database.display_target());
    tracing::info!("Skip Bootstrap: {}", config.database.skip_bootstrap);

    if !config.database.skip_bootstrap {
        tracing::info!("Bootstrapping database...");
        db::bootstrap_server(&config.database)
            .await
            .context("Failed to bootstrap database")?;
        tracing::info!("Database bootstrapped successfully");
    }

    let pool = db::connect_pool(&config.database)
        .await
        .context("Failed to connect to database")?;

    tracing::info!("Connected to database successfully");

    let addr = SocketAddr::new(
        config.server.host.parse().context("Invalid host address")?,
        config.server.port,
    );
    let port = config.server.port;

    let state = AppState {
        config: Arc::new(config),
        books: Arc::new(BooksRepository::new(pool.clone())),
    };

    let app = api::create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Server listening on http://{}", addr);
    tracing::info!("Web UI: http://localhost:{}", port);
    tracing::info!("API: http://localhost:{}/api/books", port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    tracing::info!("Server stopped");

    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("bookmgr_server={},tower_http=debug", logging.level).into());

    let registry = tracing_subscriber::registry().with(filter);
    if logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
