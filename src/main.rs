use std::error::Error;
use std::sync::Arc;
use storefront::catalog::HttpCatalog;
use storefront::config::Config;
use storefront::router::create_app_router;
use storefront::state::AppState;
use storefront::storage::{FileStore, MemoryStore, SharedStore};
use tokio::signal::ctrl_c;
#[cfg(unix)]
use tokio::signal::unix::{signal, SignalKind};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = Config::load().unwrap_or_else(|e| {
        warn!("Falling back to default configuration: {e}");
        Config::default()
    });

    let catalog = HttpCatalog::new(&config.api.base_url, config.request_timeout())?;
    let storage = open_storage(&config);

    // Initialize application state
    let state = AppState::new(&config, Arc::new(catalog), storage);

    // Build application router with all routes and middleware
    let app = create_app_router(state);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server running on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn open_storage(config: &Config) -> SharedStore {
    let dir = config.storage_dir();
    match FileStore::new(&dir) {
        Ok(store) => {
            info!("Persisting to {}", dir.display());
            Arc::new(store)
        }
        Err(e) => {
            warn!("Cannot use {} for storage ({e}), keeping state in memory", dir.display());
            Arc::new(MemoryStore::new())
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install signal handler: {e}");
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
}
