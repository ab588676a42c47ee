pub mod handlers;
pub mod routes;
pub mod shared;
pub mod system;
pub mod usecases;

use axum::http::{header, Method};
use axum::middleware;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

use shared::app_state::AppState;
use usecases::u501_catalog_ingestion::{CatalogCache, HttpCatalogSource, SystemClock};
use usecases::u502_order_intake::{build_mailer, OrderService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    system::tracing::initialize()?;

    let config = shared::config::load_config()?;

    let source = HttpCatalogSource::new(Duration::from_secs(config.catalog.request_timeout_secs))?;
    if config.catalog.source_url.trim().is_empty() {
        tracing::warn!("PRODUCT_SHEET_URL is not set, the catalog will be empty");
    }
    let catalog = CatalogCache::new(config.catalog.clone(), Arc::new(source), Arc::new(SystemClock));
    let orders = OrderService::new(config.orders.clone(), build_mailer(&config.email));

    let state = AppState {
        catalog: Arc::new(catalog),
        orders: Arc::new(orders),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    let app = routes::configure_routes(state, &config.server.static_dir)
        .layer(middleware::from_fn(system::request_logger::request_logger))
        .layer(cors);

    let addr = format!("{}:{}", config.server.host, config.server.port);

    tracing::info!("Attempting to bind server to http://{}", addr);
    let listener = match TcpListener::bind(&addr).await {
        Ok(listener) => {
            tracing::info!("Server successfully bound to {}", addr);
            listener
        }
        Err(e) => {
            if e.kind() == std::io::ErrorKind::AddrInUse {
                tracing::error!(
                    "Error: Port {} is already in use. Please ensure no other process is using this port.",
                    config.server.port
                );
            } else {
                tracing::error!("Failed to bind to {}. Error: {}", addr, e);
            }
            return Err(e.into());
        }
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
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
