//! HTTP JSON API over the transaction registries
//!
//! Routes are organized into modules:
//! - routes::transactions: per-rail create, list, filter, process, delete
//! - routes::settings: effective configuration

pub mod error;
pub mod routes;

use axum::{
    routing::{get, post},
    Json, Router,
};
use ezpay_config::Config;
use ezpay_core::Registries;
use serde_json::{json, Value};
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

pub use error::{ApiError, ApiResult};

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub registries: Registries,
    pub config: Config,
}

impl AppState {
    pub fn new(registries: Registries, config: Config) -> Self {
        Self { registries, config }
    }

    /// Sleep for the configured artificial delay, if any
    pub async fn simulate_latency(&self) {
        let ms = self.config.server.simulated_latency_ms;
        if ms > 0 {
            tokio::time::sleep(Duration::from_millis(ms)).await;
        }
    }
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    use routes::settings::api_settings;
    use routes::transactions::{
        api_create_transaction, api_delete_transaction, api_process_transaction,
        api_recent_transactions, api_transaction_detail, api_transaction_summary,
        api_transactions, api_update_status, api_verify_transaction,
    };

    let cors_enable = state.config.server.cors_enable;

    let router = Router::new()
        .route("/api/health", get(health_check))
        .route(
            "/api/:kind/transactions",
            get(api_transactions).post(api_create_transaction),
        )
        .route("/api/:kind/transactions/recent", get(api_recent_transactions))
        .route("/api/:kind/transactions/summary", get(api_transaction_summary))
        .route(
            "/api/:kind/transactions/:id",
            get(api_transaction_detail).delete(api_delete_transaction),
        )
        .route(
            "/api/:kind/transactions/:id/status",
            axum::routing::patch(api_update_status),
        )
        .route("/api/:kind/transactions/:id/process", post(api_process_transaction))
        .route("/api/:kind/transactions/:id/verify", post(api_verify_transaction))
        .route("/api/settings", get(api_settings))
        .with_state(state);

    if cors_enable {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}

/// Health check endpoint
async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Bind and serve until the process is interrupted
pub async fn start_server(config: Config, registries: Registries) -> std::io::Result<()> {
    let addr = config.bind_address();
    let state = AppState::new(registries, config);
    let router = create_router(state);

    let listener = TcpListener::bind(&addr).await?;
    log::info!("Starting EzPay transaction service on http://{}", addr);
    log::info!("Available routes:");
    log::info!("  - /api/health");
    log::info!("  - /api/{{upi,bank}}/transactions (create, list, filter)");
    log::info!("  - /api/{{upi,bank}}/transactions/:id (detail, status, process, verify)");
    log::info!("  - /api/settings");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    log::info!("Server stopped gracefully");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
    }
}
