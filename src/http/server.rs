//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Construct the fee generator and upstream clients from config
//! - Create the Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, timeout, body limit)
//! - Serve with graceful shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::{Json, Router};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::schema::RelayConfig;
use crate::fee::generator::{FeeError, FeeGenerator};
use crate::http::fee::get_fee;
use crate::http::whitelist::update_whitelist;
use crate::ledger::client::LedgerClient;
use crate::ledger::policy::TransactionValidator;
use crate::ledger::types::LedgerError;
use crate::whitelist::client::{WhitelistClient, WhitelistError};

/// Errors constructing the server from configuration.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("fee generator: {0}")]
    Fee(#[from] FeeError),

    #[error("ledger client: {0}")]
    Ledger(#[from] LedgerError),

    #[error("whitelist client: {0}")]
    Whitelist(#[from] WhitelistError),
}

/// Application state injected into handlers.
///
/// Everything here is constructed once at startup and read-only afterwards;
/// requests share nothing mutable.
#[derive(Clone)]
pub struct AppState {
    pub fee: Arc<FeeGenerator>,
    pub validator: Arc<TransactionValidator>,
    pub whitelist: Arc<WhitelistClient>,
}

/// HTTP server for the relay.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Build the server and its components from configuration.
    pub fn new(config: RelayConfig) -> Result<Self, StartupError> {
        let fee = Arc::new(FeeGenerator::new(&config.fee)?);
        let ledger = LedgerClient::new(&config.ledger)?;
        let validator = Arc::new(TransactionValidator::new(ledger));
        let whitelist = Arc::new(WhitelistClient::new(&config.whitelist)?);

        let state = AppState {
            fee,
            validator,
            whitelist,
        };

        let router = Self::build_router(&config, state);
        Ok(Self { router })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &RelayConfig, state: AppState) -> Router {
        let middleware = ServiceBuilder::new()
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )));

        Router::new()
            .route("/api/get-fee", get(get_fee))
            .route("/api/update-whitelist", post(update_whitelist))
            .route("/health", get(health))
            .with_state(state)
            .layer(middleware)
            .layer(DefaultBodyLimit::max(config.listener.max_body_bytes))
    }

    /// Run the server, accepting connections on the given listener until
    /// the shutdown channel fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
