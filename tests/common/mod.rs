//! Shared utilities for integration testing.
//!
//! Mock upstreams are small axum routers bound to port 0; each records how
//! often it was hit so tests can assert which network calls happened.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use tokio::net::TcpListener;

use whitelist_relay::config::RelayConfig;
use whitelist_relay::ledger::{LedgerTransaction, TransactionInput, TransactionOutput};
use whitelist_relay::{HttpServer, Shutdown};

pub const FEE_WALLET: &str = "kaspa:qqfee";
pub const OLD_ADDRESS: &str = "kaspa:qqold";
pub const NEW_ADDRESS: &str = "kaspa:qqnew";

pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_millis() as u64
}

/// A transaction that satisfies every policy check for the given id,
/// age, and fee amount.
pub fn valid_transaction(txn_id: &str, block_time: u64, fee_sompi: u64) -> LedgerTransaction {
    LedgerTransaction {
        transaction_id: txn_id.to_string(),
        block_time,
        is_accepted: true,
        inputs: vec![TransactionInput {
            transaction_id: txn_id.to_string(),
            previous_outpoint_address: OLD_ADDRESS.to_string(),
            previous_outpoint_amount: fee_sompi * 2,
        }],
        outputs: vec![TransactionOutput {
            transaction_id: txn_id.to_string(),
            amount: fee_sompi,
            script_public_key_address: FEE_WALLET.to_string(),
        }],
    }
}

pub struct MockLedger {
    pub addr: SocketAddr,
    pub hits: Arc<AtomicU32>,
}

type LedgerState = (Option<Arc<LedgerTransaction>>, Arc<AtomicU32>);

/// Serve a fixed transaction at `/transactions/{id}`; with `None` the mock
/// answers 500 for every lookup, standing in for an unreachable ledger.
pub async fn start_mock_ledger(txn: Option<LedgerTransaction>) -> MockLedger {
    let hits = Arc::new(AtomicU32::new(0));
    let state: LedgerState = (txn.map(Arc::new), hits.clone());

    let app = Router::new()
        .route("/transactions/{id}", get(serve_transaction))
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockLedger { addr, hits }
}

async fn serve_transaction(
    State((txn, hits)): State<LedgerState>,
    Path(_id): Path<String>,
) -> Response {
    hits.fetch_add(1, Ordering::SeqCst);
    match txn {
        Some(txn) => Json(txn.as_ref().clone()).into_response(),
        None => (StatusCode::INTERNAL_SERVER_ERROR, "ledger down").into_response(),
    }
}

pub struct MockWhitelist {
    pub addr: SocketAddr,
    pub hits: Arc<AtomicU32>,
    /// Authorization header of the most recent update call, if any.
    pub last_auth: Arc<Mutex<Option<String>>>,
}

type WhitelistState = (Arc<AtomicU32>, Arc<Mutex<Option<String>>>, bool);

/// Accept entry updates at `/{id}` and record each call.
pub async fn start_mock_whitelist() -> MockWhitelist {
    start_whitelist_inner(true).await
}

/// A whitelist service that answers 500 to every update.
pub async fn start_failing_whitelist() -> MockWhitelist {
    start_whitelist_inner(false).await
}

async fn start_whitelist_inner(healthy: bool) -> MockWhitelist {
    let hits = Arc::new(AtomicU32::new(0));
    let last_auth = Arc::new(Mutex::new(None));
    let state: WhitelistState = (hits.clone(), last_auth.clone(), healthy);

    let app = Router::new()
        .route("/{id}", post(serve_update))
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockWhitelist {
        addr,
        hits,
        last_auth,
    }
}

async fn serve_update(
    State((hits, last_auth, healthy)): State<WhitelistState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<serde_json::Value>,
) -> Response {
    hits.fetch_add(1, Ordering::SeqCst);
    *last_auth.lock().unwrap() = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(String::from);

    if !healthy {
        return (StatusCode::INTERNAL_SERVER_ERROR, "whitelist down").into_response();
    }

    Json(serde_json::json!({
        "id": id,
        "address": body["address"],
        "updated": true,
    }))
    .into_response()
}

/// Relay configuration pointing at the two mocks, with a 10 KAS base fee.
pub fn relay_config(ledger: &MockLedger, whitelist: &MockWhitelist) -> RelayConfig {
    let mut config = RelayConfig::default();
    config.fee.base_amount_kas = "10".to_string();
    config.fee.fee_wallet = FEE_WALLET.to_string();
    config.ledger.api_url = format!("http://{}", ledger.addr);
    config.ledger.request_timeout_secs = 2;
    config.whitelist.api_url = format!("http://{}", whitelist.addr);
    config.whitelist.request_timeout_secs = 2;
    config
}

/// Spawn the relay on port 0 and return its address plus the shutdown
/// handle that stops it.
pub async fn start_relay(config: RelayConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    let server = HttpServer::new(config).expect("server should build from test config");
    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    (addr, shutdown)
}
