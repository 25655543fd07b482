//! Payment-Gated Whitelist Relay
//!
//! Two independent request flows, no shared mutable state between them:
//! - `GET /api/get-fee` returns a randomized fee amount in sompi, derived
//!   from the configured base amount, so an observer never sees a fixed fee
//!   it could front-run.
//! - `POST /api/update-whitelist` verifies a claimed fee payment against the
//!   ledger lookup API and, only when the payment checks out, forwards the
//!   address change to the whitelist management API.

pub mod config;
pub mod fee;
pub mod http;
pub mod ledger;
pub mod lifecycle;
pub mod whitelist;

pub use config::RelayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
