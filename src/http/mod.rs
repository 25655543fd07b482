//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → fee.rs (GET /api/get-fee, no downstream calls)
//!     → whitelist.rs (POST /api/update-whitelist,
//!                     ledger lookup → whitelist update, in that order)
//!     → error.rs (uniform JSON error bodies)
//! ```

pub mod error;
pub mod fee;
pub mod server;
pub mod whitelist;

pub use error::ApiError;
pub use server::{AppState, HttpServer, StartupError};
