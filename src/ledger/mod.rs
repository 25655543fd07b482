//! Ledger lookup subsystem.
//!
//! # Data Flow
//! ```text
//! update-whitelist handler
//!     → client.rs (fetch transaction by id from the ledger REST API)
//!     → policy.rs (single-pass checks against the expected payment)
//!     → handler dispatches the whitelist update only on success
//! ```

pub mod client;
pub mod policy;
pub mod types;

pub use client::LedgerClient;
pub use policy::{
    check_transaction, ExpectedPayment, PolicyViolation, TransactionValidator, ValidationFailure,
};
pub use types::{LedgerError, LedgerTransaction, TransactionInput, TransactionOutput};
