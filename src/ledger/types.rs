//! Ledger wire types and error definitions.
//!
//! Field names follow the ledger REST API's JSON shape verbatim; these
//! structs are read-only views of upstream data.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A transaction as returned by the ledger lookup service.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LedgerTransaction {
    /// Transaction identifier.
    pub transaction_id: String,

    /// Origin-chain timestamp in milliseconds.
    pub block_time: u64,

    /// Whether the chain has accepted the transaction.
    pub is_accepted: bool,

    /// Spent outpoints, with their source addresses resolved.
    #[serde(default)]
    pub inputs: Vec<TransactionInput>,

    /// Created outputs.
    #[serde(default)]
    pub outputs: Vec<TransactionOutput>,
}

/// A transaction input with its previous outpoint resolved.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TransactionInput {
    pub transaction_id: String,
    pub previous_outpoint_address: String,
    pub previous_outpoint_amount: u64,
}

/// A transaction output.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TransactionOutput {
    pub transaction_id: String,
    pub amount: u64,
    pub script_public_key_address: String,
}

/// Errors that can occur talking to the ledger lookup service.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Base URL in the configuration could not be parsed.
    #[error("invalid ledger API URL: {0}")]
    Url(#[from] url::ParseError),

    /// Request failed to send, timed out, or the body failed to decode.
    #[error("ledger request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("ledger service returned status {0}")]
    Status(reqwest::StatusCode),
}
