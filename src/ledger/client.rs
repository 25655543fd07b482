//! Ledger lookup client with timeout and error handling.
//!
//! # Responsibilities
//! - Fetch transactions by id from the ledger REST API
//! - Enforce an explicit, configurable request timeout
//! - Map transport, status, and decode failures into LedgerError

use std::time::Duration;

use url::Url;

use crate::config::schema::LedgerConfig;
use crate::ledger::types::{LedgerError, LedgerTransaction};

/// Read-only client for the ledger lookup service.
#[derive(Clone)]
pub struct LedgerClient {
    http: reqwest::Client,
    base_url: String,
}

impl LedgerClient {
    /// Create a new client from configuration.
    pub fn new(config: &LedgerConfig) -> Result<Self, LedgerError> {
        let base_url = config.api_url.trim_end_matches('/').to_string();
        Url::parse(&base_url)?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self { http, base_url })
    }

    /// Fetch a transaction by id, with inputs resolved to their source
    /// addresses and outputs included.
    pub async fn get_transaction(&self, txn_id: &str) -> Result<LedgerTransaction, LedgerError> {
        let url = format!("{}/transactions/{}", self.base_url, txn_id);
        let response = self
            .http
            .get(url)
            .query(&[
                ("inputs", "true"),
                ("outputs", "true"),
                ("resolve_previous_outpoints", "light"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LedgerError::Status(status));
        }

        Ok(response.json().await?)
    }
}

impl std::fmt::Debug for LedgerClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LedgerClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}
