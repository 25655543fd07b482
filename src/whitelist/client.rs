//! Whitelist management client.
//!
//! # Responsibilities
//! - Forward the address change for an entry to the whitelist API
//! - Attach HTTP Basic credentials when configured
//! - Propagate the upstream response body untouched on success
//!
//! Must only be invoked after transaction validation has succeeded; the
//! call order is enforced by the update-whitelist handler.

use std::time::Duration;

use url::Url;

use crate::config::schema::WhitelistConfig;

/// Errors that can occur talking to the whitelist management service.
#[derive(Debug, thiserror::Error)]
pub enum WhitelistError {
    /// Base URL in the configuration could not be parsed.
    #[error("invalid whitelist API URL: {0}")]
    Url(#[from] url::ParseError),

    /// Request failed to send or timed out.
    #[error("whitelist request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("whitelist service returned status {0}")]
    Status(reqwest::StatusCode),
}

/// Client for the whitelist management API.
#[derive(Clone)]
pub struct WhitelistClient {
    http: reqwest::Client,
    base_url: String,
    credentials: Option<(String, String)>,
}

impl WhitelistClient {
    /// Create a new client from configuration.
    pub fn new(config: &WhitelistConfig) -> Result<Self, WhitelistError> {
        let base_url = config.api_url.trim_end_matches('/').to_string();
        Url::parse(&base_url)?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        let credentials = match (&config.username, &config.password) {
            (Some(user), Some(pass)) => Some((user.clone(), pass.clone())),
            _ => None,
        };

        Ok(Self {
            http,
            base_url,
            credentials,
        })
    }

    /// POST the new address for a whitelist entry and return the upstream
    /// response body as-is.
    pub async fn update_entry(
        &self,
        entry_id: &str,
        new_address: &str,
    ) -> Result<serde_json::Value, WhitelistError> {
        let url = format!("{}/{}", self.base_url, entry_id);
        let mut request = self
            .http
            .post(url)
            .json(&serde_json::json!({ "address": new_address }));

        if let Some((user, pass)) = &self.credentials {
            request = request.basic_auth(user, Some(pass));
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(WhitelistError::Status(status));
        }

        // Some upstreams answer with plain text; pass that through rather
        // than failing the already-validated update.
        let body = response.text().await?;
        Ok(serde_json::from_str(&body).unwrap_or(serde_json::Value::String(body)))
    }
}

impl std::fmt::Debug for WhitelistClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WhitelistClient")
            .field("base_url", &self.base_url)
            .field("has_credentials", &self.credentials.is_some())
            .finish()
    }
}
