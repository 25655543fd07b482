//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the relay.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the relay.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RelayConfig {
    /// Listener configuration (bind address, body limits).
    pub listener: ListenerConfig,

    /// Fee generation settings.
    pub fee: FeeConfig,

    /// Ledger lookup service settings.
    pub ledger: LedgerConfig,

    /// Whitelist management service settings.
    pub whitelist: WhitelistConfig,

    /// Inbound timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:3000").
    pub bind_address: String,

    /// Maximum accepted request body size in bytes.
    pub max_body_bytes: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
            // The API only accepts small JSON bodies.
            max_body_bytes: 64 * 1024,
        }
    }
}

/// Fee generation configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FeeConfig {
    /// Base fee amount in whole KAS, as a decimal string with at most
    /// 8 fractional digits (e.g., "10" or "0.5").
    pub base_amount_kas: String,

    /// Address the fee payment must be sent to.
    pub fee_wallet: String,
}

impl Default for FeeConfig {
    fn default() -> Self {
        Self {
            base_amount_kas: "1".to_string(),
            fee_wallet: String::new(),
        }
    }
}

/// Ledger lookup service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Base URL of the ledger lookup REST API.
    pub api_url: String,

    /// Outbound request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.kaspa.org".to_string(),
            request_timeout_secs: 10,
        }
    }
}

/// Whitelist management service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WhitelistConfig {
    /// Base URL of the whitelist management API. Entry updates are POSTed
    /// to `<api_url>/<entry_id>`.
    pub api_url: String,

    /// HTTP Basic username. Both username and password must be set for
    /// credentials to be sent.
    pub username: Option<String>,

    /// HTTP Basic password.
    pub password: Option<String>,

    /// Outbound request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for WhitelistConfig {
    fn default() -> Self {
        Self {
            api_url: String::new(),
            username: None,
            password: None,
            request_timeout_secs: 10,
        }
    }
}

/// Timeout configuration for inbound requests.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
