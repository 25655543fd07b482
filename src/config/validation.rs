//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parseable)
//! - Check the fee base amount parses as an exact fixed-point value
//! - Reject half-configured Basic credentials
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is a pure function: RelayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::RelayConfig;
use crate::fee::amount::{parse_kas, AmountError};

/// A single semantic problem found in the configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("listener.bind_address '{0}' is not a valid socket address")]
    InvalidBindAddress(String),

    #[error("listener.max_body_bytes must be greater than zero")]
    ZeroBodyLimit,

    #[error("fee.base_amount_kas is invalid: {0}")]
    InvalidBaseAmount(#[from] AmountError),

    #[error("fee.fee_wallet must not be empty")]
    MissingFeeWallet,

    #[error("ledger.api_url '{url}' is not a valid URL: {reason}")]
    InvalidLedgerUrl { url: String, reason: String },

    #[error("whitelist.api_url must not be empty")]
    MissingWhitelistUrl,

    #[error("whitelist.api_url '{url}' is not a valid URL: {reason}")]
    InvalidWhitelistUrl { url: String, reason: String },

    #[error("whitelist credentials need both username and password, got only one")]
    PartialCredentials,

    #[error("{0} must be greater than zero")]
    ZeroTimeout(&'static str),
}

/// Validate a parsed configuration, collecting every problem found.
pub fn validate_config(config: &RelayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.listener.max_body_bytes == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    if let Err(e) = parse_kas(&config.fee.base_amount_kas) {
        errors.push(ValidationError::InvalidBaseAmount(e));
    }

    if config.fee.fee_wallet.trim().is_empty() {
        errors.push(ValidationError::MissingFeeWallet);
    }

    if let Err(e) = Url::parse(&config.ledger.api_url) {
        errors.push(ValidationError::InvalidLedgerUrl {
            url: config.ledger.api_url.clone(),
            reason: e.to_string(),
        });
    }

    if config.whitelist.api_url.trim().is_empty() {
        errors.push(ValidationError::MissingWhitelistUrl);
    } else if let Err(e) = Url::parse(&config.whitelist.api_url) {
        errors.push(ValidationError::InvalidWhitelistUrl {
            url: config.whitelist.api_url.clone(),
            reason: e.to_string(),
        });
    }

    if config.whitelist.username.is_some() != config.whitelist.password.is_some() {
        errors.push(ValidationError::PartialCredentials);
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("timeouts.request_secs"));
    }
    if config.ledger.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("ledger.request_timeout_secs"));
    }
    if config.whitelist.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("whitelist.request_timeout_secs"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
