//! Whitelist update endpoint.
//!
//! Field checks run first, then the ledger validation, and only a fully
//! validated payment triggers the whitelist call. The two upstream calls
//! share a correlation id so a single update can be traced end to end.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::ledger::policy::{ExpectedPayment, ValidationFailure};

/// Request body for `POST /api/update-whitelist`.
///
/// Fields are optional at the serde layer so presence can be checked by
/// hand and answered with a 400 rather than a deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct UpdateWhitelistRequest {
    #[serde(rename = "feeAmount")]
    pub fee_amount: Option<String>,
    #[serde(rename = "feeAddress")]
    pub fee_address: Option<String>,
    #[serde(rename = "oldAddress")]
    pub old_address: Option<String>,
    #[serde(rename = "newAddress")]
    pub new_address: Option<String>,
    #[serde(rename = "whitelistID")]
    pub whitelist_id: Option<String>,
    #[serde(rename = "txnID")]
    pub txn_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UpdateWhitelistResponse {
    pub success: bool,
    pub result: serde_json::Value,
}

pub async fn update_whitelist(
    State(state): State<AppState>,
    Json(body): Json<UpdateWhitelistRequest>,
) -> Result<Json<UpdateWhitelistResponse>, ApiError> {
    let fee_amount = require_field(body.fee_amount)?;
    let fee_address = require_field(body.fee_address)?;
    let old_address = require_field(body.old_address)?;
    let new_address = require_field(body.new_address)?;
    let whitelist_id = require_field(body.whitelist_id)?;
    let txn_id = require_field(body.txn_id)?;

    let fee_sompi: u64 = fee_amount.parse().map_err(|_| {
        ApiError::MalformedRequest("feeAmount must be an integer sompi amount".to_string())
    })?;

    let update_id = Uuid::new_v4();
    let expected = ExpectedPayment {
        txn_id,
        fee_sompi,
        fee_address,
        old_address,
    };

    tracing::debug!(
        update_id = %update_id,
        txn_id = %expected.txn_id,
        whitelist_id = %whitelist_id,
        "Validating claimed fee payment"
    );

    match state.validator.validate(&expected).await {
        Ok(()) => {}
        Err(ValidationFailure::Policy(violation)) => {
            tracing::warn!(
                update_id = %update_id,
                txn_id = %expected.txn_id,
                violation = %violation,
                "Transaction rejected by policy"
            );
            return Err(ApiError::InvalidTransaction);
        }
        Err(ValidationFailure::Ledger(e)) => {
            tracing::warn!(
                update_id = %update_id,
                txn_id = %expected.txn_id,
                error = %e,
                "Ledger lookup failed during validation"
            );
            return Err(ApiError::InvalidTransaction);
        }
    }

    match state.whitelist.update_entry(&whitelist_id, &new_address).await {
        Ok(result) => {
            tracing::info!(
                update_id = %update_id,
                whitelist_id = %whitelist_id,
                txn_id = %expected.txn_id,
                "Whitelist entry updated"
            );
            Ok(Json(UpdateWhitelistResponse {
                success: true,
                result,
            }))
        }
        Err(e) => {
            tracing::error!(
                update_id = %update_id,
                whitelist_id = %whitelist_id,
                error = %e,
                "Whitelist update failed after validation passed"
            );
            Err(ApiError::Upstream)
        }
    }
}

fn require_field(value: Option<String>) -> Result<String, ApiError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ApiError::MalformedRequest(
            "Missing required fields".to_string(),
        )),
    }
}
