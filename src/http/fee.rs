//! Fee quote endpoint.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::http::error::ApiError;
use crate::http::server::AppState;

/// Response for `GET /api/get-fee`.
///
/// The sompi amount is stringified so clients that parse JSON numbers as
/// doubles never mangle it.
#[derive(Debug, Serialize)]
pub struct FeeResponse {
    pub amount: String,
    #[serde(rename = "amountInKAS")]
    pub amount_in_kas: String,
    #[serde(rename = "feeWallet")]
    pub fee_wallet: String,
}

pub async fn get_fee(State(state): State<AppState>) -> Result<Json<FeeResponse>, ApiError> {
    let quote = state.fee.quote().map_err(|e| {
        tracing::error!(error = %e, "Fee generation failed");
        ApiError::Internal
    })?;

    Ok(Json(FeeResponse {
        amount: quote.sompi.to_string(),
        amount_in_kas: quote.kas,
        fee_wallet: state.fee.fee_wallet().to_string(),
    }))
}
