use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::payment_error;
use crate::api::middleware::AuthSession;
use crate::api::response::{ApiError, AppJson, CommonResponse};
use crate::payment::{self, PaymentRequest};
use crate::storage::models::PaymentTransaction;
use crate::AppState;

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
    pub amount: i64,
    pub customer_id: String,
    pub id: String,
    pub merchant_id: String,
    pub timestamp: String,
}

pub async fn add_payment(
    State(state): State<Arc<AppState>>,
    session: AuthSession,
    AppJson(req): AppJson<PaymentRequest>,
) -> Result<Json<CommonResponse<PaymentResponse>>, ApiError> {
    if req.merchant_id.trim().is_empty() {
        tracing::warn!("Payment request is missing merchantId");
        return Err(ApiError::bad_request("Invalid body request"));
    }

    tracing::debug!(subject_id = %session.subject_id, merchant_id = %req.merchant_id, "Attempting to add payment");

    let payment =
        payment::add_payment(&state.db, &session.subject_id, &req).map_err(payment_error)?;

    tracing::info!(payment_id = %payment.id, "Successfully added payment");
    Ok(CommonResponse::success(
        "Successfully added payment",
        payment_to_response(&payment),
    ))
}

fn payment_to_response(payment: &PaymentTransaction) -> PaymentResponse {
    PaymentResponse {
        amount: payment.amount,
        customer_id: payment.customer_id.to_string(),
        id: payment.id.to_string(),
        merchant_id: payment.merchant_id.to_string(),
        timestamp: payment.timestamp.to_rfc3339(),
    }
}
