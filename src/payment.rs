use chrono::Utc;
use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

use crate::audit::{self, Outcome};
use crate::storage::models::{HistoryAction, PaymentTransaction};
use crate::storage::{Database, StoreError};

#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("Customer with id {0} not found")]
    CustomerNotFound(String),
    #[error("Amount must be greater than 0")]
    InvalidAmount,
    #[error("Merchant with id {0} not found")]
    MerchantNotFound(String),
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub amount: i64,
    pub merchant_id: String,
}

/// Record a payment from `customer_id` to the requested merchant
pub fn add_payment(
    db: &Database,
    customer_id: &str,
    request: &PaymentRequest,
) -> Result<PaymentTransaction, PaymentError> {
    let parsed_customer = Uuid::parse_str(customer_id).ok();

    let result = build_and_store(db, parsed_customer, customer_id, request);
    match &result {
        Ok(payment) => audit::record(
            db,
            Some(payment.customer_id),
            HistoryAction::Payment,
            Outcome::Success,
            format!(
                "Payment of {} to merchant {} successful",
                payment.amount, payment.merchant_id
            ),
        ),
        Err(e) => audit::record(
            db,
            parsed_customer,
            HistoryAction::Payment,
            Outcome::Failure,
            format!("Payment failed: {e}"),
        ),
    }
    result
}

fn build_and_store(
    db: &Database,
    parsed_customer: Option<Uuid>,
    customer_id: &str,
    request: &PaymentRequest,
) -> Result<PaymentTransaction, PaymentError> {
    if request.amount <= 0 {
        return Err(PaymentError::InvalidAmount);
    }

    let customer = match parsed_customer {
        Some(id) => db.get_customer(&id)?,
        None => None,
    }
    .ok_or_else(|| PaymentError::CustomerNotFound(customer_id.to_string()))?;

    let merchant = match Uuid::parse_str(request.merchant_id.trim()) {
        Ok(id) => db.get_merchant(&id)?,
        Err(_) => None,
    }
    .ok_or_else(|| PaymentError::MerchantNotFound(request.merchant_id.clone()))?;

    let payment = PaymentTransaction {
        amount: request.amount,
        customer_id: customer.id,
        id: Uuid::new_v4(),
        is_success: true,
        merchant_id: merchant.id,
        timestamp: Utc::now(),
    };

    db.put_payment(&payment)?;
    Ok(payment)
}
