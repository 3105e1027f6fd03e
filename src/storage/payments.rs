use uuid::Uuid;

use super::collection::StoreError;
use super::db::Database;
use super::models::PaymentTransaction;

impl Database {
    // ========================================================================
    // Payment operations
    // ========================================================================

    /// Store a payment transaction
    pub fn put_payment(&self, payment: &PaymentTransaction) -> Result<(), StoreError> {
        self.inner.payments.insert(payment.clone())?;
        tracing::debug!(
            payment_id = %payment.id,
            customer_id = %payment.customer_id,
            merchant_id = %payment.merchant_id,
            "Stored payment transaction"
        );
        Ok(())
    }

    /// Get all payments made by a customer
    pub fn get_payments_by_customer(
        &self,
        customer_id: &Uuid,
    ) -> Result<Vec<PaymentTransaction>, StoreError> {
        Ok(self
            .inner
            .payments
            .load()?
            .into_iter()
            .filter(|p| &p.customer_id == customer_id)
            .collect())
    }
}
