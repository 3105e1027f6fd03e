use uuid::Uuid;

use super::collection::StoreError;
use super::db::Database;
use super::models::Customer;

impl Database {
    // ========================================================================
    // Customer operations
    // ========================================================================

    /// Store a new customer
    pub fn put_customer(&self, customer: &Customer) -> Result<(), StoreError> {
        debug_assert!(!customer.username.is_empty(), "customer username must not be empty");
        self.inner.customers.insert(customer.clone())
    }

    /// Get a customer by id
    pub fn get_customer(&self, id: &Uuid) -> Result<Option<Customer>, StoreError> {
        tracing::debug!(customer_id = %id, "Finding customer by id");
        self.inner.customers.get(id)
    }

    /// Get a customer by username (exact match)
    pub fn get_customer_by_username(
        &self,
        username: &str,
    ) -> Result<Option<Customer>, StoreError> {
        tracing::debug!(username = %username, "Finding customer by username");
        self.inner
            .customers
            .find(|customer| customer.username == username)
    }
}
