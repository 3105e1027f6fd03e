use uuid::Uuid;

use super::collection::StoreError;
use super::db::Database;
use super::models::Merchant;

impl Database {
    // ========================================================================
    // Merchant operations
    // ========================================================================

    /// Store a new merchant
    pub fn put_merchant(&self, merchant: &Merchant) -> Result<(), StoreError> {
        self.inner.merchants.insert(merchant.clone())
    }

    /// Get a merchant by id
    pub fn get_merchant(&self, id: &Uuid) -> Result<Option<Merchant>, StoreError> {
        tracing::debug!(merchant_id = %id, "Finding merchant by id");
        self.inner.merchants.get(id)
    }
}
