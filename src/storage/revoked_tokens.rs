use super::collection::StoreError;
use super::db::Database;

impl Database {
    // ========================================================================
    // Revoked token operations
    // ========================================================================

    /// Whether the exact token string has been revoked
    pub fn is_token_revoked(&self, token: &str) -> Result<bool, StoreError> {
        self.inner.revoked_tokens.contains(token)
    }

    /// Add a token to the revocation list.
    ///
    /// Fails with [`StoreError::Duplicate`] if it is already there.
    pub fn put_revoked_token(&self, token: &str) -> Result<(), StoreError> {
        self.inner.revoked_tokens.insert(token.to_string())
    }

    /// Number of revoked tokens
    #[cfg(test)]
    pub(crate) fn revoked_token_count(&self) -> Result<usize, StoreError> {
        self.inner.revoked_tokens.len()
    }
}
