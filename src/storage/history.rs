use uuid::Uuid;

use super::collection::StoreError;
use super::db::Database;
use super::models::HistoryEntry;

impl Database {
    // ========================================================================
    // Audit history operations
    // ========================================================================

    /// Append an audit entry
    pub fn put_history(&self, entry: &HistoryEntry) -> Result<(), StoreError> {
        self.inner.history.insert(entry.clone())
    }

    /// Get all audit entries for a customer, oldest first
    pub fn get_history_by_customer(
        &self,
        customer_id: &Uuid,
    ) -> Result<Vec<HistoryEntry>, StoreError> {
        let mut entries: Vec<HistoryEntry> = self
            .inner
            .history
            .load()?
            .into_iter()
            .filter(|e| e.customer_id.as_ref() == Some(customer_id))
            .collect();
        entries.sort_by_key(|e| e.timestamp);
        Ok(entries)
    }

    /// Get every audit entry
    #[cfg(test)]
    pub(crate) fn get_all_history(&self) -> Result<Vec<HistoryEntry>, StoreError> {
        self.inner.history.load()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;
    use crate::storage::models::HistoryAction;
    use crate::testutil::setup_db;

    fn entry(customer_id: Option<Uuid>, minutes_ago: i64) -> HistoryEntry {
        HistoryEntry {
            action: HistoryAction::Login,
            customer_id,
            details: format!("{minutes_ago} minutes ago"),
            id: Uuid::new_v4(),
            timestamp: Utc::now() - Duration::minutes(minutes_ago),
        }
    }

    #[test]
    fn test_history_by_customer_is_oldest_first() {
        let (db, _temp) = setup_db();
        let alice = Uuid::new_v4();

        db.put_history(&entry(Some(alice), 1)).unwrap();
        db.put_history(&entry(None, 2)).unwrap();
        db.put_history(&entry(Some(alice), 5)).unwrap();
        db.put_history(&entry(Some(Uuid::new_v4()), 3)).unwrap();

        let details: Vec<String> = db
            .get_history_by_customer(&alice)
            .unwrap()
            .into_iter()
            .map(|e| e.details)
            .collect();
        assert_eq!(details, vec!["5 minutes ago", "1 minutes ago"]);
        assert_eq!(db.get_all_history().unwrap().len(), 4);
    }
}
