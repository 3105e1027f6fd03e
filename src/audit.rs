//! Best-effort audit trail.
//!
//! Every entry is also a tracing event. A failed history write is logged and
//! swallowed so it can never fail the login, logout or payment it describes.

use chrono::Utc;
use uuid::Uuid;

use crate::storage::models::{HistoryAction, HistoryEntry};
use crate::storage::Database;

/// Whether the audited step succeeded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Failure,
    Success,
}

/// Record an audit entry
pub fn record(
    db: &Database,
    customer_id: Option<Uuid>,
    action: HistoryAction,
    outcome: Outcome,
    details: impl Into<String>,
) {
    let details = details.into();
    let actor = customer_id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string());

    match outcome {
        Outcome::Success => {
            tracing::info!(customer_id = %actor, action = %action, "{details}")
        }
        Outcome::Failure => {
            tracing::warn!(customer_id = %actor, action = %action, "{details}")
        }
    }

    let entry = HistoryEntry {
        action,
        customer_id,
        details,
        id: Uuid::new_v4(),
        timestamp: Utc::now(),
    };

    if let Err(e) = db.put_history(&entry) {
        tracing::warn!(error = %e, action = %action, "Failed to add history entry");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{failing_history_db, memory_db};

    #[test]
    fn test_record_appends_history() {
        let db = memory_db();
        let id = Uuid::new_v4();

        record(&db, Some(id), HistoryAction::Login, Outcome::Success, "Login successful");
        record(&db, None, HistoryAction::Login, Outcome::Failure, "Unknown username");

        let entries = db.get_history_by_customer(&id).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].action, HistoryAction::Login);
        assert_eq!(entries[0].details, "Login successful");

        assert_eq!(db.get_all_history().unwrap().len(), 2);
    }

    #[test]
    fn test_history_failure_is_swallowed() {
        let db = failing_history_db();
        record(&db, None, HistoryAction::Payment, Outcome::Failure, "anything");
    }
}
