use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use super::collection::Record;

/// Layout of timestamps in customer files written by earlier deployments
const LEGACY_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// A customer account.
///
/// Also reads the capitalized field names and space-separated UTC
/// timestamps of customer files seeded before this service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    #[serde(alias = "CreatedAt", deserialize_with = "lenient_timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(alias = "Id")]
    pub id: Uuid,
    /// Argon2 PHC string, or a bcrypt hash from seeded data
    #[serde(alias = "Password")]
    pub password_hash: String,
    #[serde(alias = "UpdatedAt", deserialize_with = "lenient_timestamp")]
    pub updated_at: DateTime<Utc>,
    #[serde(alias = "Username")]
    pub username: String,
}

/// RFC 3339, or `2024-11-22 12:00:00.769884426` taken as UTC
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if let Ok(parsed) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(&raw, LEGACY_TIMESTAMP_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|e| serde::de::Error::custom(format!("invalid timestamp {raw:?}: {e}")))
}

impl Record for Customer {
    type Key = Uuid;

    fn key(&self) -> &Uuid {
        &self.id
    }
}

/// A merchant customers can pay
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Merchant {
    pub created_at: DateTime<Utc>,
    pub id: Uuid,
    pub name: String,
    pub updated_at: DateTime<Utc>,
}

impl Record for Merchant {
    type Key = Uuid;

    fn key(&self) -> &Uuid {
        &self.id
    }
}

/// A payment from a customer to a merchant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentTransaction {
    /// Amount in the smallest currency unit
    pub amount: i64,
    pub customer_id: Uuid,
    pub id: Uuid,
    pub is_success: bool,
    pub merchant_id: Uuid,
    pub timestamp: DateTime<Utc>,
}

impl Record for PaymentTransaction {
    type Key = Uuid;

    fn key(&self) -> &Uuid {
        &self.id
    }
}

/// Audited customer actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HistoryAction {
    Login,
    Logout,
    Payment,
}

impl std::fmt::Display for HistoryAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let action = match self {
            HistoryAction::Login => "LOGIN",
            HistoryAction::Logout => "LOGOUT",
            HistoryAction::Payment => "PAYMENT",
        };
        f.write_str(action)
    }
}

/// An audit trail entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub action: HistoryAction,
    /// `None` when the acting customer could not be identified
    pub customer_id: Option<Uuid>,
    pub details: String,
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
}

impl Record for HistoryEntry {
    type Key = Uuid;

    fn key(&self) -> &Uuid {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_customer_reads_legacy_layout() {
        let raw = r#"{
            "Id": "6f1c1a52-1e0c-4b8a-9d53-0b8f9f1d2a11",
            "Username": "alice",
            "Password": "$2a$10$abcdefghijklmnopqrstuu5v5DrP6d5eXjvV0k9o0yVZ7hS0Q2G6e",
            "CreatedAt": "2024-11-22 12:00:00.769884426",
            "UpdatedAt": "2024-11-22 12:00:00"
        }"#;

        let customer: Customer = serde_json::from_str(raw).unwrap();
        assert_eq!(customer.username, "alice");
        assert!(customer.password_hash.starts_with("$2a$10$"));
        assert_eq!(customer.created_at.year(), 2024);
        assert_eq!(customer.created_at.hour(), 12);
        assert_eq!(customer.created_at.nanosecond(), 769_884_426);
        assert_eq!(customer.updated_at.nanosecond(), 0);
    }

    #[test]
    fn test_customer_round_trips_in_current_layout() {
        let raw = r#"{
            "created_at": "2024-11-22T12:00:00Z",
            "id": "6f1c1a52-1e0c-4b8a-9d53-0b8f9f1d2a11",
            "password_hash": "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA",
            "updated_at": "2024-11-22T13:00:00+01:00",
            "username": "alice"
        }"#;

        let customer: Customer = serde_json::from_str(raw).unwrap();
        assert_eq!(customer.created_at, customer.updated_at);

        let value = serde_json::to_value(&customer).unwrap();
        assert_eq!(value["username"], "alice");
        assert!(value.get("Username").is_none());
    }

    #[test]
    fn test_customer_rejects_unknown_timestamp() {
        let raw = r#"{
            "id": "6f1c1a52-1e0c-4b8a-9d53-0b8f9f1d2a11",
            "username": "alice",
            "password_hash": "x",
            "created_at": "22/11/2024",
            "updated_at": "2024-11-22T12:00:00Z"
        }"#;

        assert!(serde_json::from_str::<Customer>(raw).is_err());
    }
}
