/// Customers: array of Customer
pub const CUSTOMERS: &str = "Customer.json";

/// Merchants: array of Merchant
pub const MERCHANTS: &str = "Merchant.json";

/// Payments: array of PaymentTransaction
pub const PAYMENT_TRANSACTIONS: &str = "PaymentTransactions.json";

/// Audit trail: array of HistoryEntry
pub const HISTORY: &str = "History.json";

/// Revoked session tokens: array of bare token strings
pub const BLACKLIST_TOKENS: &str = "BlacklistToken.json";
