use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Which action created the record. Display metadata only; balance math
/// never consults it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Added,
    Received,
}

/// One directed money transfer inside a ledger. Exactly one of the two
/// ledger participants is the sender and the other the receiver.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub amount: Decimal,
    pub sent_by: String,
    pub received_by: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    #[serde(default)]
    pub description: Option<String>,
    pub timestamp: DateTime<Utc>,
    /// Whoever created the record; decides edit and delete permission.
    pub added_by: String,
}
