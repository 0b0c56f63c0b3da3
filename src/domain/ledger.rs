use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::Transaction;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FriendProfile {
    pub name: String,
    pub mobile: String,
    #[serde(default)]
    pub avatar: Option<String>,
}

/// Running record of transfers between the current user and one friend.
///
/// `transactions` stays `None` until the detail fetch for this ledger has
/// landed; until then `balance` carries the server-computed snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ledger {
    pub id: String,
    pub friend: FriendProfile,
    #[serde(default)]
    pub transactions: Option<Vec<Transaction>>,
    #[serde(default)]
    pub balance: Decimal,
    #[serde(default)]
    pub transaction_count: u32,
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Ledger {
    /// Recency stamp used for cache ordering. `updated_at` wins over
    /// `last_updated`; a ledger with neither sorts as the epoch.
    pub fn recency(&self) -> DateTime<Utc> {
        self.updated_at
            .or(self.last_updated)
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
    }
}

/// Field-wise merge applied to a single cached ledger. Absent fields leave
/// the cached value untouched.
#[derive(Debug, Clone, Default)]
pub struct LedgerPatch {
    pub balance: Option<Decimal>,
    pub transaction_count: Option<u32>,
    pub transactions: Option<Vec<Transaction>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl LedgerPatch {
    pub fn apply(self, ledger: &mut Ledger) {
        if let Some(balance) = self.balance {
            ledger.balance = balance;
        }
        if let Some(count) = self.transaction_count {
            ledger.transaction_count = count;
        }
        if let Some(transactions) = self.transactions {
            ledger.transactions = Some(transactions);
        }
        if let Some(updated_at) = self.updated_at {
            ledger.updated_at = Some(updated_at);
        }
    }
}
