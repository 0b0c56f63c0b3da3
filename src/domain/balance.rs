//! The one balance computation every consumer shares. List views, the
//! detail view, aggregate totals and document export all go through here
//! rather than re-deriving sign handling locally.

use std::fmt;

use rust_decimal::Decimal;

use crate::domain::{Ledger, Transaction};

/// Signed net amount the user is owed across one ledger's transactions.
///
/// Positive means the counterparty owes the user, negative means the user
/// owes the counterparty. A record matching neither side contributes zero.
/// A missing list (detail not fetched yet) reconciles to zero; callers that
/// want the server snapshot in that case use [`effective_balance`].
pub fn reconcile(transactions: Option<&[Transaction]>, user: &str) -> Decimal {
    let Some(transactions) = transactions else {
        return Decimal::ZERO;
    };

    let sent: Decimal = transactions
        .iter()
        .filter(|tx| tx.sent_by == user)
        .map(|tx| tx.amount)
        .sum();
    let received: Decimal = transactions
        .iter()
        .filter(|tx| tx.received_by == user)
        .map(|tx| tx.amount)
        .sum();

    sent - received
}

/// Balance to display for a ledger. The locally computed value wins
/// whenever a non-empty transaction list is present; the server snapshot
/// can lag behind freshly created transactions and is only trusted while
/// detail is unavailable.
pub fn effective_balance(ledger: &Ledger, user: &str) -> Decimal {
    match ledger.transactions.as_deref() {
        Some(txs) if !txs.is_empty() => reconcile(Some(txs), user),
        _ => ledger.balance,
    }
}

/// Interpretation of a signed balance under the single sign convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceStanding {
    Settled,
    FriendOwes(Decimal),
    YouOwe(Decimal),
}

impl BalanceStanding {
    pub fn of(balance: Decimal) -> Self {
        if balance.is_zero() {
            BalanceStanding::Settled
        } else if balance > Decimal::ZERO {
            BalanceStanding::FriendOwes(balance)
        } else {
            BalanceStanding::YouOwe(-balance)
        }
    }
}

impl fmt::Display for BalanceStanding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BalanceStanding::Settled => write!(f, "All settled"),
            BalanceStanding::FriendOwes(amount) => write!(f, "Friend owes you ₹{amount}"),
            BalanceStanding::YouOwe(amount) => write!(f, "You owe friend ₹{amount}"),
        }
    }
}

/// Aggregate of effective balances across all ledgers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    /// Sum of balances where friends owe the user.
    pub you_get: Decimal,
    /// Magnitude sum of balances where the user owes friends.
    pub you_give: Decimal,
}

impl Totals {
    pub fn net(&self) -> Decimal {
        self.you_get - self.you_give
    }
}

pub fn totals<'a, I>(ledgers: I, user: &str) -> Totals
where
    I: IntoIterator<Item = &'a Ledger>,
{
    let mut totals = Totals::default();
    for ledger in ledgers {
        let balance = effective_balance(ledger, user);
        if balance > Decimal::ZERO {
            totals.you_get += balance;
        } else {
            totals.you_give += -balance;
        }
    }
    totals
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;

    use super::*;
    use crate::domain::{EntryKind, FriendProfile, Transaction};

    const ME: &str = "9876543210";
    const FRIEND: &str = "1234567890";

    fn tx(sent_by: &str, received_by: &str, amount: i64) -> Transaction {
        Transaction {
            id: format!("{sent_by}->{received_by}:{amount}"),
            amount: Decimal::from(amount),
            sent_by: sent_by.to_owned(),
            received_by: received_by.to_owned(),
            kind: EntryKind::Added,
            description: None,
            timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
            added_by: sent_by.to_owned(),
        }
    }

    fn ledger(balance: i64, transactions: Option<Vec<Transaction>>) -> Ledger {
        Ledger {
            id: "l1".to_owned(),
            friend: FriendProfile {
                name: "Asha".to_owned(),
                mobile: FRIEND.to_owned(),
                avatar: None,
            },
            transactions,
            balance: Decimal::from(balance),
            transaction_count: 0,
            last_updated: None,
            updated_at: None,
        }
    }

    #[test]
    fn nets_sent_against_received() {
        let txs = vec![tx(ME, FRIEND, 100), tx(FRIEND, ME, 40)];
        assert_eq!(reconcile(Some(&txs), ME), Decimal::from(60));
        assert_eq!(reconcile(Some(&txs), FRIEND), Decimal::from(-60));
    }

    #[test]
    fn missing_or_empty_list_is_zero() {
        assert_eq!(reconcile(None, ME), Decimal::ZERO);
        assert_eq!(reconcile(Some(&[]), ME), Decimal::ZERO);
    }

    #[test]
    fn order_does_not_matter() {
        let mut txs = vec![
            tx(ME, FRIEND, 100),
            tx(FRIEND, ME, 40),
            tx(ME, FRIEND, 25),
            tx(FRIEND, ME, 5),
        ];
        let forward = reconcile(Some(&txs), ME);
        txs.reverse();
        assert_eq!(reconcile(Some(&txs), ME), forward);
        assert_eq!(forward, Decimal::from(80));
    }

    #[test]
    fn unrelated_parties_contribute_zero() {
        let txs = vec![tx(ME, FRIEND, 100), tx("5550001111", "5550002222", 999)];
        assert_eq!(reconcile(Some(&txs), ME), Decimal::from(100));
    }

    #[test]
    fn computed_balance_wins_over_snapshot() {
        let fetched = ledger(10, Some(vec![tx(ME, FRIEND, 100), tx(FRIEND, ME, 40)]));
        assert_eq!(effective_balance(&fetched, ME), Decimal::from(60));
    }

    #[test]
    fn snapshot_used_when_detail_unavailable() {
        assert_eq!(effective_balance(&ledger(35, None), ME), Decimal::from(35));
        assert_eq!(
            effective_balance(&ledger(0, Some(vec![])), ME),
            Decimal::ZERO
        );
    }

    #[test]
    fn standing_labels_follow_sign() {
        assert_eq!(
            BalanceStanding::of(Decimal::ZERO).to_string(),
            "All settled"
        );
        assert_eq!(
            BalanceStanding::of(Decimal::from(60)).to_string(),
            "Friend owes you ₹60"
        );
        assert_eq!(
            BalanceStanding::of(Decimal::from(-25)).to_string(),
            "You owe friend ₹25"
        );
    }

    #[test]
    fn totals_split_by_sign() {
        let ledgers = vec![
            ledger(0, Some(vec![tx(ME, FRIEND, 100)])),
            ledger(-30, None),
            ledger(0, None),
        ];
        let totals = totals(&ledgers, ME);
        assert_eq!(totals.you_get, Decimal::from(100));
        assert_eq!(totals.you_give, Decimal::from(30));
        assert_eq!(totals.net(), Decimal::from(70));
    }
}
