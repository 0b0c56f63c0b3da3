use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Aggregate spend figures returned by the personal-expense service.
/// `Default` is the all-zero summary, used when the summary fetch fails.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExpenseSummary {
    pub today: Decimal,
    pub yesterday: Decimal,
    pub last_week: Decimal,
    pub last_month: Decimal,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseCategory {
    Food,
    Travel,
    Shopping,
    Bills,
    Entertainment,
    Health,
    Education,
    #[default]
    Other,
}

/// A categorized personal expense, unrelated to any friend ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalExpense {
    #[serde(rename = "_id")]
    pub id: String,
    pub amount: Decimal,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: ExpenseCategory,
    pub date: DateTime<Utc>,
}

/// Request body for creating or replacing a personal expense.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPersonalExpense {
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub description: String,
    pub category: ExpenseCategory,
    pub date: NaiveDate,
}
