use crate::domain::{Error, ExpenseSummary, Ledger};

/// Boundary to the external ledger service. The store is generic over this
/// so consumers and tests can inject their own implementation.
pub trait LedgerApi {
    /// Ledger summaries for the current user, without transaction detail.
    async fn list_ledgers(&self) -> Result<Vec<Ledger>, Error>;

    /// One ledger with its full ordered transaction list.
    async fn ledger_detail(&self, id: &str) -> Result<Ledger, Error>;

    /// Aggregate personal-expense figures.
    async fn expense_summary(&self) -> Result<ExpenseSummary, Error>;
}
