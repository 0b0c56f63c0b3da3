use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{
    Error, ExpenseSummary, Ledger, LedgerApi, NewPersonalExpense, PersonalExpense,
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP implementation of [`LedgerApi`] against the ledger service.
///
/// One bounded timeout covers every request, so a hung detail call degrades
/// into the store's per-ledger fallback instead of stalling a refresh.
#[derive(Debug, Clone)]
pub struct HttpLedgerApi {
    client: Client,
    base_url: String,
    token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LedgerListEnvelope {
    ledgers: Vec<Ledger>,
}

#[derive(Debug, Deserialize)]
struct LedgerEnvelope {
    ledger: Ledger,
}

#[derive(Debug, Deserialize)]
struct SummaryEnvelope {
    summary: ExpenseSummary,
}

#[derive(Debug, Deserialize)]
struct ExpenseListEnvelope {
    transactions: Vec<PersonalExpense>,
}

/// Request body for the ledger add/receive routes.
#[derive(Debug, Serialize)]
struct NewEntryBody<'a> {
    #[serde(with = "rust_decimal::serde::float")]
    amount: Decimal,
    description: &'a str,
}

impl HttpLedgerApi {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        let base_url: String = base_url.into();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
            token,
        }
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    fn ensure_success(url: &str, response: Response) -> Result<Response, Error> {
        if response.status().is_success() {
            Ok(response)
        } else {
            Err(Error::Api(format!("{} returned {}", url, response.status())))
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = format!("{}{}", self.base_url, path);
        let response = self.authorized(self.client.get(&url)).send().await?;
        let response = Self::ensure_success(&url, response)?;
        debug!(url = %url, "ledger API response received");
        Ok(response.json::<T>().await?)
    }

    async fn post_entry(
        &self,
        ledger_id: &str,
        route: &str,
        amount: Decimal,
        description: &str,
    ) -> Result<(), Error> {
        let url = format!("{}/ledger/{}/{}", self.base_url, ledger_id, route);
        let response = self
            .authorized(self.client.post(&url))
            .json(&NewEntryBody {
                amount,
                description,
            })
            .send()
            .await?;
        Self::ensure_success(&url, response)?;
        Ok(())
    }

    /// Record an expense the user paid on the friend's behalf.
    pub async fn add_transaction(
        &self,
        ledger_id: &str,
        amount: Decimal,
        description: &str,
    ) -> Result<(), Error> {
        self.post_entry(ledger_id, "add", amount, description).await
    }

    /// Record money received back from the friend.
    pub async fn receive_transaction(
        &self,
        ledger_id: &str,
        amount: Decimal,
        description: &str,
    ) -> Result<(), Error> {
        self.post_entry(ledger_id, "receive", amount, description)
            .await
    }

    /// Most recent personal expenses, newest first.
    pub async fn personal_expenses(&self, limit: u32) -> Result<Vec<PersonalExpense>, Error> {
        let envelope: ExpenseListEnvelope = self
            .get_json(&format!("/personal-expense/transactions?limit={limit}"))
            .await?;
        Ok(envelope.transactions)
    }

    pub async fn add_personal_expense(&self, expense: &NewPersonalExpense) -> Result<(), Error> {
        let url = format!("{}/personal-expense/add", self.base_url);
        let response = self
            .authorized(self.client.post(&url))
            .json(expense)
            .send()
            .await?;
        Self::ensure_success(&url, response)?;
        Ok(())
    }

    pub async fn update_personal_expense(
        &self,
        id: &str,
        expense: &NewPersonalExpense,
    ) -> Result<(), Error> {
        let url = format!("{}/personal-expense/{}", self.base_url, id);
        let response = self
            .authorized(self.client.put(&url))
            .json(expense)
            .send()
            .await?;
        Self::ensure_success(&url, response)?;
        Ok(())
    }

    pub async fn delete_personal_expense(&self, id: &str) -> Result<(), Error> {
        let url = format!("{}/personal-expense/{}", self.base_url, id);
        let response = self.authorized(self.client.delete(&url)).send().await?;
        Self::ensure_success(&url, response)?;
        Ok(())
    }
}

impl LedgerApi for HttpLedgerApi {
    async fn list_ledgers(&self) -> Result<Vec<Ledger>, Error> {
        let envelope: LedgerListEnvelope = self.get_json("/ledger").await?;
        Ok(envelope.ledgers)
    }

    async fn ledger_detail(&self, id: &str) -> Result<Ledger, Error> {
        let envelope: LedgerEnvelope = self.get_json(&format!("/ledger/{id}")).await?;
        Ok(envelope.ledger)
    }

    async fn expense_summary(&self) -> Result<ExpenseSummary, Error> {
        let envelope: SummaryEnvelope = self.get_json("/personal-expense/summary").await?;
        Ok(envelope.summary)
    }
}
