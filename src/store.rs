use std::time::{Duration, Instant};

use futures::future::join_all;
use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::domain::{Error, ExpenseSummary, Ledger, LedgerApi, LedgerPatch};

/// How long a successful fetch stays trusted.
pub const CACHE_DURATION: Duration = Duration::from_secs(5 * 60);

/// Where the cache is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePhase {
    Empty,
    Loading,
    Fresh,
    Stale,
    Error,
}

/// Snapshot handed to callers: the ledger list plus the personal-expense
/// figures fetched in the same cycle.
#[derive(Debug, Clone)]
pub struct LedgerView {
    pub ledgers: Vec<Ledger>,
    pub expense_summary: ExpenseSummary,
}

#[derive(Debug, Default)]
struct CacheState {
    ledgers: Vec<Ledger>,
    expense_summary: ExpenseSummary,
    last_fetch: Option<Instant>,
    loading: bool,
    error: Option<String>,
}

/// Session-scoped ledger cache. Owns the injected [`LedgerApi`]; created
/// once at session start and shared by reference with every consumer.
///
/// All reads and writes take the state lock for the duration of the
/// operation only; network work runs outside it, so overlapping refreshes
/// resolve last-writer-wins by completion order.
#[derive(Debug)]
pub struct LedgerStore<A: LedgerApi> {
    api: A,
    cache_duration: Duration,
    state: Mutex<CacheState>,
}

impl<A: LedgerApi> LedgerStore<A> {
    pub fn new(api: A) -> Self {
        Self::with_cache_duration(api, CACHE_DURATION)
    }

    pub fn with_cache_duration(api: A, cache_duration: Duration) -> Self {
        Self {
            api,
            cache_duration,
            state: Mutex::new(CacheState::default()),
        }
    }

    /// Return the cached view, or refresh it from the network.
    ///
    /// The cache is served only when all of these hold: the call is not
    /// forced, a previous fetch succeeded, the staleness window has not
    /// elapsed, and the cached list is non-empty. A failed refresh leaves
    /// previous contents in place; stale data beats an empty screen.
    pub async fn fetch_ledgers(&self, force_refresh: bool) -> Result<LedgerView, Error> {
        {
            let mut state = self.state.lock();
            let fresh = state
                .last_fetch
                .is_some_and(|at| at.elapsed() < self.cache_duration);
            if !force_refresh && fresh && !state.ledgers.is_empty() {
                debug!("serving ledgers from cache");
                return Ok(LedgerView {
                    ledgers: state.ledgers.clone(),
                    expense_summary: state.expense_summary.clone(),
                });
            }
            state.loading = true;
            state.error = None;
        }

        let result = self.refresh().await;

        let mut state = self.state.lock();
        state.loading = false;
        match result {
            Ok(view) => {
                state.ledgers = view.ledgers.clone();
                state.expense_summary = view.expense_summary.clone();
                state.last_fetch = Some(Instant::now());
                state.error = None;
                Ok(view)
            }
            Err(e) => {
                state.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    async fn refresh(&self) -> Result<LedgerView, Error> {
        let (list, summary) = tokio::join!(self.api.list_ledgers(), self.api.expense_summary());
        let summaries = list?;

        let expense_summary = summary.unwrap_or_else(|e| {
            warn!(error = %e, "personal-expense summary fetch failed, using zeroes");
            ExpenseSummary::default()
        });

        // One detail call per ledger, fanned out. A failed detail fetch
        // keeps that ledger's snapshot balance without transactions.
        let detail_fetches = summaries.into_iter().map(|ledger| async move {
            match self.api.ledger_detail(&ledger.id).await {
                Ok(detail) => Ledger {
                    transactions: detail.transactions,
                    ..ledger
                },
                Err(e) => {
                    warn!(ledger_id = %ledger.id, error = %e, "detail fetch failed, keeping snapshot");
                    ledger
                }
            }
        });
        let mut ledgers = join_all(detail_fetches).await;

        ledgers.sort_by_key(|ledger| std::cmp::Reverse(ledger.recency()));

        Ok(LedgerView {
            ledgers,
            expense_summary,
        })
    }

    /// Merge `patch` into the matching cached ledger. Every other entry and
    /// the fetch stamp stay untouched; an unknown id is a no-op.
    pub fn update_single_ledger(&self, ledger_id: &str, patch: LedgerPatch) {
        let mut state = self.state.lock();
        if let Some(ledger) = state.ledgers.iter_mut().find(|l| l.id == ledger_id) {
            patch.apply(ledger);
        }
    }

    /// Drop the fetch stamp so the next `fetch_ledgers` goes to the
    /// network. Cached data stays readable in the meantime.
    pub fn invalidate_cache(&self) {
        self.state.lock().last_fetch = None;
    }

    /// Forced refresh for use after any mutating call, so dependent views
    /// observe the new balance without waiting out the staleness window.
    pub async fn refresh_after_transaction(&self) -> Result<LedgerView, Error> {
        self.fetch_ledgers(true).await
    }

    /// Ingest a push-delivered ledger by replacing the matching cached
    /// entry. Unknown ledgers are ignored; the next full refresh picks
    /// them up.
    pub fn apply_ledger_update(&self, ledger: Ledger) {
        let mut state = self.state.lock();
        if let Some(slot) = state.ledgers.iter_mut().find(|l| l.id == ledger.id) {
            *slot = ledger;
        }
    }

    pub fn cached(&self) -> LedgerView {
        let state = self.state.lock();
        LedgerView {
            ledgers: state.ledgers.clone(),
            expense_summary: state.expense_summary.clone(),
        }
    }

    pub fn phase(&self) -> CachePhase {
        let state = self.state.lock();
        if state.loading {
            return CachePhase::Loading;
        }
        if state.error.is_some() {
            return CachePhase::Error;
        }
        match state.last_fetch {
            None if state.ledgers.is_empty() => CachePhase::Empty,
            None => CachePhase::Stale,
            Some(at) if at.elapsed() < self.cache_duration => CachePhase::Fresh,
            Some(_) => CachePhase::Stale,
        }
    }

    pub fn last_error(&self) -> Option<String> {
        self.state.lock().error.clone()
    }
}
