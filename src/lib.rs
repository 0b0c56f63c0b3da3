//! Client core for a shared-expense ledger service: typed records, the
//! consolidated balance reconciliation, and a session-scoped ledger cache
//! fed by the service's HTTP API.

pub mod api;
pub mod domain;
pub mod store;
