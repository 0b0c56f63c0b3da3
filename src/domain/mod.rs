pub mod balance;
pub mod error;
pub mod expense;
pub mod ledger;
pub mod mobile;
pub mod traits;
pub mod transaction;

pub use error::Error;
pub use expense::{ExpenseCategory, ExpenseSummary, NewPersonalExpense, PersonalExpense};
pub use ledger::{FriendProfile, Ledger, LedgerPatch};
pub use mobile::Mobile;
pub use traits::LedgerApi;
pub use transaction::{EntryKind, Transaction};
