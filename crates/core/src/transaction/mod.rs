//! Income and expense transactions, listing filters, and the summary report.

pub mod filter;
pub mod service;
pub mod summary;
pub mod types;
pub mod wire;


pub use filter::{TransactionFilter, TransactionOrdering, TransactionQuery};
pub use service::TransactionService;
pub use summary::{CategoryTotal, Summary, SummaryPeriod, YearMonth, YearMonthError, summarize};
pub use types::{NewTransaction, Transaction, TransactionDetail};
pub use wire::{TransactionPatch, TransactionPayload, TransactionRecord};
