//! Repository abstractions for data access.
//!
//! Repositories implement the storage traits from `fintrack-core`, hiding
//! the `SeaORM` implementation details from the rest of the application.

pub mod budget;
pub mod category;
pub mod transaction;

pub use budget::BudgetRepository;
pub use category::CategoryRepository;
pub use transaction::TransactionRepository;

use chrono::{DateTime, Utc};
use fintrack_core::FinanceError;
use rust_decimal::Decimal;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{DbErr, SqlErr};

/// Maps a database error onto the domain error taxonomy.
///
/// Unique-key and foreign-key violations become `Conflict`.
pub(crate) fn storage_error(err: DbErr) -> FinanceError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(message)) => FinanceError::Conflict(message),
        Some(SqlErr::ForeignKeyConstraintViolation(message)) => FinanceError::Conflict(message),
        _ => {
            tracing::error!(error = %err, "database operation failed");
            FinanceError::Storage(err.to_string())
        }
    }
}

/// Replaces the message of a `Conflict`, leaving other errors untouched.
pub(crate) fn describe_conflict(err: DbErr, message: impl FnOnce() -> String) -> FinanceError {
    match storage_error(err) {
        FinanceError::Conflict(_) => FinanceError::Conflict(message()),
        other => other,
    }
}

pub(crate) fn utc(timestamp: DateTimeWithTimeZone) -> DateTime<Utc> {
    timestamp.with_timezone(&Utc)
}

/// Amounts always leave the store with two decimal places, whatever the
/// backend's numeric type returned.
pub(crate) fn money(amount: Decimal) -> Decimal {
    fintrack_core::validation::with_cents(amount)
}
