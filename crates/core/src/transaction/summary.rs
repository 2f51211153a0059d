//! Income/expense totals and the per-category expense breakdown.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use super::filter::TransactionFilter;
use super::types::TransactionDetail;
use crate::category::CategoryType;

/// A calendar month written as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

/// Why a `YYYY-MM` string was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum YearMonthError {
    /// Not two dash-separated numbers.
    #[error("expected YYYY-MM, got {0:?}")]
    Format(String),
    /// Month outside 1..=12 or year outside the calendar range.
    #[error("{0:?} is not a calendar month")]
    OutOfRange(String),
}

impl YearMonth {
    /// Creates a month, or `None` if it is not a calendar month.
    #[must_use]
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self { year, month })
    }

    /// First day of the month.
    #[must_use]
    pub fn first_day(self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// Last day of the month.
    #[must_use]
    pub fn last_day(self) -> NaiveDate {
        let first = self.first_day();
        first
            .checked_add_months(chrono::Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(NaiveDate::MAX)
    }

    /// A filter selecting exactly the days of this month.
    #[must_use]
    pub fn as_filter(self) -> TransactionFilter {
        TransactionFilter {
            date_from: Some(self.first_day()),
            date_to: Some(self.last_day()),
            ..TransactionFilter::default()
        }
    }
}

/// Span of transactions a summary covers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SummaryPeriod {
    /// Every transaction.
    #[default]
    AllTime,
    /// One calendar month.
    Month(YearMonth),
    /// A numeric year and month that is not on the calendar, such as
    /// `2024-13`. No transaction falls inside it.
    OffCalendar,
}

impl SummaryPeriod {
    /// Filter selecting the period's transactions, or `None` when no
    /// transaction can match.
    #[must_use]
    pub fn filter(self) -> Option<TransactionFilter> {
        match self {
            Self::AllTime => Some(TransactionFilter::default()),
            Self::Month(month) => Some(month.as_filter()),
            Self::OffCalendar => None,
        }
    }
}

impl FromStr for YearMonth {
    type Err = YearMonthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| YearMonthError::Format(s.to_string()))?;
        let year: i64 = year
            .parse()
            .map_err(|_| YearMonthError::Format(s.to_string()))?;
        let month: i64 = month
            .parse()
            .map_err(|_| YearMonthError::Format(s.to_string()))?;
        let out_of_range = || YearMonthError::OutOfRange(s.to_string());
        let year = i32::try_from(year).map_err(|_| out_of_range())?;
        let month = u32::try_from(month).map_err(|_| out_of_range())?;
        Self::new(year, month).ok_or_else(out_of_range)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Total spent in one expense category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    /// Category name.
    pub category_name: String,
    /// Sum of amounts.
    pub total: Decimal,
}

/// Result of the summary aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Sum over income categories.
    pub total_income: Decimal,
    /// Sum over expense categories.
    pub total_expenses: Decimal,
    /// `total_income - total_expenses`.
    pub balance: Decimal,
    /// Expense totals per category name, largest first.
    pub expenses_by_category: Vec<CategoryTotal>,
}

/// Aggregates `rows` into income/expense totals and an expense breakdown.
#[must_use]
pub fn summarize(rows: &[TransactionDetail]) -> Summary {
    let mut total_income = Decimal::ZERO;
    let mut total_expenses = Decimal::ZERO;
    let mut by_name: HashMap<&str, Decimal> = HashMap::new();

    for row in rows {
        let amount = row.transaction.amount;
        match row.category_type {
            CategoryType::Income => total_income += amount,
            CategoryType::Expense => {
                total_expenses += amount;
                *by_name.entry(row.category_name.as_str()).or_default() += amount;
            }
        }
    }

    let mut expenses_by_category: Vec<CategoryTotal> = by_name
        .into_iter()
        .map(|(name, total)| CategoryTotal {
            category_name: name.to_string(),
            total,
        })
        .collect();
    expenses_by_category.sort_by(|a, b| {
        b.total
            .cmp(&a.total)
            .then_with(|| a.category_name.cmp(&b.category_name))
    });

    Summary {
        total_income,
        total_expenses,
        balance: total_income - total_expenses,
        expenses_by_category,
    }
}

#[cfg(test)]
#[path = "summary_tests.rs"]
mod tests;
