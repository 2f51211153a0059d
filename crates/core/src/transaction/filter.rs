//! Query filter for transaction listings.
//!
//! Request parameters are translated into a conjunction of optional bounds.
//! A missing bound imposes no restriction; all bounds are inclusive.

use std::str::FromStr;

use chrono::NaiveDate;
use fintrack_shared::CategoryId;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_with::{NoneAsEmptyString, serde_as};

use super::types::TransactionDetail;

/// Restriction over the caller's transactions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    /// Exact category match.
    pub category: Option<CategoryId>,
    /// Earliest date, inclusive.
    pub date_from: Option<NaiveDate>,
    /// Latest date, inclusive.
    pub date_to: Option<NaiveDate>,
    /// Smallest amount, inclusive.
    pub min_amount: Option<Decimal>,
    /// Largest amount, inclusive.
    pub max_amount: Option<Decimal>,
}

impl TransactionFilter {
    /// Returns `true` when `row` satisfies every bound.
    #[must_use]
    pub fn matches(&self, row: &TransactionDetail) -> bool {
        let tx = &row.transaction;
        self.category.is_none_or(|c| tx.category_id == c)
            && self.date_from.is_none_or(|d| tx.date >= d)
            && self.date_to.is_none_or(|d| tx.date <= d)
            && self.min_amount.is_none_or(|a| tx.amount >= a)
            && self.max_amount.is_none_or(|a| tx.amount <= a)
    }
}

/// Sort order for transaction listings.
///
/// Every order breaks ties by ID descending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TransactionOrdering {
    /// Oldest date first.
    DateAsc,
    /// Newest date first.
    #[default]
    DateDesc,
    /// Smallest amount first.
    AmountAsc,
    /// Largest amount first.
    AmountDesc,
    /// Oldest ID first.
    IdAsc,
    /// Newest ID first.
    IdDesc,
}

impl FromStr for TransactionOrdering {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "date" => Ok(Self::DateAsc),
            "-date" => Ok(Self::DateDesc),
            "amount" => Ok(Self::AmountAsc),
            "-amount" => Ok(Self::AmountDesc),
            "id" => Ok(Self::IdAsc),
            "-id" => Ok(Self::IdDesc),
            other => Err(format!("unknown ordering field: {other}")),
        }
    }
}

/// Query string accepted by the transaction list endpoint.
///
/// An empty parameter such as `?min_amount=` counts as absent.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransactionQuery {
    /// Category ID.
    #[serde(default)]
    #[serde_as(as = "NoneAsEmptyString")]
    pub category: Option<CategoryId>,
    /// `YYYY-MM-DD`.
    #[serde(default)]
    #[serde_as(as = "NoneAsEmptyString")]
    pub date_from: Option<NaiveDate>,
    /// `YYYY-MM-DD`.
    #[serde(default)]
    #[serde_as(as = "NoneAsEmptyString")]
    pub date_to: Option<NaiveDate>,
    /// Decimal lower bound.
    #[serde(default)]
    #[serde_as(as = "NoneAsEmptyString")]
    pub min_amount: Option<Decimal>,
    /// Decimal upper bound.
    #[serde(default)]
    #[serde_as(as = "NoneAsEmptyString")]
    pub max_amount: Option<Decimal>,
    /// One of `date`, `amount`, `id`, optionally prefixed with `-`.
    pub ordering: Option<String>,
}

impl TransactionQuery {
    /// Splits the query into a filter and a sort order.
    ///
    /// An unrecognised `ordering` falls back to the default order.
    #[must_use]
    pub fn into_parts(self) -> (TransactionFilter, TransactionOrdering) {
        let ordering = self
            .ordering
            .as_deref()
            .and_then(|o| o.parse().ok())
            .unwrap_or_default();
        let filter = TransactionFilter {
            category: self.category,
            date_from: self.date_from,
            date_to: self.date_to,
            min_amount: self.min_amount,
            max_amount: self.max_amount,
        };
        (filter, ordering)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::CategoryType;
    use crate::transaction::Transaction;
    use chrono::Utc;
    use fintrack_shared::{TransactionId, UserId};
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn row(amount: Decimal, date: NaiveDate, category: CategoryId) -> TransactionDetail {
        TransactionDetail {
            transaction: Transaction {
                id: TransactionId::new(),
                user_id: UserId::new(),
                category_id: category,
                amount,
                date,
                description: String::new(),
                created_at: Utc::now(),
            },
            category_name: "Food".to_string(),
            category_type: CategoryType::Expense,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = TransactionFilter::default();
        assert!(filter.matches(&row(dec!(-5), date(1999, 1, 1), CategoryId::new())));
    }

    #[test]
    fn test_amount_bounds_are_inclusive() {
        let filter = TransactionFilter {
            min_amount: Some(dec!(100)),
            max_amount: Some(dec!(500)),
            ..TransactionFilter::default()
        };
        let cat = CategoryId::new();
        let day = date(2024, 1, 1);

        assert!(filter.matches(&row(dec!(100), day, cat)));
        assert!(filter.matches(&row(dec!(500), day, cat)));
        assert!(filter.matches(&row(dec!(250.50), day, cat)));
        assert!(!filter.matches(&row(dec!(99.99), day, cat)));
        assert!(!filter.matches(&row(dec!(500.01), day, cat)));
    }

    #[test]
    fn test_date_bounds_are_inclusive() {
        let filter = TransactionFilter {
            date_from: Some(date(2024, 1, 1)),
            date_to: Some(date(2024, 1, 31)),
            ..TransactionFilter::default()
        };
        let cat = CategoryId::new();

        assert!(filter.matches(&row(dec!(1), date(2024, 1, 1), cat)));
        assert!(filter.matches(&row(dec!(1), date(2024, 1, 31), cat)));
        assert!(!filter.matches(&row(dec!(1), date(2023, 12, 31), cat)));
        assert!(!filter.matches(&row(dec!(1), date(2024, 2, 1), cat)));
    }

    #[test]
    fn test_category_must_match_exactly() {
        let wanted = CategoryId::new();
        let filter = TransactionFilter {
            category: Some(wanted),
            ..TransactionFilter::default()
        };
        assert!(filter.matches(&row(dec!(1), date(2024, 1, 1), wanted)));
        assert!(!filter.matches(&row(dec!(1), date(2024, 1, 1), CategoryId::new())));
    }

    #[test]
    fn test_ordering_parse() {
        assert_eq!(
            "date".parse::<TransactionOrdering>().unwrap(),
            TransactionOrdering::DateAsc
        );
        assert_eq!(
            "-amount".parse::<TransactionOrdering>().unwrap(),
            TransactionOrdering::AmountDesc
        );
        assert!("created_at".parse::<TransactionOrdering>().is_err());
    }

    #[test]
    fn test_query_unknown_ordering_falls_back_to_default() {
        let query = TransactionQuery {
            ordering: Some("user".to_string()),
            ..TransactionQuery::default()
        };
        let (filter, ordering) = query.into_parts();
        assert_eq!(ordering, TransactionOrdering::DateDesc);
        assert_eq!(filter, TransactionFilter::default());
    }

    #[test]
    fn test_query_deserializes_string_values() {
        let query: TransactionQuery = serde_json::from_value(serde_json::json!({
            "date_from": "2024-01-01",
            "min_amount": "100",
            "ordering": "-amount"
        }))
        .unwrap();
        let (filter, ordering) = query.into_parts();
        assert_eq!(filter.date_from, Some(date(2024, 1, 1)));
        assert_eq!(filter.min_amount, Some(dec!(100)));
        assert_eq!(ordering, TransactionOrdering::AmountDesc);
    }

    #[test]
    fn test_query_empty_values_impose_no_restriction() {
        let query: TransactionQuery = serde_json::from_value(serde_json::json!({
            "category": "",
            "date_from": "",
            "date_to": "",
            "min_amount": "",
            "max_amount": "250"
        }))
        .unwrap();
        let (filter, _) = query.into_parts();
        assert_eq!(
            filter,
            TransactionFilter {
                max_amount: Some(dec!(250)),
                ..TransactionFilter::default()
            }
        );
    }

    proptest! {
        #[test]
        fn prop_amount_window_matches_iff_inside(
            lo in -100_000i64..100_000,
            width in 0i64..100_000,
            value in -200_000i64..200_000,
        ) {
            let min = Decimal::new(lo, 2);
            let max = Decimal::new(lo + width, 2);
            let amount = Decimal::new(value, 2);
            let filter = TransactionFilter {
                min_amount: Some(min),
                max_amount: Some(max),
                ..TransactionFilter::default()
            };
            let inside = amount >= min && amount <= max;
            prop_assert_eq!(filter.matches(&row(amount, date(2024, 6, 1), CategoryId::new())), inside);
        }
    }
}
