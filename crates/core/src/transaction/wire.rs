//! Wire representation of transactions.

use chrono::NaiveDate;
use fintrack_shared::{CategoryId, TransactionId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::TransactionDetail;
use crate::category::CategoryType;

/// Body of a create or full update. The owner is never read from the client.
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionPayload {
    /// Calendar date.
    pub date: NaiveDate,
    /// Category ID.
    pub category: CategoryId,
    /// Signed amount.
    pub amount: Decimal,
    /// Free text.
    #[serde(default)]
    pub description: String,
}

/// Body of a partial update.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransactionPatch {
    /// New date.
    pub date: Option<NaiveDate>,
    /// New category.
    pub category: Option<CategoryId>,
    /// New amount.
    pub amount: Option<Decimal>,
    /// New description.
    pub description: Option<String>,
}

impl From<TransactionPayload> for TransactionPatch {
    fn from(payload: TransactionPayload) -> Self {
        Self {
            date: Some(payload.date),
            category: Some(payload.category),
            amount: Some(payload.amount),
            description: Some(payload.description),
        }
    }
}

/// Transaction as returned to clients.
///
/// `category_name` and `category_type` are read from the related category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionRecord {
    /// Transaction ID.
    pub id: TransactionId,
    /// Calendar date.
    pub date: NaiveDate,
    /// Category ID.
    pub category: CategoryId,
    /// Name of the category.
    pub category_name: String,
    /// Type of the category.
    pub category_type: CategoryType,
    /// Signed amount.
    pub amount: Decimal,
    /// Free text.
    pub description: String,
}

impl From<TransactionDetail> for TransactionRecord {
    fn from(detail: TransactionDetail) -> Self {
        let tx = detail.transaction;
        Self {
            id: tx.id,
            date: tx.date,
            category: tx.category_id,
            category_name: detail.category_name,
            category_type: detail.category_type,
            amount: tx.amount,
            description: tx.description,
        }
    }
}
