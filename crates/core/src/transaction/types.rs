//! Transaction records.

use chrono::{DateTime, NaiveDate, Utc};
use fintrack_shared::{CategoryId, TransactionId, UserId};
use rust_decimal::Decimal;

use crate::access::Owned;
use crate::category::CategoryType;

/// A single income or expense entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    /// Transaction ID.
    pub id: TransactionId,
    /// Owner.
    pub user_id: UserId,
    /// Category, owned by the same user.
    pub category_id: CategoryId,
    /// Signed amount.
    pub amount: Decimal,
    /// Calendar date of the entry.
    pub date: NaiveDate,
    /// Free text, possibly empty.
    pub description: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Owned for Transaction {
    fn owner(&self) -> UserId {
        self.user_id
    }
}

/// A transaction joined with the name and type of its category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionDetail {
    /// The stored transaction.
    pub transaction: Transaction,
    /// Name of the referenced category.
    pub category_name: String,
    /// Type of the referenced category.
    pub category_type: CategoryType,
}

impl Owned for TransactionDetail {
    fn owner(&self) -> UserId {
        self.transaction.user_id
    }
}

/// Input for inserting a transaction.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    /// Owner, always the authenticated caller.
    pub user_id: UserId,
    /// Category, already checked to belong to the owner.
    pub category_id: CategoryId,
    /// Signed amount.
    pub amount: Decimal,
    /// Calendar date.
    pub date: NaiveDate,
    /// Free text.
    pub description: String,
}
