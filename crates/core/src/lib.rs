//! Core business logic for Fintrack.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Domain types, validation rules, the access policy, and the summary
//! aggregation live here. Storage is reached through the traits in
//! [`repository`].
//!
//! # Modules
//!
//! - `category` - Income and expense categories
//! - `transaction` - Transactions, listing filters, and the summary report
//! - `budget` - Monthly budgets
//! - `access` - Owner-based access policy

pub mod access;
pub mod budget;
pub mod category;
pub mod error;
pub mod repository;
pub mod transaction;
pub mod validation;

#[cfg(test)]
mod testing;

pub use error::{FinanceError, FinanceResult};
