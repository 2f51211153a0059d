//! Shared types, errors, and configuration for Fintrack.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe entity references
//! - Application-wide error types with per-field validation messages
//! - JWT claims and bearer token verification
//! - Configuration management

pub mod auth;
pub mod config;
pub mod error;
pub mod jwt;
pub mod types;

pub use auth::Claims;
pub use config::AppConfig;
pub use error::{AppError, AppResult, FieldErrors, NON_FIELD_ERRORS};
pub use jwt::{JwtConfig, JwtError, JwtService};
pub use types::{BudgetId, CategoryId, TransactionId, UserId};
