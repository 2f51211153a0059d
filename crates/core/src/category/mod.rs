//! Income and expense categories.

pub mod service;
pub mod types;
pub mod wire;

#[cfg(test)]
mod tests;

pub use service::CategoryService;
pub use types::{Category, CategoryFilter, CategoryType, NewCategory};
pub use wire::{CategoryPatch, CategoryPayload, CategoryRecord};
