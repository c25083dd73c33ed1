//! The module contains the errors the engine can return.
//!
//! Only the [`Ledger`] store returns errors: every function in
//! [`aggregate`] is total over its inputs.
//!
//! - [`KeyNotFound`] returned when an id or label is not present.
//! - [`ExistingKey`] returned when a label would be duplicated.
//! - [`ProtectedCategory`] returned when the fallback category is renamed or
//!   removed.
//!
//!  [`Ledger`]: crate::Ledger
//!  [`aggregate`]: crate::aggregate
//!  [`KeyNotFound`]: EngineError::KeyNotFound
//!  [`ExistingKey`]: EngineError::ExistingKey
//!  [`ProtectedCategory`]: EngineError::ProtectedCategory
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("\"{0}\" already present!")]
    ExistingKey(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid name: {0}")]
    InvalidName(String),
    #[error("Invalid transaction: {0}")]
    InvalidTransaction(String),
    #[error("Invalid card: {0}")]
    InvalidCard(String),
    #[error("\"{0}\" is a protected category")]
    ProtectedCategory(String),
    #[error("Unsupported currency: {0}")]
    UnsupportedCurrency(String),
}
