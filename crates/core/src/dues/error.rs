//! Due error types.

use thiserror::Error;

/// Due-related validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DueError {
    /// Amount must be strictly positive.
    #[error("amount must be greater than zero")]
    NonPositiveAmount,

    /// Due date is missing.
    #[error("due_date is required")]
    MissingDueDate,

    /// Due date is not a valid YYYY-MM-DD calendar date.
    #[error("invalid due_date format, use YYYY-MM-DD")]
    InvalidDueDate(String),

    /// Unknown payment method.
    #[error("unknown payment method: {0}")]
    UnknownPaymentMethod(String),

    /// Unknown due status in a list filter.
    #[error("unknown due status: {0}")]
    UnknownStatus(String),
}
