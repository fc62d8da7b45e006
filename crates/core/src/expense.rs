//! Expense validation and category vocabulary.
//!
//! Categories are a UI vocabulary, not a closed enum: the data layer
//! persists free text so sites can add their own cost kinds.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::dues::DueService;

/// Well-known expense categories used by the UI.
pub const KNOWN_CATEGORIES: [&str; 6] = [
    "maintenance",
    "cleaning",
    "electricity",
    "water",
    "elevator",
    "other",
];

/// Expense-related validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExpenseError {
    /// Category is required.
    #[error("category is required")]
    MissingCategory,

    /// Amount must be strictly positive.
    #[error("amount must be greater than zero")]
    NonPositiveAmount,

    /// Date is not a valid YYYY-MM-DD calendar date.
    #[error("invalid date format, use YYYY-MM-DD")]
    InvalidDate(String),
}

/// Validated command to record an expense.
#[derive(Debug, Clone)]
pub struct CreateExpense {
    /// Cost category (free text).
    pub category: String,
    /// Expense amount (strictly positive).
    pub amount: Decimal,
    /// Calendar date the cost was incurred.
    pub expense_date: NaiveDate,
    /// Free-text description.
    pub description: Option<String>,
    /// Optional receipt reference.
    pub receipt_url: Option<String>,
}

/// Validates an expense creation request.
///
/// # Errors
///
/// Returns `ExpenseError::MissingCategory` for an empty category,
/// `ExpenseError::NonPositiveAmount` for a non-positive amount, and
/// `ExpenseError::InvalidDate` for a malformed date.
pub fn validate_create(
    category: &str,
    amount: Decimal,
    date: &str,
    description: Option<String>,
    receipt_url: Option<String>,
) -> Result<CreateExpense, ExpenseError> {
    if category.trim().is_empty() {
        return Err(ExpenseError::MissingCategory);
    }
    if amount <= Decimal::ZERO {
        return Err(ExpenseError::NonPositiveAmount);
    }

    // Same strict calendar-date format as dues.
    let expense_date =
        DueService::parse_due_date(date).map_err(|_| ExpenseError::InvalidDate(date.to_string()))?;

    Ok(CreateExpense {
        category: category.trim().to_string(),
        amount,
        expense_date,
        description,
        receipt_url,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_valid_expense() {
        let cmd = validate_create("cleaning", dec!(50), "2024-03-10", None, None).unwrap();
        assert_eq!(cmd.category, "cleaning");
        assert_eq!(cmd.amount, dec!(50));
    }

    #[test]
    fn test_known_categories_validate() {
        for category in KNOWN_CATEGORIES {
            assert!(validate_create(category, dec!(10), "2024-03-10", None, None).is_ok());
        }
    }

    #[test]
    fn test_custom_category_allowed() {
        // Free text is persisted; the vocabulary is not enforced.
        let cmd = validate_create("gardening", dec!(75), "2024-03-10", None, None).unwrap();
        assert_eq!(cmd.category, "gardening");
    }

    #[test]
    fn test_empty_category_rejected() {
        let result = validate_create("  ", dec!(50), "2024-03-10", None, None);
        assert_eq!(result.unwrap_err(), ExpenseError::MissingCategory);
    }

    #[test]
    fn test_non_positive_amount_rejected() {
        let result = validate_create("water", dec!(0), "2024-03-10", None, None);
        assert_eq!(result.unwrap_err(), ExpenseError::NonPositiveAmount);
    }

    #[test]
    fn test_malformed_date_rejected() {
        let result = validate_create("water", dec!(20), "2024/03/10", None, None);
        assert!(matches!(result, Err(ExpenseError::InvalidDate(_))));
    }
}
