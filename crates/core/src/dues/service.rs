//! Due validation and lifecycle rules.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::error::DueError;
use super::types::{CreateBulkDues, CreateDue, DueStatus, PaymentMethod};

/// Due service for business rules.
pub struct DueService;

impl DueService {
    /// Parses a strict `YYYY-MM-DD` calendar date.
    ///
    /// The format is exact: 4-digit year, 2-digit month, 2-digit day,
    /// dash-separated. Other separators or paddings are rejected, never
    /// coerced.
    ///
    /// # Errors
    ///
    /// Returns `DueError::MissingDueDate` for an empty string and
    /// `DueError::InvalidDueDate` for anything else that does not parse.
    pub fn parse_due_date(s: &str) -> Result<NaiveDate, DueError> {
        if s.is_empty() {
            return Err(DueError::MissingDueDate);
        }

        let bytes = s.as_bytes();
        if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
            return Err(DueError::InvalidDueDate(s.to_string()));
        }

        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|_| DueError::InvalidDueDate(s.to_string()))
    }

    /// Validates a single-due creation request.
    ///
    /// # Errors
    ///
    /// Returns `DueError::NonPositiveAmount` if amount is not strictly
    /// positive, or a date error from [`Self::parse_due_date`].
    pub fn validate_create(
        unit_id: Uuid,
        amount: Decimal,
        due_date: &str,
        description: Option<String>,
    ) -> Result<CreateDue, DueError> {
        if amount <= Decimal::ZERO {
            return Err(DueError::NonPositiveAmount);
        }
        let due_date = Self::parse_due_date(due_date)?;

        Ok(CreateDue {
            unit_id,
            amount,
            due_date,
            description,
        })
    }

    /// Validates a bulk-due creation request (one row per unit).
    ///
    /// # Errors
    ///
    /// Same validation as [`Self::validate_create`] minus the unit.
    pub fn validate_bulk(
        amount: Decimal,
        due_date: &str,
        description: Option<String>,
    ) -> Result<CreateBulkDues, DueError> {
        if amount <= Decimal::ZERO {
            return Err(DueError::NonPositiveAmount);
        }
        let due_date = Self::parse_due_date(due_date)?;

        Ok(CreateBulkDues {
            amount,
            due_date,
            description,
        })
    }

    /// Resolves the payment method for a mark-paid action.
    ///
    /// A missing or empty method defaults to cash.
    ///
    /// # Errors
    ///
    /// Returns `DueError::UnknownPaymentMethod` for unrecognized values.
    pub fn resolve_payment_method(method: Option<&str>) -> Result<PaymentMethod, DueError> {
        match method {
            None | Some("") => Ok(PaymentMethod::Cash),
            Some(s) => {
                PaymentMethod::parse(s).ok_or_else(|| DueError::UnknownPaymentMethod(s.to_string()))
            }
        }
    }

    /// Parses an optional status list filter.
    ///
    /// # Errors
    ///
    /// Returns `DueError::UnknownStatus` for unrecognized values.
    pub fn parse_status_filter(status: Option<&str>) -> Result<Option<DueStatus>, DueError> {
        match status {
            None | Some("") => Ok(None),
            Some(s) => DueStatus::parse(s)
                .map(Some)
                .ok_or_else(|| DueError::UnknownStatus(s.to_string())),
        }
    }

    /// Returns true if the sweep reclassifies this due as overdue.
    ///
    /// Only pending dues strictly before the current date qualify; paid and
    /// already-overdue dues are untouched.
    #[must_use]
    pub fn is_sweep_candidate(status: DueStatus, due_date: NaiveDate, today: NaiveDate) -> bool {
        status == DueStatus::Pending && due_date < today
    }
}
