//! Report data types.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

/// The calendar window a report covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportPeriod {
    /// Calendar year.
    pub year: i32,
    /// Calendar month (1-12).
    pub month: u32,
}

impl ReportPeriod {
    /// Resolves the requested window, defaulting omitted or zero values to
    /// the given current date.
    #[must_use]
    pub fn resolve(year: Option<i32>, month: Option<u32>, today: NaiveDate) -> Self {
        let year = match year {
            Some(y) if y > 0 => y,
            _ => today.year(),
        };
        let month = match month {
            Some(m) if m > 0 => m,
            _ => today.month(),
        };
        Self { year, month }
    }
}

/// Aggregated dues figures for one organization and window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DuesTotals {
    /// Sum of all due amounts.
    pub total: Decimal,
    /// Sum of paid due amounts.
    pub paid: Decimal,
    /// Sum of overdue due amounts.
    pub overdue: Decimal,
    /// Number of paid dues.
    pub paid_count: i64,
    /// Number of pending dues.
    pub pending_count: i64,
    /// Number of overdue dues.
    pub overdue_count: i64,
}

/// Monthly financial summary (derived, recomputed per request).
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MonthlySummary {
    /// Calendar month.
    pub month: u32,
    /// Calendar year.
    pub year: i32,
    /// Total due amount in the window.
    pub total_dues: Decimal,
    /// Amount paid.
    pub total_paid: Decimal,
    /// Amount overdue.
    pub total_overdue: Decimal,
    /// Total expenses.
    pub total_expenses: Decimal,
    /// Paid minus expenses.
    pub balance: Decimal,
    /// Number of paid dues.
    pub paid_count: i64,
    /// Number of pending dues.
    pub pending_count: i64,
    /// Number of overdue dues.
    pub overdue_count: i64,
}

/// Per-category expense aggregate, ordered by amount descending.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ExpenseBreakdown {
    /// Cost category.
    pub category: String,
    /// Summed amount for the category.
    pub amount: Decimal,
    /// Number of expense rows in the category.
    pub count: i64,
}
