//! Monthly summary arithmetic.

use rust_decimal::Decimal;

use super::types::{DuesTotals, MonthlySummary, ReportPeriod};

/// Report service for summary computation.
pub struct ReportService;

impl ReportService {
    /// Assembles the monthly summary from store aggregates.
    ///
    /// Balance is paid dues minus expenses. Missing data arrives as zeroed
    /// totals, which yields an all-zero summary rather than an error.
    #[must_use]
    pub fn build_summary(
        period: ReportPeriod,
        dues: DuesTotals,
        total_expenses: Decimal,
    ) -> MonthlySummary {
        MonthlySummary {
            month: period.month,
            year: period.year,
            total_dues: dues.total,
            total_paid: dues.paid,
            total_overdue: dues.overdue,
            total_expenses,
            balance: dues.paid - total_expenses,
            paid_count: dues.paid_count,
            pending_count: dues.pending_count,
            overdue_count: dues.overdue_count,
        }
    }
}
