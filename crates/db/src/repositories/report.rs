//! Report repository: aggregate queries behind the monthly summary.
//!
//! Aggregation happens in the database with conditional sums; the service
//! layer only assembles the figures into a summary.

use rust_decimal::Decimal;
use sea_orm::{DatabaseConnection, DbBackend, DbErr, FromQueryResult, Statement};
use uuid::Uuid;

use konak_core::report::{DuesTotals, ExpenseBreakdown, ReportPeriod};

#[derive(Debug, FromQueryResult)]
struct DuesTotalsRow {
    total: Decimal,
    paid: Decimal,
    overdue: Decimal,
    paid_count: i64,
    pending_count: i64,
    overdue_count: i64,
}

#[derive(Debug, FromQueryResult)]
struct ExpenseTotalRow {
    total: Decimal,
}

#[derive(Debug, FromQueryResult)]
struct BreakdownRow {
    category: String,
    amount: Decimal,
    count: i64,
}

const DUES_TOTALS_SQL: &str = r"SELECT
    COALESCE(SUM(amount), 0) AS total,
    COALESCE(SUM(CASE WHEN status = 'paid' THEN amount ELSE 0 END), 0) AS paid,
    COALESCE(SUM(CASE WHEN status = 'overdue' THEN amount ELSE 0 END), 0) AS overdue,
    COUNT(*) FILTER (WHERE status = 'paid') AS paid_count,
    COUNT(*) FILTER (WHERE status = 'pending') AS pending_count,
    COUNT(*) FILTER (WHERE status = 'overdue') AS overdue_count
  FROM dues
  WHERE organization_id = $1
    AND EXTRACT(YEAR FROM due_date) = $2
    AND EXTRACT(MONTH FROM due_date) = $3";

const EXPENSE_TOTAL_SQL: &str = r"SELECT COALESCE(SUM(amount), 0) AS total
  FROM expenses
  WHERE organization_id = $1
    AND EXTRACT(YEAR FROM expense_date) = $2
    AND EXTRACT(MONTH FROM expense_date) = $3";

const EXPENSE_BREAKDOWN_SQL: &str = r"SELECT category, COALESCE(SUM(amount), 0) AS amount, COUNT(*) AS count
  FROM expenses
  WHERE organization_id = $1
    AND EXTRACT(YEAR FROM expense_date) = $2
    AND EXTRACT(MONTH FROM expense_date) = $3
  GROUP BY category
  ORDER BY amount DESC";

/// Positional parameters shared by every window aggregate.
fn period_values(organization_id: Uuid, period: ReportPeriod) -> [sea_orm::Value; 3] {
    [
        organization_id.into(),
        period.year.into(),
        i32::try_from(period.month).unwrap_or(0).into(),
    ]
}

/// Read-only repository for financial aggregates.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    db: DatabaseConnection,
}

impl ReportRepository {
    /// Creates a new report repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Aggregates dues figures for one organization and calendar window.
    ///
    /// An empty window yields all-zero totals, never NULL.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn dues_totals(
        &self,
        organization_id: Uuid,
        period: ReportPeriod,
    ) -> Result<DuesTotals, DbErr> {
        let row = DuesTotalsRow::find_by_statement(Statement::from_sql_and_values(
            DbBackend::Postgres,
            DUES_TOTALS_SQL,
            period_values(organization_id, period),
        ))
        .one(&self.db)
        .await?;

        Ok(row.map_or_else(DuesTotals::default, |r| DuesTotals {
            total: r.total,
            paid: r.paid,
            overdue: r.overdue,
            paid_count: r.paid_count,
            pending_count: r.pending_count,
            overdue_count: r.overdue_count,
        }))
    }

    /// Sums expenses for one organization and calendar window.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn expense_total(
        &self,
        organization_id: Uuid,
        period: ReportPeriod,
    ) -> Result<Decimal, DbErr> {
        let row = ExpenseTotalRow::find_by_statement(Statement::from_sql_and_values(
            DbBackend::Postgres,
            EXPENSE_TOTAL_SQL,
            period_values(organization_id, period),
        ))
        .one(&self.db)
        .await?;

        Ok(row.map_or(Decimal::ZERO, |r| r.total))
    }

    /// Groups the window's expenses by category, largest total first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn expense_breakdown(
        &self,
        organization_id: Uuid,
        period: ReportPeriod,
    ) -> Result<Vec<ExpenseBreakdown>, DbErr> {
        let rows = BreakdownRow::find_by_statement(Statement::from_sql_and_values(
            DbBackend::Postgres,
            EXPENSE_BREAKDOWN_SQL,
            period_values(organization_id, period),
        ))
        .all(&self.db)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| ExpenseBreakdown {
                category: r.category,
                amount: r.amount,
                count: r.count,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use sea_orm::Value;

    use super::{
        period_values, ReportPeriod, Uuid, DUES_TOTALS_SQL, EXPENSE_BREAKDOWN_SQL,
        EXPENSE_TOTAL_SQL,
    };

    #[test]
    fn dues_totals_default_to_zero_on_empty_window() {
        assert!(DUES_TOTALS_SQL.contains("COALESCE(SUM(amount), 0) AS total"));
        assert!(DUES_TOTALS_SQL
            .contains("COALESCE(SUM(CASE WHEN status = 'paid' THEN amount ELSE 0 END), 0)"));
        assert!(DUES_TOTALS_SQL
            .contains("COALESCE(SUM(CASE WHEN status = 'overdue' THEN amount ELSE 0 END), 0)"));
    }

    #[rstest]
    #[case("paid", "paid_count")]
    #[case("pending", "pending_count")]
    #[case("overdue", "overdue_count")]
    fn dues_totals_count_each_status(#[case] status: &str, #[case] alias: &str) {
        let clause = format!("COUNT(*) FILTER (WHERE status = '{status}') AS {alias}");
        assert!(DUES_TOTALS_SQL.contains(&clause));
    }

    #[rstest]
    #[case(DUES_TOTALS_SQL, "due_date")]
    #[case(EXPENSE_TOTAL_SQL, "expense_date")]
    #[case(EXPENSE_BREAKDOWN_SQL, "expense_date")]
    fn aggregates_scope_by_organization_and_window(#[case] sql: &str, #[case] date_column: &str) {
        assert!(sql.contains("WHERE organization_id = $1"));
        assert!(sql.contains(&format!("EXTRACT(YEAR FROM {date_column}) = $2")));
        assert!(sql.contains(&format!("EXTRACT(MONTH FROM {date_column}) = $3")));
    }

    #[test]
    fn expense_total_defaults_to_zero_on_empty_window() {
        assert!(EXPENSE_TOTAL_SQL.contains("COALESCE(SUM(amount), 0) AS total"));
    }

    #[test]
    fn breakdown_groups_by_category_largest_first() {
        assert!(EXPENSE_BREAKDOWN_SQL.contains("GROUP BY category"));
        assert!(EXPENSE_BREAKDOWN_SQL.ends_with("ORDER BY amount DESC"));
    }

    #[test]
    fn period_values_bind_org_then_year_then_month() {
        let period = ReportPeriod {
            year: 2026,
            month: 8,
        };
        let values = period_values(Uuid::nil(), period);
        assert_eq!(values[1], Value::from(2026_i32));
        assert_eq!(values[2], Value::from(8_i32));
    }
}
