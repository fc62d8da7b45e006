//! Due repository for lifecycle database operations.
//!
//! Single-row writes go through `SeaORM` active models; the set-based
//! operations (bulk create, overdue sweep) and the display listing are one
//! parameterized SQL statement each, atomic at the store level.

use chrono::{DateTime, FixedOffset, NaiveDate};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbBackend, DbErr,
    EntityTrait, FromQueryResult, QueryFilter, Set, Statement, Value,
};
use serde::Serialize;
use uuid::Uuid;

use konak_core::dues::{CreateBulkDues, CreateDue, DueStatus, PaymentMethod};

use crate::entities::{dues, sea_orm_active_enums, units};

/// Error types for due operations.
#[derive(Debug, thiserror::Error)]
pub enum DueRepositoryError {
    /// Due not found in this organization.
    #[error("due not found: {0}")]
    NotFound(Uuid),

    /// Target unit does not belong to this organization.
    #[error("unit not found in organization: {0}")]
    UnitNotFound(Uuid),

    /// Database error.
    #[error("database error: {0}")]
    Database(#[from] DbErr),
}

/// Optional list filters; all apply independently.
#[derive(Debug, Clone, Copy, Default)]
pub struct DueFilter {
    /// Restrict to one lifecycle status.
    pub status: Option<DueStatus>,
    /// Restrict to a calendar year of the due date.
    pub year: Option<i32>,
    /// Restrict to a calendar month of the due date.
    pub month: Option<u32>,
}

/// A due joined with unit number and resident name for display.
#[derive(Debug, Clone, Serialize, FromQueryResult)]
pub struct DueWithDetails {
    /// Due ID.
    pub id: Uuid,
    /// Owning organization.
    pub organization_id: Uuid,
    /// Owning unit.
    pub unit_id: Uuid,
    /// Unit number for display.
    pub unit_number: String,
    /// Resident full name for display (empty when unassigned).
    pub resident_name: String,
    /// Charge amount.
    pub amount: Decimal,
    /// Calendar due date.
    pub due_date: NaiveDate,
    /// Lifecycle status (`pending`, `paid`, `overdue`).
    pub status: String,
    /// When the due was paid, if paid.
    pub paid_at: Option<DateTime<FixedOffset>>,
    /// How the due was paid, if paid.
    pub payment_method: Option<String>,
    /// Free-text description.
    pub description: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<FixedOffset>,
    /// Last update timestamp.
    pub updated_at: DateTime<FixedOffset>,
}

const DETAILS_SELECT: &str = r"
SELECT d.id, d.organization_id, d.unit_id,
    COALESCE(u.unit_number, '') AS unit_number,
    COALESCE(r.full_name, '') AS resident_name,
    d.amount, d.due_date, d.status::TEXT AS status, d.paid_at,
    d.payment_method::TEXT AS payment_method, d.description,
    d.created_at, d.updated_at
FROM dues d
LEFT JOIN units u ON d.unit_id = u.id
LEFT JOIN residents r ON u.resident_id = r.id";

/// Builds the filtered list query with positional parameters.
///
/// A zero year or month means "no filter", same as omitting it.
fn build_list_query(organization_id: Uuid, filter: DueFilter) -> (String, Vec<Value>) {
    let mut sql = format!("{DETAILS_SELECT}\nWHERE d.organization_id = $1");
    let mut values: Vec<Value> = vec![organization_id.into()];

    if let Some(status) = filter.status {
        values.push(status.as_str().into());
        sql.push_str(&format!(" AND d.status = ${}::due_status", values.len()));
    }
    if let Some(year) = filter.year.filter(|y| *y > 0) {
        values.push(year.into());
        sql.push_str(&format!(
            " AND EXTRACT(YEAR FROM d.due_date) = ${}",
            values.len()
        ));
    }
    if let Some(month) = filter.month.filter(|m| *m > 0) {
        values.push(i32::try_from(month).unwrap_or(0).into());
        sql.push_str(&format!(
            " AND EXTRACT(MONTH FROM d.due_date) = ${}",
            values.len()
        ));
    }

    sql.push_str(" ORDER BY d.due_date DESC, u.unit_number ASC");
    (sql, values)
}

/// Due repository for lifecycle operations.
#[derive(Debug, Clone)]
pub struct DueRepository {
    db: DatabaseConnection,
}

impl DueRepository {
    /// Creates a new due repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a single pending due for a unit.
    ///
    /// The unit must belong to the given organization; the tenant boundary
    /// is checked here rather than trusting the caller's pairing.
    ///
    /// # Errors
    ///
    /// Returns `UnitNotFound` if the unit is absent or owned by another
    /// organization.
    pub async fn create(
        &self,
        organization_id: Uuid,
        cmd: CreateDue,
    ) -> Result<dues::Model, DueRepositoryError> {
        let unit = units::Entity::find_by_id(cmd.unit_id)
            .filter(units::Column::OrganizationId.eq(organization_id))
            .one(&self.db)
            .await?;
        if unit.is_none() {
            return Err(DueRepositoryError::UnitNotFound(cmd.unit_id));
        }

        let now = chrono::Utc::now().into();
        let due = dues::ActiveModel {
            id: Set(Uuid::new_v4()),
            organization_id: Set(organization_id),
            unit_id: Set(cmd.unit_id),
            amount: Set(cmd.amount),
            due_date: Set(cmd.due_date),
            status: Set(sea_orm_active_enums::DueStatus::Pending),
            paid_at: Set(None),
            payment_method: Set(None),
            description: Set(cmd.description),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(due.insert(&self.db).await?)
    }

    /// Creates one pending due per unit of the organization.
    ///
    /// One set-based insert, atomic by construction. An organization with
    /// zero units yields zero rows, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the database statement fails.
    pub async fn bulk_create(
        &self,
        organization_id: Uuid,
        cmd: CreateBulkDues,
    ) -> Result<u64, DueRepositoryError> {
        let result = self
            .db
            .execute(Statement::from_sql_and_values(
                DbBackend::Postgres,
                r"INSERT INTO dues (organization_id, unit_id, amount, due_date, status, description)
                  SELECT $1, u.id, $2, $3, 'pending', $4
                  FROM units u WHERE u.organization_id = $1",
                [
                    organization_id.into(),
                    cmd.amount.into(),
                    cmd.due_date.into(),
                    cmd.description.into(),
                ],
            ))
            .await?;

        Ok(result.rows_affected())
    }

    /// Finds a due by ID within an organization, with display details.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_with_details(
        &self,
        organization_id: Uuid,
        id: Uuid,
    ) -> Result<Option<DueWithDetails>, DueRepositoryError> {
        let sql = format!("{DETAILS_SELECT}\nWHERE d.id = $1 AND d.organization_id = $2");
        Ok(DueWithDetails::find_by_statement(Statement::from_sql_and_values(
            DbBackend::Postgres,
            sql,
            [id.into(), organization_id.into()],
        ))
        .one(&self.db)
        .await?)
    }

    /// Lists dues for an organization with optional filters.
    ///
    /// Ordered by due date descending, then unit number ascending.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        organization_id: Uuid,
        filter: DueFilter,
    ) -> Result<Vec<DueWithDetails>, DueRepositoryError> {
        let (sql, values) = build_list_query(organization_id, filter);
        Ok(DueWithDetails::find_by_statement(Statement::from_sql_and_values(
            DbBackend::Postgres,
            sql,
            values,
        ))
        .all(&self.db)
        .await?)
    }

    /// Lists overdue dues for an organization.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_overdue(
        &self,
        organization_id: Uuid,
    ) -> Result<Vec<DueWithDetails>, DueRepositoryError> {
        self.list(
            organization_id,
            DueFilter {
                status: Some(DueStatus::Overdue),
                ..DueFilter::default()
            },
        )
        .await
    }

    /// Marks a due as paid with the given payment method.
    ///
    /// One UPDATE scoped by (id, organization). Re-invoking re-stamps
    /// `paid_at`; there is no guard against double payment.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the due is absent or owned by another
    /// organization.
    pub async fn mark_paid(
        &self,
        organization_id: Uuid,
        id: Uuid,
        method: PaymentMethod,
    ) -> Result<(), DueRepositoryError> {
        let result = self
            .db
            .execute(Statement::from_sql_and_values(
                DbBackend::Postgres,
                r"UPDATE dues
                  SET status = 'paid', paid_at = now(),
                      payment_method = $1::payment_method, updated_at = now()
                  WHERE id = $2 AND organization_id = $3",
                [method.as_str().into(), id.into(), organization_id.into()],
            ))
            .await?;

        if result.rows_affected() == 0 {
            return Err(DueRepositoryError::NotFound(id));
        }
        Ok(())
    }

    /// Reclassifies every lapsed pending due as overdue.
    ///
    /// One UPDATE across all organizations, atomic as a unit and
    /// idempotent: re-running with the same clock state affects the same
    /// rows or fewer. Invoked on demand by an external scheduler.
    ///
    /// # Errors
    ///
    /// Returns an error if the database statement fails.
    pub async fn sweep_overdue(&self) -> Result<u64, DueRepositoryError> {
        let result = self
            .db
            .execute(Statement::from_string(
                DbBackend::Postgres,
                "UPDATE dues SET status = 'overdue', updated_at = now()
                 WHERE status = 'pending' AND due_date < CURRENT_DATE",
            ))
            .await?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{build_list_query, DueFilter, DueStatus, Uuid, Value};

    fn org() -> Uuid {
        Uuid::nil()
    }

    #[test]
    fn unfiltered_query_scopes_by_organization_only() {
        let (sql, values) = build_list_query(org(), DueFilter::default());
        assert!(sql.contains("WHERE d.organization_id = $1"));
        assert!(!sql.contains("$2"));
        assert!(sql.ends_with("ORDER BY d.due_date DESC, u.unit_number ASC"));
        assert_eq!(values.len(), 1);
    }

    #[rstest]
    #[case(DueStatus::Pending, "pending")]
    #[case(DueStatus::Paid, "paid")]
    #[case(DueStatus::Overdue, "overdue")]
    fn status_filter_binds_enum_cast(#[case] status: DueStatus, #[case] expected: &str) {
        let filter = DueFilter {
            status: Some(status),
            ..DueFilter::default()
        };
        let (sql, values) = build_list_query(org(), filter);
        assert!(sql.contains("AND d.status = $2::due_status"));
        assert_eq!(values[1], Value::from(expected));
    }

    #[test]
    fn period_filters_number_parameters_in_order() {
        let filter = DueFilter {
            status: Some(DueStatus::Paid),
            year: Some(2026),
            month: Some(3),
        };
        let (sql, values) = build_list_query(org(), filter);
        assert!(sql.contains("d.status = $2::due_status"));
        assert!(sql.contains("EXTRACT(YEAR FROM d.due_date) = $3"));
        assert!(sql.contains("EXTRACT(MONTH FROM d.due_date) = $4"));
        assert_eq!(values.len(), 4);
        assert_eq!(values[2], Value::from(2026_i32));
        assert_eq!(values[3], Value::from(3_i32));
    }

    #[test]
    fn month_without_year_still_applies() {
        let filter = DueFilter {
            month: Some(12),
            ..DueFilter::default()
        };
        let (sql, values) = build_list_query(org(), filter);
        assert!(!sql.contains("YEAR"));
        assert!(sql.contains("EXTRACT(MONTH FROM d.due_date) = $2"));
        assert_eq!(values.len(), 2);
    }

    #[test]
    fn zero_period_values_are_not_filters() {
        let filter = DueFilter {
            year: Some(0),
            month: Some(0),
            ..DueFilter::default()
        };
        let (sql, values) = build_list_query(org(), filter);
        assert!(!sql.contains("EXTRACT"));
        assert!(!sql.contains("$2"));
        assert_eq!(values.len(), 1);
    }

    #[test]
    fn zero_month_keeps_year_filter() {
        let filter = DueFilter {
            year: Some(2026),
            month: Some(0),
            ..DueFilter::default()
        };
        let (sql, values) = build_list_query(org(), filter);
        assert!(sql.contains("EXTRACT(YEAR FROM d.due_date) = $2"));
        assert!(!sql.contains("MONTH"));
        assert_eq!(values.len(), 2);
    }
}
