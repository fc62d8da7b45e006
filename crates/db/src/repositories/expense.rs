//! Expense repository for organization spending records.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbBackend, DbErr, EntityTrait,
    FromQueryResult, QueryFilter, Set, Statement, Value,
};
use uuid::Uuid;

use konak_core::expense::CreateExpense;

use crate::entities::expenses;

/// Error types for expense operations.
#[derive(Debug, thiserror::Error)]
pub enum ExpenseRepositoryError {
    /// Expense not found in this organization.
    #[error("expense not found: {0}")]
    NotFound(Uuid),

    /// Database error.
    #[error("database error: {0}")]
    Database(#[from] DbErr),
}

/// Optional list filters on the expense date.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpenseFilter {
    /// Restrict to a calendar year.
    pub year: Option<i32>,
    /// Restrict to a calendar month.
    pub month: Option<u32>,
}

/// Builds the filtered list query with positional parameters.
///
/// A zero year or month means "no filter", same as omitting it.
fn build_list_query(organization_id: Uuid, filter: ExpenseFilter) -> (String, Vec<Value>) {
    let mut sql = String::from(
        "SELECT id, organization_id, category, amount, expense_date, description, \
         receipt_url, created_at, updated_at FROM expenses WHERE organization_id = $1",
    );
    let mut values: Vec<Value> = vec![organization_id.into()];

    if let Some(year) = filter.year.filter(|y| *y > 0) {
        values.push(year.into());
        sql.push_str(&format!(
            " AND EXTRACT(YEAR FROM expense_date) = ${}",
            values.len()
        ));
    }
    if let Some(month) = filter.month.filter(|m| *m > 0) {
        values.push(i32::try_from(month).unwrap_or(0).into());
        sql.push_str(&format!(
            " AND EXTRACT(MONTH FROM expense_date) = ${}",
            values.len()
        ));
    }

    sql.push_str(" ORDER BY expense_date DESC");
    (sql, values)
}

/// Expense repository.
#[derive(Debug, Clone)]
pub struct ExpenseRepository {
    db: DatabaseConnection,
}

impl ExpenseRepository {
    /// Creates a new expense repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records an expense for an organization.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(
        &self,
        organization_id: Uuid,
        cmd: CreateExpense,
    ) -> Result<expenses::Model, ExpenseRepositoryError> {
        let now = chrono::Utc::now().into();
        let expense = expenses::ActiveModel {
            id: Set(Uuid::new_v4()),
            organization_id: Set(organization_id),
            category: Set(cmd.category),
            amount: Set(cmd.amount),
            expense_date: Set(cmd.expense_date),
            description: Set(cmd.description),
            receipt_url: Set(cmd.receipt_url),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(expense.insert(&self.db).await?)
    }

    /// Finds an expense by ID within an organization.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(
        &self,
        organization_id: Uuid,
        id: Uuid,
    ) -> Result<Option<expenses::Model>, ExpenseRepositoryError> {
        Ok(expenses::Entity::find_by_id(id)
            .filter(expenses::Column::OrganizationId.eq(organization_id))
            .one(&self.db)
            .await?)
    }

    /// Lists expenses for an organization, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        organization_id: Uuid,
        filter: ExpenseFilter,
    ) -> Result<Vec<expenses::Model>, ExpenseRepositoryError> {
        let (sql, values) = build_list_query(organization_id, filter);
        Ok(expenses::Model::find_by_statement(Statement::from_sql_and_values(
            DbBackend::Postgres,
            sql,
            values,
        ))
        .all(&self.db)
        .await?)
    }

    /// Deletes an expense within an organization.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the expense is absent or owned by another
    /// organization.
    pub async fn delete(
        &self,
        organization_id: Uuid,
        id: Uuid,
    ) -> Result<(), ExpenseRepositoryError> {
        let result = expenses::Entity::delete_many()
            .filter(expenses::Column::Id.eq(id))
            .filter(expenses::Column::OrganizationId.eq(organization_id))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(ExpenseRepositoryError::NotFound(id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{build_list_query, ExpenseFilter, Uuid};

    #[test]
    fn unfiltered_query_orders_newest_first() {
        let (sql, values) = build_list_query(Uuid::nil(), ExpenseFilter::default());
        assert!(sql.contains("WHERE organization_id = $1"));
        assert!(sql.ends_with("ORDER BY expense_date DESC"));
        assert_eq!(values.len(), 1);
    }

    #[test]
    fn year_and_month_filters_bind_in_order() {
        let filter = ExpenseFilter {
            year: Some(2026),
            month: Some(7),
        };
        let (sql, values) = build_list_query(Uuid::nil(), filter);
        assert!(sql.contains("EXTRACT(YEAR FROM expense_date) = $2"));
        assert!(sql.contains("EXTRACT(MONTH FROM expense_date) = $3"));
        assert_eq!(values.len(), 3);
    }

    #[test]
    fn zero_period_values_are_not_filters() {
        let filter = ExpenseFilter {
            year: Some(0),
            month: Some(0),
        };
        let (sql, values) = build_list_query(Uuid::nil(), filter);
        assert!(!sql.contains("EXTRACT"));
        assert_eq!(values.len(), 1);
    }
}
