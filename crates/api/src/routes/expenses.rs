//! Expense management routes, nested under an organization.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{delete, get, post},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{error, info};
use uuid::Uuid;

use crate::{AppState, middleware::AuthUser, response, routes::load_managed_org};
use konak_core::expense;
use konak_db::{
    ExpenseRepository,
    repositories::{ExpenseFilter, ExpenseRepositoryError},
};
use konak_shared::AppError;

/// Request to record an expense.
#[derive(Debug, Deserialize)]
pub struct CreateExpenseRequest {
    /// Cost category (free text).
    pub category: String,
    /// Amount spent.
    pub amount: Decimal,
    /// Expense date as `YYYY-MM-DD`.
    pub expense_date: String,
    /// Optional description.
    pub description: Option<String>,
    /// Optional receipt reference.
    pub receipt_url: Option<String>,
}

/// List filters accepted as query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct ListExpensesQuery {
    /// Calendar year of the expense date.
    pub year: Option<i32>,
    /// Calendar month of the expense date.
    pub month: Option<u32>,
}

/// Creates the expenses router (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/organizations/{org_id}/expenses", post(create_expense))
        .route("/organizations/{org_id}/expenses", get(list_expenses))
        .route(
            "/organizations/{org_id}/expenses/{expense_id}",
            get(get_expense),
        )
        .route(
            "/organizations/{org_id}/expenses/{expense_id}",
            delete(delete_expense),
        )
}

/// POST `/organizations/{org_id}/expenses` - Record an expense.
async fn create_expense(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(org_id): Path<Uuid>,
    Json(payload): Json<CreateExpenseRequest>,
) -> impl IntoResponse {
    if let Err(resp) = load_managed_org(&state, org_id, &auth).await {
        return resp;
    }

    let cmd = match expense::validate_create(
        &payload.category,
        payload.amount,
        &payload.expense_date,
        payload.description,
        payload.receipt_url,
    ) {
        Ok(c) => c,
        Err(e) => return response::failure(&AppError::Validation(e.to_string())),
    };

    let expense_repo = ExpenseRepository::new((*state.db).clone());

    match expense_repo.create(org_id, cmd).await {
        Ok(row) => {
            info!(expense_id = %row.id, org_id = %org_id, "Expense recorded");
            response::created(row)
        }
        Err(e) => {
            error!(error = %e, "Failed to record expense");
            response::failure(&AppError::Database(e.to_string()))
        }
    }
}

/// GET `/organizations/{org_id}/expenses` - List expenses, newest first.
async fn list_expenses(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(org_id): Path<Uuid>,
    Query(query): Query<ListExpensesQuery>,
) -> impl IntoResponse {
    if let Err(resp) = load_managed_org(&state, org_id, &auth).await {
        return resp;
    }

    let expense_repo = ExpenseRepository::new((*state.db).clone());
    let filter = ExpenseFilter {
        year: query.year,
        month: query.month,
    };

    match expense_repo.list(org_id, filter).await {
        Ok(rows) => response::ok(rows),
        Err(e) => {
            error!(error = %e, "Failed to list expenses");
            response::failure(&AppError::Database(e.to_string()))
        }
    }
}

/// GET `/organizations/{org_id}/expenses/{expense_id}` - Fetch one expense.
async fn get_expense(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((org_id, expense_id)): Path<(Uuid, Uuid)>,
) -> impl IntoResponse {
    if let Err(resp) = load_managed_org(&state, org_id, &auth).await {
        return resp;
    }

    let expense_repo = ExpenseRepository::new((*state.db).clone());

    match expense_repo.find_by_id(org_id, expense_id).await {
        Ok(Some(row)) => response::ok(row),
        Ok(None) => response::failure(&AppError::NotFound("Expense not found".into())),
        Err(e) => {
            error!(error = %e, "Failed to fetch expense");
            response::failure(&AppError::Database(e.to_string()))
        }
    }
}

/// DELETE `/organizations/{org_id}/expenses/{expense_id}` - Delete an expense.
async fn delete_expense(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((org_id, expense_id)): Path<(Uuid, Uuid)>,
) -> impl IntoResponse {
    if let Err(resp) = load_managed_org(&state, org_id, &auth).await {
        return resp;
    }

    let expense_repo = ExpenseRepository::new((*state.db).clone());

    match expense_repo.delete(org_id, expense_id).await {
        Ok(()) => {
            info!(expense_id = %expense_id, "Expense deleted");
            response::ok(serde_json::json!({ "deleted": true }))
        }
        Err(ExpenseRepositoryError::NotFound(_)) => {
            response::failure(&AppError::NotFound("Expense not found".into()))
        }
        Err(e) => {
            error!(error = %e, "Failed to delete expense");
            response::failure(&AppError::Database(e.to_string()))
        }
    }
}
