//! Financial report routes.

use axum::{
    Router,
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::get,
};
use serde::Deserialize;
use tracing::error;
use uuid::Uuid;

use crate::{AppState, middleware::AuthUser, response, routes::load_managed_org};
use konak_core::report::{ReportPeriod, ReportService};
use konak_db::ReportRepository;
use konak_shared::AppError;

/// Report window accepted as query parameters; omitted or zero values
/// default to the current date.
#[derive(Debug, Default, Deserialize)]
pub struct ReportQuery {
    /// Calendar year.
    pub year: Option<i32>,
    /// Calendar month.
    pub month: Option<u32>,
}

/// Creates the reports router (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/organizations/{org_id}/reports/monthly",
            get(monthly_summary),
        )
        .route(
            "/organizations/{org_id}/reports/expenses",
            get(expense_breakdown),
        )
}

/// GET `/organizations/{org_id}/reports/monthly` - Monthly financial summary.
async fn monthly_summary(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(org_id): Path<Uuid>,
    Query(query): Query<ReportQuery>,
) -> impl IntoResponse {
    if let Err(resp) = load_managed_org(&state, org_id, &auth).await {
        return resp;
    }

    let period = ReportPeriod::resolve(query.year, query.month, chrono::Utc::now().date_naive());
    let report_repo = ReportRepository::new((*state.db).clone());

    let dues = match report_repo.dues_totals(org_id, period).await {
        Ok(d) => d,
        Err(e) => {
            error!(error = %e, "Failed to aggregate dues");
            return response::failure(&AppError::Database(e.to_string()));
        }
    };

    let total_expenses = match report_repo.expense_total(org_id, period).await {
        Ok(t) => t,
        Err(e) => {
            error!(error = %e, "Failed to aggregate expenses");
            return response::failure(&AppError::Database(e.to_string()));
        }
    };

    response::ok(ReportService::build_summary(period, dues, total_expenses))
}

/// GET `/organizations/{org_id}/reports/expenses` - Expense category breakdown.
async fn expense_breakdown(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(org_id): Path<Uuid>,
    Query(query): Query<ReportQuery>,
) -> impl IntoResponse {
    if let Err(resp) = load_managed_org(&state, org_id, &auth).await {
        return resp;
    }

    let period = ReportPeriod::resolve(query.year, query.month, chrono::Utc::now().date_naive());
    let report_repo = ReportRepository::new((*state.db).clone());

    match report_repo.expense_breakdown(org_id, period).await {
        Ok(rows) => response::ok(rows),
        Err(e) => {
            error!(error = %e, "Failed to build expense breakdown");
            response::failure(&AppError::Database(e.to_string()))
        }
    }
}
