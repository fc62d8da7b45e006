//! Due lifecycle routes: creation, listing, payment, and the overdue sweep.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    routing::{get, patch, post},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{error, info};
use uuid::Uuid;

use crate::{AppState, middleware::AuthUser, response, routes::load_managed_org};
use konak_core::auth::UserRole;
use konak_core::dues::{DueError, DueService};
use konak_db::{
    DueRepository,
    repositories::{DueFilter, DueRepositoryError},
};
use konak_shared::AppError;

/// Request to create a single due.
#[derive(Debug, Deserialize)]
pub struct CreateDueRequest {
    /// Target unit.
    pub unit_id: Uuid,
    /// Charge amount.
    pub amount: Decimal,
    /// Due date as `YYYY-MM-DD`.
    pub due_date: String,
    /// Optional description.
    pub description: Option<String>,
}

/// Request to create one due per unit.
#[derive(Debug, Deserialize)]
pub struct CreateBulkDuesRequest {
    /// Charge amount applied to every unit.
    pub amount: Decimal,
    /// Due date as `YYYY-MM-DD`.
    pub due_date: String,
    /// Optional description shared by all rows.
    pub description: Option<String>,
}

/// Request to mark a due paid.
#[derive(Debug, Default, Deserialize)]
pub struct PayDueRequest {
    /// Payment method; omitted or empty defaults to cash.
    pub payment_method: Option<String>,
}

/// List filters accepted as query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct ListDuesQuery {
    /// Lifecycle status filter.
    pub status: Option<String>,
    /// Calendar year of the due date.
    pub year: Option<i32>,
    /// Calendar month of the due date.
    pub month: Option<u32>,
}

/// Creates the dues router (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/organizations/{org_id}/dues", post(create_due))
        .route("/organizations/{org_id}/dues", get(list_dues))
        .route("/organizations/{org_id}/dues/bulk", post(create_bulk_dues))
        .route("/organizations/{org_id}/dues/overdue", get(list_overdue))
        .route("/organizations/{org_id}/dues/{due_id}", get(get_due))
        .route("/organizations/{org_id}/dues/{due_id}/pay", patch(pay_due))
        .route("/admin/dues/sweep", post(sweep_overdue))
}

fn validation_failure(err: &DueError) -> Response {
    response::failure(&AppError::Validation(err.to_string()))
}

/// POST `/organizations/{org_id}/dues` - Create a single due.
async fn create_due(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(org_id): Path<Uuid>,
    Json(payload): Json<CreateDueRequest>,
) -> impl IntoResponse {
    if let Err(resp) = load_managed_org(&state, org_id, &auth).await {
        return resp;
    }

    let cmd = match DueService::validate_create(
        payload.unit_id,
        payload.amount,
        &payload.due_date,
        payload.description,
    ) {
        Ok(c) => c,
        Err(e) => return validation_failure(&e),
    };

    let due_repo = DueRepository::new((*state.db).clone());

    match due_repo.create(org_id, cmd).await {
        Ok(due) => {
            info!(due_id = %due.id, org_id = %org_id, "Due created");
            response::created(due)
        }
        Err(DueRepositoryError::UnitNotFound(_)) => response::failure(&AppError::NotFound(
            "Unit not found in this organization".into(),
        )),
        Err(e) => {
            error!(error = %e, "Failed to create due");
            response::failure(&AppError::Database(e.to_string()))
        }
    }
}

/// POST `/organizations/{org_id}/dues/bulk` - Create one due per unit.
async fn create_bulk_dues(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(org_id): Path<Uuid>,
    Json(payload): Json<CreateBulkDuesRequest>,
) -> impl IntoResponse {
    if let Err(resp) = load_managed_org(&state, org_id, &auth).await {
        return resp;
    }

    let cmd = match DueService::validate_bulk(payload.amount, &payload.due_date, payload.description)
    {
        Ok(c) => c,
        Err(e) => return validation_failure(&e),
    };

    let due_repo = DueRepository::new((*state.db).clone());

    match due_repo.bulk_create(org_id, cmd).await {
        Ok(count) => {
            info!(org_id = %org_id, count, "Bulk dues created");
            response::created(serde_json::json!({ "created": count }))
        }
        Err(e) => {
            error!(error = %e, "Failed to create bulk dues");
            response::failure(&AppError::Database(e.to_string()))
        }
    }
}

/// GET `/organizations/{org_id}/dues` - List dues with optional filters.
async fn list_dues(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(org_id): Path<Uuid>,
    Query(query): Query<ListDuesQuery>,
) -> impl IntoResponse {
    if let Err(resp) = load_managed_org(&state, org_id, &auth).await {
        return resp;
    }

    let status = match DueService::parse_status_filter(query.status.as_deref()) {
        Ok(s) => s,
        Err(e) => return validation_failure(&e),
    };

    let due_repo = DueRepository::new((*state.db).clone());
    let filter = DueFilter {
        status,
        year: query.year,
        month: query.month,
    };

    match due_repo.list(org_id, filter).await {
        Ok(dues) => response::ok(dues),
        Err(e) => {
            error!(error = %e, "Failed to list dues");
            response::failure(&AppError::Database(e.to_string()))
        }
    }
}

/// GET `/organizations/{org_id}/dues/overdue` - List overdue dues.
async fn list_overdue(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(org_id): Path<Uuid>,
) -> impl IntoResponse {
    if let Err(resp) = load_managed_org(&state, org_id, &auth).await {
        return resp;
    }

    let due_repo = DueRepository::new((*state.db).clone());

    match due_repo.list_overdue(org_id).await {
        Ok(dues) => response::ok(dues),
        Err(e) => {
            error!(error = %e, "Failed to list overdue dues");
            response::failure(&AppError::Database(e.to_string()))
        }
    }
}

/// GET `/organizations/{org_id}/dues/{due_id}` - Fetch one due.
async fn get_due(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((org_id, due_id)): Path<(Uuid, Uuid)>,
) -> impl IntoResponse {
    if let Err(resp) = load_managed_org(&state, org_id, &auth).await {
        return resp;
    }

    let due_repo = DueRepository::new((*state.db).clone());

    match due_repo.find_with_details(org_id, due_id).await {
        Ok(Some(due)) => response::ok(due),
        Ok(None) => response::failure(&AppError::NotFound("Due not found".into())),
        Err(e) => {
            error!(error = %e, "Failed to fetch due");
            response::failure(&AppError::Database(e.to_string()))
        }
    }
}

/// PATCH `/organizations/{org_id}/dues/{due_id}/pay` - Mark a due paid.
async fn pay_due(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((org_id, due_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<PayDueRequest>,
) -> impl IntoResponse {
    if let Err(resp) = load_managed_org(&state, org_id, &auth).await {
        return resp;
    }

    let method = match DueService::resolve_payment_method(payload.payment_method.as_deref()) {
        Ok(m) => m,
        Err(e) => return validation_failure(&e),
    };

    let due_repo = DueRepository::new((*state.db).clone());

    match due_repo.mark_paid(org_id, due_id, method).await {
        Ok(()) => {
            info!(due_id = %due_id, method = %method, "Due marked paid");
            response::ok(serde_json::json!({ "paid": true }))
        }
        Err(DueRepositoryError::NotFound(_)) => {
            response::failure(&AppError::NotFound("Due not found".into()))
        }
        Err(e) => {
            error!(error = %e, "Failed to mark due paid");
            response::failure(&AppError::Database(e.to_string()))
        }
    }
}

/// POST /admin/dues/sweep - Reclassify lapsed pending dues as overdue.
///
/// Admin or manager only. Intended for external schedulers (cron); the
/// sweep itself is idempotent.
async fn sweep_overdue(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    let allowed = UserRole::parse(auth.role()).is_some_and(|r| r.can_sweep());
    if !allowed {
        return response::failure(&AppError::Forbidden(
            "Only admins and managers can trigger the sweep".into(),
        ));
    }

    let due_repo = DueRepository::new((*state.db).clone());

    match due_repo.sweep_overdue().await {
        Ok(count) => {
            info!(count, "Overdue sweep completed");
            response::ok(serde_json::json!({ "swept": count }))
        }
        Err(e) => {
            error!(error = %e, "Overdue sweep failed");
            response::failure(&AppError::Database(e.to_string()))
        }
    }
}
