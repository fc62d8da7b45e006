//! Organization management routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{error, info};

use crate::{AppState, middleware::AuthUser, response, routes::load_managed_org};
use konak_db::{
    OrganizationRepository,
    repositories::{OrganizationRepositoryError, UpdateOrganization},
};
use konak_shared::AppError;

/// Request to create an organization.
#[derive(Debug, Deserialize)]
pub struct CreateOrganizationRequest {
    /// Display name.
    pub name: String,
    /// Street address.
    #[serde(default)]
    pub address: String,
    /// Number of units on site.
    #[serde(default)]
    pub total_units: i32,
    /// Standard monthly due amount.
    pub monthly_due_amount: Decimal,
}

/// Request to update an organization; omitted fields stay unchanged.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateOrganizationRequest {
    /// New display name.
    pub name: Option<String>,
    /// New street address.
    pub address: Option<String>,
    /// New unit count.
    pub total_units: Option<i32>,
    /// New standard monthly due amount.
    pub monthly_due_amount: Option<Decimal>,
}

/// Creates the organizations router (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/organizations", post(create_organization))
        .route("/organizations", get(list_organizations))
        .route("/organizations/{org_id}", get(get_organization))
        .route("/organizations/{org_id}", put(update_organization))
        .route("/organizations/{org_id}", delete(delete_organization))
}

/// POST /organizations - Create a new organization managed by the caller.
async fn create_organization(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateOrganizationRequest>,
) -> impl IntoResponse {
    if payload.name.trim().is_empty() {
        return response::failure(&AppError::Validation("Name is required".into()));
    }
    if payload.monthly_due_amount <= Decimal::ZERO {
        return response::failure(&AppError::Validation(
            "Monthly due amount must be positive".into(),
        ));
    }

    let org_repo = OrganizationRepository::new((*state.db).clone());

    match org_repo
        .create(
            &payload.name,
            &payload.address,
            payload.total_units,
            payload.monthly_due_amount,
            auth.user_id(),
        )
        .await
    {
        Ok(org) => {
            info!(org_id = %org.id, manager_id = %auth.user_id(), "Organization created");
            response::created(org)
        }
        Err(e) => {
            error!(error = %e, "Failed to create organization");
            response::failure(&AppError::Database(e.to_string()))
        }
    }
}

/// GET /organizations - List organizations managed by the caller.
async fn list_organizations(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    let org_repo = OrganizationRepository::new((*state.db).clone());

    match org_repo.list_by_manager(auth.user_id()).await {
        Ok(orgs) => response::ok(orgs),
        Err(e) => {
            error!(error = %e, "Failed to list organizations");
            response::failure(&AppError::Database(e.to_string()))
        }
    }
}

/// GET `/organizations/{org_id}` - Get organization details.
async fn get_organization(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(org_id): Path<uuid::Uuid>,
) -> impl IntoResponse {
    match load_managed_org(&state, org_id, &auth).await {
        Ok(org) => response::ok(org),
        Err(resp) => resp,
    }
}

/// PUT `/organizations/{org_id}` - Update organization settings.
async fn update_organization(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(org_id): Path<uuid::Uuid>,
    Json(payload): Json<UpdateOrganizationRequest>,
) -> impl IntoResponse {
    if let Err(resp) = load_managed_org(&state, org_id, &auth).await {
        return resp;
    }

    if let Some(amount) = payload.monthly_due_amount {
        if amount <= Decimal::ZERO {
            return response::failure(&AppError::Validation(
                "Monthly due amount must be positive".into(),
            ));
        }
    }

    let org_repo = OrganizationRepository::new((*state.db).clone());
    let changes = UpdateOrganization {
        name: payload.name,
        address: payload.address,
        total_units: payload.total_units,
        monthly_due_amount: payload.monthly_due_amount,
    };

    match org_repo.update(org_id, changes).await {
        Ok(org) => {
            info!(org_id = %org.id, "Organization updated");
            response::ok(org)
        }
        Err(OrganizationRepositoryError::NotFound(_)) => {
            response::failure(&AppError::NotFound("Organization not found".into()))
        }
        Err(e) => {
            error!(error = %e, "Failed to update organization");
            response::failure(&AppError::Database(e.to_string()))
        }
    }
}

/// DELETE `/organizations/{org_id}` - Delete an organization.
async fn delete_organization(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(org_id): Path<uuid::Uuid>,
) -> impl IntoResponse {
    if let Err(resp) = load_managed_org(&state, org_id, &auth).await {
        return resp;
    }

    let org_repo = OrganizationRepository::new((*state.db).clone());

    match org_repo.delete(org_id).await {
        Ok(()) => {
            info!(org_id = %org_id, "Organization deleted");
            response::ok(serde_json::json!({ "deleted": true }))
        }
        Err(OrganizationRepositoryError::NotFound(_)) => {
            response::failure(&AppError::NotFound("Organization not found".into()))
        }
        Err(e) => {
            error!(error = %e, "Failed to delete organization");
            response::failure(&AppError::Database(e.to_string()))
        }
    }
}
