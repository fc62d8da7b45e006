//! Unit management routes, nested under an organization.

use axum::{
    Json, Router,
    extract::{Path, State},
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use serde::Deserialize;
use tracing::{error, info};
use uuid::Uuid;

use crate::{AppState, middleware::AuthUser, response, routes::load_managed_org};
use konak_db::{
    UnitRepository,
    repositories::{UnitRepositoryError, UpdateUnit},
};
use konak_shared::AppError;

/// Request to create a unit.
#[derive(Debug, Deserialize)]
pub struct CreateUnitRequest {
    /// Unit number (e.g. "A-14").
    pub unit_number: String,
    /// Floor the unit sits on.
    #[serde(default)]
    pub floor: i32,
}

/// Request to update a unit; omitted fields stay unchanged.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateUnitRequest {
    /// New unit number.
    pub unit_number: Option<String>,
    /// New floor.
    pub floor: Option<i32>,
    /// Resident to assign to this unit.
    pub resident_id: Option<Uuid>,
}

/// Creates the units router (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/organizations/{org_id}/units", post(create_unit))
        .route("/organizations/{org_id}/units", get(list_units))
        .route("/organizations/{org_id}/units/{unit_id}", get(get_unit))
        .route("/organizations/{org_id}/units/{unit_id}", put(update_unit))
        .route(
            "/organizations/{org_id}/units/{unit_id}",
            delete(delete_unit),
        )
}

/// POST `/organizations/{org_id}/units` - Create a unit.
async fn create_unit(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(org_id): Path<Uuid>,
    Json(payload): Json<CreateUnitRequest>,
) -> impl IntoResponse {
    if let Err(resp) = load_managed_org(&state, org_id, &auth).await {
        return resp;
    }
    if payload.unit_number.trim().is_empty() {
        return response::failure(&AppError::Validation("Unit number is required".into()));
    }

    let unit_repo = UnitRepository::new((*state.db).clone());

    match unit_repo
        .create(org_id, &payload.unit_number, payload.floor)
        .await
    {
        Ok(unit) => {
            info!(unit_id = %unit.id, org_id = %org_id, "Unit created");
            response::created(unit)
        }
        Err(e) => {
            error!(error = %e, "Failed to create unit");
            response::failure(&AppError::Database(e.to_string()))
        }
    }
}

/// GET `/organizations/{org_id}/units` - List units with resident names.
async fn list_units(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(org_id): Path<Uuid>,
) -> impl IntoResponse {
    if let Err(resp) = load_managed_org(&state, org_id, &auth).await {
        return resp;
    }

    let unit_repo = UnitRepository::new((*state.db).clone());

    match unit_repo.list_by_organization(org_id).await {
        Ok(units) => response::ok(units),
        Err(e) => {
            error!(error = %e, "Failed to list units");
            response::failure(&AppError::Database(e.to_string()))
        }
    }
}

/// GET `/organizations/{org_id}/units/{unit_id}` - Fetch one unit.
async fn get_unit(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((org_id, unit_id)): Path<(Uuid, Uuid)>,
) -> impl IntoResponse {
    if let Err(resp) = load_managed_org(&state, org_id, &auth).await {
        return resp;
    }

    let unit_repo = UnitRepository::new((*state.db).clone());

    match unit_repo.find_by_id(org_id, unit_id).await {
        Ok(Some(unit)) => response::ok(unit),
        Ok(None) => response::failure(&AppError::NotFound("Unit not found".into())),
        Err(e) => {
            error!(error = %e, "Failed to fetch unit");
            response::failure(&AppError::Database(e.to_string()))
        }
    }
}

/// PUT `/organizations/{org_id}/units/{unit_id}` - Update a unit.
async fn update_unit(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((org_id, unit_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<UpdateUnitRequest>,
) -> impl IntoResponse {
    if let Err(resp) = load_managed_org(&state, org_id, &auth).await {
        return resp;
    }

    let unit_repo = UnitRepository::new((*state.db).clone());
    let changes = UpdateUnit {
        unit_number: payload.unit_number,
        floor: payload.floor,
        resident_id: payload.resident_id,
    };

    match unit_repo.update(org_id, unit_id, changes).await {
        Ok(unit) => {
            info!(unit_id = %unit.id, "Unit updated");
            response::ok(unit)
        }
        Err(UnitRepositoryError::NotFound(_)) => {
            response::failure(&AppError::NotFound("Unit not found".into()))
        }
        Err(UnitRepositoryError::ResidentNotFound(_)) => response::failure(&AppError::Validation(
            "Resident does not belong to this organization".into(),
        )),
        Err(e) => {
            error!(error = %e, "Failed to update unit");
            response::failure(&AppError::Database(e.to_string()))
        }
    }
}

/// DELETE `/organizations/{org_id}/units/{unit_id}` - Delete a unit.
async fn delete_unit(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((org_id, unit_id)): Path<(Uuid, Uuid)>,
) -> impl IntoResponse {
    if let Err(resp) = load_managed_org(&state, org_id, &auth).await {
        return resp;
    }

    let unit_repo = UnitRepository::new((*state.db).clone());

    match unit_repo.delete(org_id, unit_id).await {
        Ok(()) => {
            info!(unit_id = %unit_id, "Unit deleted");
            response::ok(serde_json::json!({ "deleted": true }))
        }
        Err(UnitRepositoryError::NotFound(_)) => {
            response::failure(&AppError::NotFound("Unit not found".into()))
        }
        Err(e) => {
            error!(error = %e, "Failed to delete unit");
            response::failure(&AppError::Database(e.to_string()))
        }
    }
}
