//! Resident management routes, nested under an organization.

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
    ResidentRepository,
    repositories::{ResidentRepositoryError, UpdateResident},
};
use konak_shared::AppError;

/// Request to create a resident.
#[derive(Debug, Deserialize)]
pub struct CreateResidentRequest {
    /// Full name.
    pub full_name: String,
    /// Phone number.
    #[serde(default)]
    pub phone: String,
    /// Email address.
    pub email: Option<String>,
    /// Unit the resident lives in, if known.
    pub unit_id: Option<Uuid>,
}

/// Request to update a resident; omitted fields stay unchanged.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateResidentRequest {
    /// New full name.
    pub full_name: Option<String>,
    /// New phone number.
    pub phone: Option<String>,
    /// New email address.
    pub email: Option<String>,
    /// New unit link.
    pub unit_id: Option<Uuid>,
}

/// Creates the residents router (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/organizations/{org_id}/residents", post(create_resident))
        .route("/organizations/{org_id}/residents", get(list_residents))
        .route(
            "/organizations/{org_id}/residents/{resident_id}",
            get(get_resident),
        )
        .route(
            "/organizations/{org_id}/residents/{resident_id}",
            put(update_resident),
        )
        .route(
            "/organizations/{org_id}/residents/{resident_id}",
            delete(delete_resident),
        )
}

/// POST `/organizations/{org_id}/residents` - Create a resident.
async fn create_resident(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(org_id): Path<Uuid>,
    Json(payload): Json<CreateResidentRequest>,
) -> impl IntoResponse {
    if let Err(resp) = load_managed_org(&state, org_id, &auth).await {
        return resp;
    }
    if payload.full_name.trim().is_empty() {
        return response::failure(&AppError::Validation("Full name is required".into()));
    }

    let resident_repo = ResidentRepository::new((*state.db).clone());

    match resident_repo
        .create(
            org_id,
            &payload.full_name,
            &payload.phone,
            payload.email,
            payload.unit_id,
        )
        .await
    {
        Ok(resident) => {
            info!(resident_id = %resident.id, org_id = %org_id, "Resident created");
            response::created(resident)
        }
        Err(e) => {
            error!(error = %e, "Failed to create resident");
            response::failure(&AppError::Database(e.to_string()))
        }
    }
}

/// GET `/organizations/{org_id}/residents` - List residents.
async fn list_residents(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(org_id): Path<Uuid>,
) -> impl IntoResponse {
    if let Err(resp) = load_managed_org(&state, org_id, &auth).await {
        return resp;
    }

    let resident_repo = ResidentRepository::new((*state.db).clone());

    match resident_repo.list_by_organization(org_id).await {
        Ok(residents) => response::ok(residents),
        Err(e) => {
            error!(error = %e, "Failed to list residents");
            response::failure(&AppError::Database(e.to_string()))
        }
    }
}

/// GET `/organizations/{org_id}/residents/{resident_id}` - Fetch one resident.
async fn get_resident(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((org_id, resident_id)): Path<(Uuid, Uuid)>,
) -> impl IntoResponse {
    if let Err(resp) = load_managed_org(&state, org_id, &auth).await {
        return resp;
    }

    let resident_repo = ResidentRepository::new((*state.db).clone());

    match resident_repo.find_by_id(org_id, resident_id).await {
        Ok(Some(resident)) => response::ok(resident),
        Ok(None) => response::failure(&AppError::NotFound("Resident not found".into())),
        Err(e) => {
            error!(error = %e, "Failed to fetch resident");
            response::failure(&AppError::Database(e.to_string()))
        }
    }
}

/// PUT `/organizations/{org_id}/residents/{resident_id}` - Update a resident.
async fn update_resident(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((org_id, resident_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<UpdateResidentRequest>,
) -> impl IntoResponse {
    if let Err(resp) = load_managed_org(&state, org_id, &auth).await {
        return resp;
    }

    let resident_repo = ResidentRepository::new((*state.db).clone());
    let changes = UpdateResident {
        full_name: payload.full_name,
        phone: payload.phone,
        email: payload.email,
        unit_id: payload.unit_id,
    };

    match resident_repo.update(org_id, resident_id, changes).await {
        Ok(resident) => {
            info!(resident_id = %resident.id, "Resident updated");
            response::ok(resident)
        }
        Err(ResidentRepositoryError::NotFound(_)) => {
            response::failure(&AppError::NotFound("Resident not found".into()))
        }
        Err(e) => {
            error!(error = %e, "Failed to update resident");
            response::failure(&AppError::Database(e.to_string()))
        }
    }
}

/// DELETE `/organizations/{org_id}/residents/{resident_id}` - Delete a resident.
async fn delete_resident(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((org_id, resident_id)): Path<(Uuid, Uuid)>,
) -> impl IntoResponse {
    if let Err(resp) = load_managed_org(&state, org_id, &auth).await {
        return resp;
    }

    let resident_repo = ResidentRepository::new((*state.db).clone());

    match resident_repo.delete(org_id, resident_id).await {
        Ok(()) => {
            info!(resident_id = %resident_id, "Resident deleted");
            response::ok(serde_json::json!({ "deleted": true }))
        }
        Err(ResidentRepositoryError::NotFound(_)) => {
            response::failure(&AppError::NotFound("Resident not found".into()))
        }
        Err(e) => {
            error!(error = %e, "Failed to delete resident");
            response::failure(&AppError::Database(e.to_string()))
        }
    }
}
