//! API route definitions.

use axum::{Router, middleware, response::Response};
use uuid::Uuid;

use konak_db::OrganizationRepository;
use konak_shared::AppError;

use crate::{AppState, middleware::AuthUser, middleware::auth::auth_middleware, response};

pub mod auth;
pub mod dues;
pub mod expenses;
pub mod health;
pub mod organizations;
pub mod reports;
pub mod residents;
pub mod units;

/// Creates the API router with protected routes that need state for middleware.
#[allow(clippy::needless_pass_by_value)]
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    // Protected routes that require authentication
    let protected_routes = Router::new()
        .merge(organizations::routes())
        .merge(units::routes())
        .merge(residents::routes())
        .merge(dues::routes())
        .merge(expenses::routes())
        .merge(reports::routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Combine public and protected routes
    Router::new()
        .merge(health::routes())
        .merge(auth::routes())
        .merge(protected_routes)
}

/// Loads an organization and checks the caller manages it.
///
/// Every organization-scoped route goes through this guard; a caller who
/// is not the manager gets 403 regardless of whether the resource exists.
pub(crate) async fn load_managed_org(
    state: &AppState,
    org_id: Uuid,
    auth: &AuthUser,
) -> Result<konak_db::entities::organizations::Model, Response> {
    let org_repo = OrganizationRepository::new((*state.db).clone());

    let org = match org_repo.find_by_id(org_id).await {
        Ok(Some(o)) => o,
        Ok(None) => {
            return Err(response::failure(&AppError::NotFound(
                "Organization not found".into(),
            )));
        }
        Err(e) => {
            return Err(response::failure(&AppError::Database(e.to_string())));
        }
    };

    if org.manager_id != auth.user_id() {
        return Err(response::failure(&AppError::Forbidden(
            "You do not manage this organization".into(),
        )));
    }

    Ok(org)
}
