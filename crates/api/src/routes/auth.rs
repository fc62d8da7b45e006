//! Authentication routes for register and login.

use axum::{Json, Router, extract::State, response::IntoResponse, routing::post};
use tracing::{error, info};

use crate::{AppState, response};
use konak_core::auth::{UserRole, hash_password, verify_password};
use konak_db::UserRepository;
use konak_shared::{
    AppError,
    auth::{AuthResponse, LoginRequest, RegisterRequest, UserInfo},
};

/// Creates the auth router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

fn user_info(user: &konak_db::entities::users::Model) -> UserInfo {
    UserInfo {
        id: user.id,
        email: user.email.clone(),
        phone: user.phone.clone(),
        full_name: user.full_name.clone(),
        role: user.role.clone(),
    }
}

/// POST /auth/register - Create a manager account and return a token.
async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> impl IntoResponse {
    if payload.email.trim().is_empty() || payload.password.is_empty() {
        return response::failure(&AppError::Validation(
            "Email and password are required".into(),
        ));
    }
    if payload.full_name.trim().is_empty() {
        return response::failure(&AppError::Validation("Full name is required".into()));
    }

    let user_repo = UserRepository::new((*state.db).clone());

    match user_repo.find_by_email(&payload.email).await {
        Ok(Some(_)) => {
            return response::failure(&AppError::Conflict(
                "A user with this email already exists".into(),
            ));
        }
        Ok(None) => {}
        Err(e) => {
            error!(error = %e, "Database error checking email");
            return response::failure(&AppError::Database(e.to_string()));
        }
    }

    let password_hash = match hash_password(&payload.password) {
        Ok(h) => h,
        Err(e) => {
            error!(error = %e, "Password hashing failed");
            return response::failure(&AppError::Internal(e.to_string()));
        }
    };

    // Self-registration always yields a manager account.
    let user = match user_repo
        .create(
            &payload.email,
            &payload.phone,
            &password_hash,
            &payload.full_name,
            UserRole::Manager.as_str(),
        )
        .await
    {
        Ok(u) => u,
        Err(e) => {
            error!(error = %e, "Failed to create user");
            return response::failure(&AppError::Database(e.to_string()));
        }
    };

    let token = match state.jwt_service.generate_token(user.id, &user.role) {
        Ok(t) => t,
        Err(e) => {
            error!(error = %e, "Token generation failed");
            return response::failure(&AppError::Internal(e.to_string()));
        }
    };

    info!(user_id = %user.id, "User registered");

    response::created(AuthResponse {
        token,
        user: user_info(&user),
    })
}

/// POST /auth/login - Authenticate and return a token.
async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> impl IntoResponse {
    let user_repo = UserRepository::new((*state.db).clone());

    let user = match user_repo.find_by_email(&payload.email).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            info!(email = %payload.email, "Login attempt for non-existent user");
            return response::failure(&AppError::Unauthorized(
                "Invalid email or password".into(),
            ));
        }
        Err(e) => {
            error!(error = %e, "Database error during login");
            return response::failure(&AppError::Database(e.to_string()));
        }
    };

    match verify_password(&payload.password, &user.password_hash) {
        Ok(true) => {}
        Ok(false) => {
            info!(user_id = %user.id, "Failed login attempt");
            return response::failure(&AppError::Unauthorized(
                "Invalid email or password".into(),
            ));
        }
        Err(e) => {
            error!(error = %e, "Password verification error");
            return response::failure(&AppError::Internal(e.to_string()));
        }
    }

    let token = match state.jwt_service.generate_token(user.id, &user.role) {
        Ok(t) => t,
        Err(e) => {
            error!(error = %e, "Token generation failed");
            return response::failure(&AppError::Internal(e.to_string()));
        }
    };

    info!(user_id = %user.id, "User logged in");

    response::ok(AuthResponse {
        token,
        user: user_info(&user),
    })
}
