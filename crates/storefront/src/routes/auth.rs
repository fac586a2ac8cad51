//! Account route handlers.
//!
//! JSON login, registration, logout, and the current user.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{Result, clear_sentry_user, set_sentry_user};
use crate::middleware::{RequireAuth, clear_current_user, set_current_user};
use crate::models::CurrentUser;
use crate::services::AuthService;
use crate::state::AppState;

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Registration request body.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Successful auth response.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub success: bool,
    pub message: String,
    pub user: CurrentUser,
}

#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub success: bool,
}

/// POST /api/auth/login
#[instrument(skip(state, session, request), fields(email = %request.email))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>> {
    let user = AuthService::new(state.users())
        .login(&request.email, &request.password)
        .await?;

    set_current_user(&session, &user).await?;
    set_sentry_user(&user.id, Some(&user.email));

    Ok(Json(AuthResponse {
        success: true,
        message: format!("You've successfully logged in as {}.", user.name),
        user,
    }))
}

/// POST /api/auth/register
#[instrument(skip(state, session, request), fields(email = %request.email))]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>> {
    let user = AuthService::new(state.users())
        .register(&request.name, &request.email, &request.password)
        .await?;

    set_current_user(&session, &user).await?;
    set_sentry_user(&user.id, Some(&user.email));

    Ok(Json(AuthResponse {
        success: true,
        message: "Your account has been created successfully.".to_string(),
        user,
    }))
}

/// POST /api/auth/logout
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<Json<LogoutResponse>> {
    clear_current_user(&session).await?;
    clear_sentry_user();
    Ok(Json(LogoutResponse { success: true }))
}

/// GET /api/auth/me
pub async fn me(RequireAuth(user): RequireAuth) -> Json<CurrentUser> {
    Json(user)
}
