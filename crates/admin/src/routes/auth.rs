//! Admin login and logout.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{Result, clear_sentry_user, set_sentry_user};
use crate::middleware::{RequireAdmin, clear_current_admin, set_current_admin};
use crate::models::AdminUser;
use crate::services::AdminAuthService;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub admin: AdminUser,
}

#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub success: bool,
}

/// POST /api/admin/login
#[instrument(skip(state, session, request))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let admin = AdminAuthService::new(state.config()).login(&request.email, &request.password)?;

    set_current_admin(&session, &admin).await?;
    set_sentry_user(admin.id.as_str(), Some(&admin.email));

    Ok(Json(LoginResponse {
        success: true,
        admin,
    }))
}

/// POST /api/admin/logout
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<Json<LogoutResponse>> {
    clear_current_admin(&session).await?;
    clear_sentry_user();
    Ok(Json(LogoutResponse { success: true }))
}

/// GET /api/admin/me
pub async fn me(RequireAdmin(admin): RequireAdmin) -> Json<AdminUser> {
    Json(admin)
}
