//! Authentication extractor and permission checks for admin.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use serde_json::json;
use tower_sessions::Session;

use crate::error::AppError;
use crate::models::{AdminUser, Permission, session_keys};

/// Extractor that requires admin authentication.
///
/// Rejects with 401 and a JSON body when no admin is logged in.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(RequireAdmin(admin): RequireAdmin) -> String {
///     format!("Hello, {}!", admin.name)
/// }
/// ```
pub struct RequireAdmin(pub AdminUser);

/// Error returned when admin authentication is required but missing.
pub struct AdminAuthRejection;

impl IntoResponse for AdminAuthRejection {
    fn into_response(self) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "success": false, "error": "Admin login required" })),
        )
            .into_response()
    }
}

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AdminAuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or(AdminAuthRejection)?;

        let admin: AdminUser = session
            .get(session_keys::CURRENT_ADMIN)
            .await
            .ok()
            .flatten()
            .ok_or(AdminAuthRejection)?;

        Ok(Self(admin))
    }
}

/// Check that the admin holds a permission.
///
/// # Errors
///
/// Returns `AppError::Forbidden` (403) when the permission is missing.
pub fn require_permission(admin: &AdminUser, permission: Permission) -> Result<(), AppError> {
    if admin.has_permission(permission) {
        Ok(())
    } else {
        tracing::warn!(admin_id = %admin.id, %permission, "Permission denied");
        Err(AppError::Forbidden(format!(
            "Missing permission: {permission}"
        )))
    }
}

/// Store the logged-in admin in the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_admin(
    session: &Session,
    admin: &AdminUser,
) -> Result<(), tower_sessions::session::Error> {
    session.cycle_id().await?;
    session.insert(session_keys::CURRENT_ADMIN, admin).await
}

/// Clear the current admin from the session (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_admin(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<AdminUser>(session_keys::CURRENT_ADMIN)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AdminRole;

    #[test]
    fn test_require_permission() {
        let mut admin = AdminUser::primary("admin@nurvijewel.com");
        assert!(require_permission(&admin, Permission::DeleteCustomers).is_ok());

        admin.role = AdminRole::Manager;
        admin.permissions = Permission::defaults_for(AdminRole::Manager);
        let denied = require_permission(&admin, Permission::DeleteCustomers);
        assert!(matches!(denied, Err(AppError::Forbidden(_))));
    }
}
