//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                     - Health check
//!
//! # Auth
//! POST   /api/admin/login            - Login with the admin account
//! POST   /api/admin/logout           - Logout
//! GET    /api/admin/me               - Current admin (requires auth)
//!
//! # Dashboard (view_analytics)
//! GET    /api/admin/dashboard        - Stats plus customer and order tables
//!
//! # Customers
//! GET    /api/admin/customers        - List (?search=&status=)   view_customers
//! GET    /api/admin/customers/{id}   - Detail                    view_customers
//! PATCH  /api/admin/customers/{id}   - Edit                      edit_customers
//! DELETE /api/admin/customers/{id}   - Delete                    delete_customers
//!
//! # Orders
//! GET    /api/admin/orders           - List (?search=&status=)   view_orders
//! GET    /api/admin/orders/{id}      - Detail                    view_orders
//! DELETE /api/admin/orders/{id}      - Delete                    edit_orders
//! ```

pub mod auth;
pub mod customers;
pub mod dashboard;
pub mod orders;

use axum::{
    Router,
    http::{HeaderValue, header},
    routing::{get, post},
};
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};

use crate::error::AppError;
use crate::middleware::create_session_layer;
use crate::state::AppState;

/// Parse a status filter; absent, empty or `all` means no filter.
pub(crate) fn parse_status<T>(raw: Option<&str>) -> Result<Option<T>, AppError>
where
    T: std::str::FromStr<Err = String>,
{
    match raw.map(str::trim) {
        None | Some("" | "all") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(AppError::BadRequest),
    }
}

/// Create the admin API routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me))
        .route("/dashboard", get(dashboard::index))
        .route("/customers", get(customers::index))
        .route(
            "/customers/{id}",
            get(customers::show)
                .patch(customers::update)
                .delete(customers::delete),
        )
        .route("/orders", get(orders::index))
        .route("/orders/{id}", get(orders::show).delete(orders::delete))
}

/// Create all routes for admin.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .nest("/api/admin", api_routes())
}

/// Build the complete application with sessions, tracing and Sentry.
pub fn app(state: AppState) -> Router {
    let session_layer = create_session_layer(state.config());

    routes()
        .layer(session_layer)
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use nurvi_core::CustomerStatus;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::config::tests::sample_config;
    use crate::db::Directory;

    fn test_app() -> Router {
        app(AppState::new(sample_config(), Directory::seeded()))
    }

    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        cookie: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Option<String>, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(';').next())
            .map(String::from);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, cookie, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    async fn login(app: &Router) -> String {
        let (status, cookie, _) = send(
            app,
            "POST",
            "/api/admin/login",
            None,
            Some(json!({ "email": "admin@nurvijewel.com", "password": "admin123" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        cookie.unwrap()
    }

    #[test]
    fn test_parse_status() {
        assert_eq!(parse_status::<CustomerStatus>(None).unwrap(), None);
        assert_eq!(parse_status::<CustomerStatus>(Some("all")).unwrap(), None);
        assert_eq!(
            parse_status::<CustomerStatus>(Some("vip")).unwrap(),
            Some(CustomerStatus::Vip)
        );
        assert!(parse_status::<CustomerStatus>(Some("gold")).is_err());
    }

    #[tokio::test]
    async fn test_protected_routes_require_login() {
        let app = test_app();
        for uri in ["/api/admin/me", "/api/admin/dashboard", "/api/admin/customers"] {
            let (status, _, body) = send(&app, "GET", uri, None, None).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri}");
            assert_eq!(body["success"], false);
        }
    }

    #[tokio::test]
    async fn test_wrong_password_is_unauthorized() {
        let app = test_app();
        let (status, cookie, body) = send(
            &app,
            "POST",
            "/api/admin/login",
            None,
            Some(json!({ "email": "admin@nurvijewel.com", "password": "nope" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Invalid credentials");
        assert!(cookie.is_none());
    }

    #[tokio::test]
    async fn test_dashboard_after_login() {
        let app = test_app();
        let cookie = login(&app).await;

        let (status, _, body) = send(&app, "GET", "/api/admin/dashboard", Some(&cookie), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["stats"]["totalCustomers"], 3);
        assert_eq!(body["stats"]["revenue"], "1660");
        assert_eq!(body["orders"].as_array().unwrap().len(), 3);

        let (_, _, me) = send(&app, "GET", "/api/admin/me", Some(&cookie), None).await;
        assert_eq!(me["role"], "super_admin");
        assert_eq!(me["permissions"].as_array().unwrap().len(), 8);
    }

    #[tokio::test]
    async fn test_customer_edit_and_delete() {
        let app = test_app();
        let cookie = login(&app).await;

        let (status, _, body) = send(
            &app,
            "PATCH",
            "/api/admin/customers/1",
            Some(&cookie),
            Some(json!({ "notes": "Prefers rose gold" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["customer"]["notes"], "Prefers rose gold");
        assert_eq!(body["customer"]["name"], "Sarah Johnson");

        let (status, _, _) =
            send(&app, "DELETE", "/api/admin/customers/1", Some(&cookie), None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _, _) = send(&app, "GET", "/api/admin/customers/1", Some(&cookie), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_order_filters() {
        let app = test_app();
        let cookie = login(&app).await;

        let (status, _, body) = send(
            &app,
            "GET",
            "/api/admin/orders?status=processing",
            Some(&cookie),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 1);
        assert_eq!(body["orders"][0]["id"], "ORD-002");

        let (status, _, _) = send(
            &app,
            "GET",
            "/api/admin/orders?status=lost",
            Some(&cookie),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_logout_ends_session() {
        let app = test_app();
        let cookie = login(&app).await;

        let (status, _, _) = send(&app, "POST", "/api/admin/logout", Some(&cookie), None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _, _) = send(&app, "GET", "/api/admin/me", Some(&cookie), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
