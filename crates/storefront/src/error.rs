//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. All route handlers should return `Result<T, AppError>`.
//! Every error body has the shape `{ "success": false, "error": "..." }`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use nurvi_core::CartError;

use crate::db::RepositoryError;
use crate::services::auth::AuthError;
use crate::services::checkout::CheckoutError;
use crate::services::razorpay::RazorpayError;
use crate::services::twilio::TwilioError;

/// Shown when a payment could not be verified.
pub const VERIFICATION_FAILED_MESSAGE: &str =
    "Payment verification failed. Please contact support if payment was deducted.";

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// User store operation failed.
    #[error("Storage error: {0}")]
    Storage(#[from] RepositoryError),

    /// Session read or write failed.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Payment gateway call failed.
    #[error("Payment error: {0}")]
    Payment(#[from] RazorpayError),

    /// SMS provider call failed.
    #[error("SMS error: {0}")]
    Sms(#[from] TwilioError),

    /// Checkout attempt failed.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Cart mutation or totals rejected.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// Input failed validation; nothing was changed.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// User is not authenticated.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Storage(_) | Self::Session(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Auth(err) => match err {
                AuthError::InvalidEmail(_) | AuthError::InvalidName | AuthError::WeakPassword(_) => {
                    StatusCode::BAD_REQUEST
                }
                AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                AuthError::UserAlreadyExists => StatusCode::CONFLICT,
                AuthError::Repository(_) | AuthError::PasswordHash => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::Payment(RazorpayError::InvalidAmount(_))
            | Self::Sms(TwilioError::InvalidMessage(_)) => StatusCode::BAD_REQUEST,
            Self::Payment(_) | Self::Sms(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Checkout(err) => match err {
                CheckoutError::MissingInformation
                | CheckoutError::EmptyCart
                | CheckoutError::Cart(_)
                | CheckoutError::VerificationFailed => StatusCode::BAD_REQUEST,
                CheckoutError::NoPendingCheckout | CheckoutError::InvalidTransition { .. } => {
                    StatusCode::CONFLICT
                }
                CheckoutError::OrderCreation(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Cart(_) | Self::Validation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        }
    }

    // Don't expose internal error details to clients
    fn client_message(&self) -> String {
        match self {
            Self::Storage(_) | Self::Session(_) | Self::Internal(_) => {
                "Internal server error".to_string()
            }
            Self::Auth(err) => match err {
                AuthError::InvalidEmail(_) => "Please enter a valid email address.".to_string(),
                AuthError::InvalidName => {
                    "Please enter a valid name (at least 2 characters).".to_string()
                }
                AuthError::WeakPassword(msg) => msg.clone(),
                AuthError::InvalidCredentials => {
                    "Invalid email or password. Please try again.".to_string()
                }
                AuthError::UserAlreadyExists => {
                    "This email is already registered. Please use a different email or login."
                        .to_string()
                }
                AuthError::Repository(_) | AuthError::PasswordHash => {
                    "An unexpected error occurred. Please try again.".to_string()
                }
            },
            Self::Payment(RazorpayError::InvalidAmount(_)) => {
                "Amount must be greater than zero".to_string()
            }
            Self::Payment(_) => "Failed to create order".to_string(),
            Self::Sms(TwilioError::InvalidMessage(reason)) => (*reason).to_string(),
            Self::Sms(_) => "Failed to send SMS".to_string(),
            Self::Checkout(err) => match err {
                CheckoutError::MissingInformation => "Please fill in all required fields".to_string(),
                CheckoutError::EmptyCart => "Your cart is empty".to_string(),
                CheckoutError::Cart(err) => cart_message(err),
                CheckoutError::OrderCreation(_) => {
                    "Unable to process payment. Please try again.".to_string()
                }
                CheckoutError::VerificationFailed => VERIFICATION_FAILED_MESSAGE.to_string(),
                CheckoutError::NoPendingCheckout | CheckoutError::InvalidTransition { .. } => {
                    "No checkout in progress".to_string()
                }
            },
            Self::Cart(err) => cart_message(err),
            Self::Validation(msg)
            | Self::NotFound(msg)
            | Self::Unauthorized(msg)
            | Self::BadRequest(msg) => msg.clone(),
        }
    }
}

fn cart_message(err: &CartError) -> String {
    match err {
        CartError::Overflow => "Cart total is too large".to_string(),
        CartError::UnknownPromo(_) => "Invalid promo code".to_string(),
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Capture server errors to Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
        }

        let body = json!({ "success": false, "error": self.client_message() });
        (status, Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Set the Sentry user context from a user ID.
///
/// Call this after successful authentication to associate errors with users.
pub fn set_sentry_user(user_id: &impl ToString, email: Option<&str>) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(user_id.to_string()),
            email: email.map(String::from),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context.
///
/// Call this on logout to stop associating errors with the user.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

/// Add a breadcrumb for user actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of user actions
/// leading up to an error.
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}
