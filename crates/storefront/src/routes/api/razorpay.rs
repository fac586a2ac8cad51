//! Payment gateway endpoints.

use axum::{
    Json,
    extract::State,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use nurvi_core::Price;

use crate::error::Result;
use crate::services::razorpay::PaymentConfirmation;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    /// Whole rupees.
    pub amount: Price,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderResponse {
    pub success: bool,
    pub order_id: String,
    /// Paise.
    pub amount: i64,
    pub currency: String,
}

#[derive(Debug, Serialize)]
pub struct VerifyPaymentResponse {
    pub success: bool,
    pub message: &'static str,
}

/// POST /api/razorpay/create-order
#[instrument(skip(state, request), fields(amount = %request.amount))]
pub async fn create_order(
    State(state): State<AppState>,
    Json(request): Json<CreateOrderRequest>,
) -> Result<Json<CreateOrderResponse>> {
    let order = state.razorpay().create_order(request.amount).await?;

    Ok(Json(CreateOrderResponse {
        success: true,
        order_id: order.id,
        amount: order.amount,
        currency: order.currency,
    }))
}

/// POST /api/razorpay/verify-payment
///
/// A malformed body is treated like a failed verification and answered with
/// 400 rather than a server error.
#[instrument(skip_all)]
pub async fn verify_payment(
    State(state): State<AppState>,
    body: std::result::Result<Json<PaymentConfirmation>, JsonRejection>,
) -> Response {
    let verified = match body {
        Ok(Json(confirmation)) => state.razorpay().verify_signature(&confirmation),
        // Client input problem, so 400 instead of 500
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Malformed verification request");
            false
        }
    };

    if verified {
        Json(VerifyPaymentResponse {
            success: true,
            message: "Payment verified successfully",
        })
        .into_response()
    } else {
        (
            StatusCode::BAD_REQUEST,
            Json(VerifyPaymentResponse {
                success: false,
                message: "Payment verification failed",
            }),
        )
            .into_response()
    }
}

