//! Checkout route handlers.
//!
//! `POST /api/checkout` opens an attempt and returns the widget options;
//! `POST /api/checkout/complete` verifies the widget's result. The open
//! attempt is held in the session between the two.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use nurvi_core::{OrderId, OrderSummary};

use super::cart::{load_cart, save_cart};
use crate::error::{AppError, Result, add_breadcrumb};
use crate::models::session_keys;
use crate::services::CheckoutService;
use crate::services::checkout::{
    CheckoutError, CheckoutForm, CheckoutReceipt, PendingCheckout, WidgetOptions,
};
use crate::services::razorpay::PaymentConfirmation;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct BeginCheckoutResponse {
    pub success: bool,
    pub summary: OrderSummary,
    pub widget: WidgetOptions,
}

#[derive(Debug, Serialize)]
pub struct CompleteCheckoutResponse {
    pub success: bool,
    #[serde(flatten)]
    pub receipt: CheckoutReceipt,
}

#[derive(Debug, Deserialize)]
pub struct OrderSuccessParams {
    #[serde(rename = "orderId")]
    pub order_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSuccessResponse {
    pub success: bool,
    pub order_id: Option<OrderId>,
    pub message: String,
    pub notice: String,
}

fn service(state: &AppState) -> CheckoutService<'_> {
    CheckoutService::new(state.razorpay(), state.twilio(), &state.config().business)
}

/// POST /api/checkout
#[instrument(skip(state, session, form))]
pub async fn begin(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<CheckoutForm>,
) -> Result<Json<BeginCheckoutResponse>> {
    let cart = load_cart(&session).await?;
    let existing = session
        .get::<PendingCheckout>(session_keys::CHECKOUT)
        .await?;

    let checkout = service(&state);
    let pending = checkout.begin(&cart, form, existing).await?;
    session.insert(session_keys::CHECKOUT, &pending).await?;
    add_breadcrumb(
        "checkout",
        "Opened payment widget",
        Some(&[("order_id", pending.order_id.as_str())]),
    );

    Ok(Json(BeginCheckoutResponse {
        success: true,
        summary: pending.summary,
        widget: checkout.widget_options(&pending),
    }))
}

/// POST /api/checkout/complete
#[instrument(skip(state, session, confirmation), fields(order_id = %confirmation.razorpay_order_id))]
pub async fn complete(
    State(state): State<AppState>,
    session: Session,
    Json(confirmation): Json<PaymentConfirmation>,
) -> Result<Json<CompleteCheckoutResponse>> {
    let mut pending = session
        .get::<PendingCheckout>(session_keys::CHECKOUT)
        .await?
        .ok_or(CheckoutError::NoPendingCheckout)?;

    let result = service(&state).complete(&mut pending, &confirmation).await;
    let receipt = match result {
        Ok(receipt) => receipt,
        Err(e) => {
            // Keep the attempt open so the customer can retry
            session.insert(session_keys::CHECKOUT, &pending).await?;
            return Err(AppError::Checkout(e));
        }
    };

    let mut cart = load_cart(&session).await?;
    cart.clear();
    save_cart(&session, &cart).await?;
    session
        .remove::<PendingCheckout>(session_keys::CHECKOUT)
        .await?;

    Ok(Json(CompleteCheckoutResponse {
        success: true,
        receipt,
    }))
}

/// GET /api/checkout/summary
#[instrument(skip(session))]
pub async fn summary(session: Session) -> Result<Json<OrderSummary>> {
    let cart = load_cart(&session).await?;
    Ok(Json(cart.summary()?))
}

/// GET /order-success?orderId=
pub async fn order_success(
    State(state): State<AppState>,
    Query(params): Query<OrderSuccessParams>,
) -> Json<OrderSuccessResponse> {
    let order_id = params
        .order_id
        .filter(|id| !id.trim().is_empty())
        .map(OrderId::new);

    Json(OrderSuccessResponse {
        success: true,
        order_id,
        message: format!(
            "Thank you for choosing {}! Your order has been successfully placed.",
            state.config().business.name
        ),
        notice: "You'll receive an SMS confirmation shortly.".to_string(),
    })
}
