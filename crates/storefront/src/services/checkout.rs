//! Checkout orchestration.
//!
//! One checkout attempt walks a fixed sequence of stages:
//!
//! ```text
//! Idle -> OrderCreating -> WidgetOpen -> Verifying -> Notifying -> Completed
//!              |                            |
//!              +--> Idle (gateway error)    +--> WidgetOpen (bad signature)
//! ```
//!
//! The pending attempt is kept in the session between the two requests
//! (`begin` and `complete`). Payment happens in the gateway's hosted widget,
//! so the server only creates the order and verifies the returned signature.
//! SMS delivery after a verified payment is best effort.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use nurvi_core::{Cart, CartError, OrderId, OrderSummary};

use crate::config::BusinessConfig;
use crate::services::razorpay::{PaymentConfirmation, RazorpayClient, RazorpayError};
use crate::services::twilio::TwilioClient;
use crate::services::twilio::templates::order_confirmation_message;

/// Widget accent colour.
pub const WIDGET_THEME_COLOR: &str = "#f59e0b";

const WIDGET_DESCRIPTION: &str = "Jewelry Purchase";

/// Stage of a checkout attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutStage {
    Idle,
    OrderCreating,
    WidgetOpen,
    Verifying,
    Notifying,
    Completed,
}

impl CheckoutStage {
    /// Whether `next` may follow `self`.
    #[must_use]
    pub const fn can_advance_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::OrderCreating)
                | (Self::OrderCreating, Self::WidgetOpen | Self::Idle)
                | (Self::WidgetOpen, Self::Verifying)
                | (Self::Verifying, Self::Notifying | Self::WidgetOpen)
                | (Self::Notifying, Self::Completed)
        )
    }

    /// Move to `next`, rejecting transitions not in the stage graph.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::InvalidTransition` and leaves the stage as is.
    pub fn advance(&mut self, next: Self) -> Result<(), CheckoutError> {
        if !self.can_advance_to(next) {
            return Err(CheckoutError::InvalidTransition {
                from: *self,
                to: next,
            });
        }
        *self = next;
        Ok(())
    }
}

/// Errors from a checkout attempt.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// A required contact field is blank.
    #[error("Please fill in all required fields")]
    MissingInformation,

    #[error("cart is empty")]
    EmptyCart,

    /// The cart totals could not be computed.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// The gateway refused or could not be reached.
    #[error("order creation failed: {0}")]
    OrderCreation(#[from] RazorpayError),

    /// `complete` was called without a pending attempt.
    #[error("no checkout in progress")]
    NoPendingCheckout,

    /// Signature mismatch or an order id that is not the pending one.
    #[error("payment verification failed")]
    VerificationFailed,

    #[error("invalid checkout transition from {from:?} to {to:?}")]
    InvalidTransition {
        from: CheckoutStage,
        to: CheckoutStage,
    },
}

/// Payment methods offered at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Razorpay,
}

/// Contact and shipping details submitted with the checkout form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CheckoutForm {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub phone: String,
    pub payment_method: PaymentMethod,
}

impl CheckoutForm {
    fn validate(&self) -> Result<(), CheckoutError> {
        let required = [&self.first_name, &self.last_name, &self.email, &self.phone];
        if required.iter().any(|field| field.trim().is_empty()) {
            return Err(CheckoutError::MissingInformation);
        }
        Ok(())
    }

    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
    }
}

/// A checkout waiting for the customer to pay in the widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingCheckout {
    /// Gateway order id.
    pub order_id: OrderId,
    /// Gateway amount in paise.
    pub amount: i64,
    pub currency: String,
    pub summary: OrderSummary,
    /// Cart fingerprint the order was created for.
    pub fingerprint: String,
    pub form: CheckoutForm,
    pub stage: CheckoutStage,
    pub created_at: DateTime<Utc>,
}

impl PendingCheckout {
    fn advance(&mut self, next: CheckoutStage) -> Result<(), CheckoutError> {
        let from = self.stage;
        self.stage.advance(next)?;
        tracing::debug!(order_id = %self.order_id, from = ?from, to = ?next, "Checkout stage");
        Ok(())
    }

    /// Whether this attempt can be reused for `cart`.
    fn matches(&self, cart: &Cart, summary: &OrderSummary) -> bool {
        self.stage == CheckoutStage::WidgetOpen
            && self.fingerprint == cart.fingerprint()
            && self.summary.total == summary.total
    }
}

/// Prefilled customer fields in the widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WidgetPrefill {
    pub name: String,
    pub email: String,
    pub contact: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WidgetTheme {
    pub color: String,
}

/// Everything the browser needs to open the hosted payment widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WidgetOptions {
    pub key: String,
    pub amount: i64,
    pub currency: String,
    pub name: String,
    pub description: String,
    pub order_id: String,
    pub prefill: WidgetPrefill,
    pub theme: WidgetTheme,
}

/// Result of a completed checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutReceipt {
    pub order_id: OrderId,
    pub payment_id: String,
    pub summary: OrderSummary,
    /// False when the confirmation SMS could not be sent.
    pub sms_sent: bool,
    pub redirect: String,
}

/// Drives checkout attempts against the payment and SMS providers.
pub struct CheckoutService<'a> {
    razorpay: &'a RazorpayClient,
    twilio: &'a TwilioClient,
    business: &'a BusinessConfig,
}

impl<'a> CheckoutService<'a> {
    #[must_use]
    pub const fn new(
        razorpay: &'a RazorpayClient,
        twilio: &'a TwilioClient,
        business: &'a BusinessConfig,
    ) -> Self {
        Self {
            razorpay,
            twilio,
            business,
        }
    }

    /// Validate the form and create (or reuse) a gateway order for the cart.
    ///
    /// When `existing` is an open attempt for the same cart contents and
    /// total, it is returned as is and no new gateway order is created.
    ///
    /// # Errors
    ///
    /// `MissingInformation` or `EmptyCart` before any network call;
    /// `OrderCreation` when the gateway fails.
    #[tracing::instrument(skip_all, fields(items = cart.items().len()))]
    pub async fn begin(
        &self,
        cart: &Cart,
        form: CheckoutForm,
        existing: Option<PendingCheckout>,
    ) -> Result<PendingCheckout, CheckoutError> {
        form.validate()?;
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let summary = cart.summary()?;

        if let Some(mut pending) = existing.filter(|p| p.matches(cart, &summary)) {
            tracing::info!(order_id = %pending.order_id, "Reusing open checkout");
            pending.form = form;
            return Ok(pending);
        }

        let mut stage = CheckoutStage::Idle;
        stage.advance(CheckoutStage::OrderCreating)?;

        let order = match self.razorpay.create_order(summary.total).await {
            Ok(order) => order,
            Err(e) => {
                stage.advance(CheckoutStage::Idle)?;
                tracing::warn!(error = %e, "Gateway order creation failed");
                return Err(e.into());
            }
        };
        stage.advance(CheckoutStage::WidgetOpen)?;

        Ok(PendingCheckout {
            order_id: OrderId::new(order.id),
            amount: order.amount,
            currency: order.currency,
            summary,
            fingerprint: cart.fingerprint(),
            form,
            stage,
            created_at: Utc::now(),
        })
    }

    /// Options for the hosted widget.
    #[must_use]
    pub fn widget_options(&self, pending: &PendingCheckout) -> WidgetOptions {
        WidgetOptions {
            key: self.razorpay.key_id().to_string(),
            amount: pending.amount,
            currency: pending.currency.clone(),
            name: self.business.name.clone(),
            description: WIDGET_DESCRIPTION.to_string(),
            order_id: pending.order_id.to_string(),
            prefill: WidgetPrefill {
                name: pending.form.full_name(),
                email: pending.form.email.trim().to_string(),
                contact: pending.form.phone.trim().to_string(),
            },
            theme: WidgetTheme {
                color: WIDGET_THEME_COLOR.to_string(),
            },
        }
    }

    /// Verify the widget's payment result and notify the customer.
    ///
    /// On a failed verification the attempt returns to `WidgetOpen` so the
    /// customer can retry. A failed SMS is logged and reported in the
    /// receipt but never fails a verified payment.
    ///
    /// # Errors
    ///
    /// `VerificationFailed` when the order id or signature does not match.
    #[tracing::instrument(skip_all, fields(order_id = %pending.order_id))]
    pub async fn complete(
        &self,
        pending: &mut PendingCheckout,
        confirmation: &PaymentConfirmation,
    ) -> Result<CheckoutReceipt, CheckoutError> {
        pending.advance(CheckoutStage::Verifying)?;

        let verified = confirmation.razorpay_order_id == pending.order_id.as_str()
            && self.razorpay.verify_signature(confirmation);
        if !verified {
            pending.advance(CheckoutStage::WidgetOpen)?;
            tracing::warn!(
                payment_id = %confirmation.razorpay_payment_id,
                "Payment verification failed"
            );
            return Err(CheckoutError::VerificationFailed);
        }

        pending.advance(CheckoutStage::Notifying)?;
        let message = order_confirmation_message(
            pending.form.first_name.trim(),
            &pending.order_id,
            pending.summary.total,
            &self.business.name,
            &self.business.website_url,
        );
        let sms_sent = match self.twilio.send_sms(&pending.form.phone, &message).await {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Order confirmation SMS failed");
                false
            }
        };

        pending.advance(CheckoutStage::Completed)?;
        tracing::info!(payment_id = %confirmation.razorpay_payment_id, sms_sent, "Checkout completed");

        Ok(CheckoutReceipt {
            order_id: pending.order_id.clone(),
            payment_id: confirmation.razorpay_payment_id.clone(),
            summary: pending.summary,
            sms_sent,
            redirect: order_success_path(&pending.order_id),
        })
    }
}

/// `/order-success?orderId=<id>`
#[must_use]
pub fn order_success_path(order_id: &OrderId) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(order_id.as_str().as_bytes()).collect();
    format!("/order-success?orderId={encoded}")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use nurvi_core::{CartItem, Price, ProductId};
    use secrecy::SecretString;

    use super::*;
    use crate::config::{RazorpayConfig, TwilioConfig};
    use crate::services::razorpay::sign;

    const SECRET: &str = "s";
    // Nothing listens here, so any network call fails fast
    const DEAD_URL: &str = "http://127.0.0.1:9";

    fn clients() -> (RazorpayClient, TwilioClient, BusinessConfig) {
        let razorpay = RazorpayClient::new(&RazorpayConfig {
            key_id: "rzp_test_key".to_string(),
            key_secret: SecretString::from(SECRET),
            api_url: DEAD_URL.to_string(),
        })
        .unwrap();
        let twilio = TwilioClient::new(&TwilioConfig {
            account_sid: "AC123".to_string(),
            auth_token: SecretString::from("token"),
            phone_number: "+15005550006".to_string(),
            api_url: DEAD_URL.to_string(),
        })
        .unwrap();
        (razorpay, twilio, BusinessConfig::default())
    }

    fn form() -> CheckoutForm {
        CheckoutForm {
            email: "priya@example.com".to_string(),
            first_name: "Priya".to_string(),
            last_name: "Sharma".to_string(),
            phone: "+919876543210".to_string(),
            ..CheckoutForm::default()
        }
    }

    fn cart() -> Cart {
        let mut cart = Cart::new();
        cart.add_item(CartItem {
            id: ProductId::new("ring-1"),
            name: "Kundan Ring 1".to_string(),
            price: Price::from_rupees(24_999),
            quantity: 1,
            image: String::new(),
            size: None,
            color: None,
            customization: None,
        });
        cart
    }

    fn pending(cart: &Cart) -> PendingCheckout {
        PendingCheckout {
            order_id: OrderId::new("order_1"),
            amount: 2_999_900,
            currency: "INR".to_string(),
            summary: cart.summary().unwrap(),
            fingerprint: cart.fingerprint(),
            form: form(),
            stage: CheckoutStage::WidgetOpen,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_stage_transitions() {
        use CheckoutStage::{Completed, Idle, Notifying, OrderCreating, Verifying, WidgetOpen};
        assert!(Idle.can_advance_to(OrderCreating));
        assert!(OrderCreating.can_advance_to(Idle));
        assert!(Verifying.can_advance_to(WidgetOpen));
        assert!(!Idle.can_advance_to(Completed));
        assert!(!WidgetOpen.can_advance_to(Notifying));
        assert!(!Completed.can_advance_to(Verifying));
    }

    #[test]
    fn test_invalid_advance_keeps_stage() {
        let mut stage = CheckoutStage::Idle;
        stage.advance(CheckoutStage::OrderCreating).unwrap();
        assert_eq!(stage, CheckoutStage::OrderCreating);

        let err = stage.advance(CheckoutStage::Completed).unwrap_err();
        assert!(matches!(
            err,
            CheckoutError::InvalidTransition {
                from: CheckoutStage::OrderCreating,
                to: CheckoutStage::Completed,
            }
        ));
        assert_eq!(stage, CheckoutStage::OrderCreating);
    }

    #[tokio::test]
    async fn test_missing_fields_rejected_before_network() {
        let (razorpay, twilio, business) = clients();
        let service = CheckoutService::new(&razorpay, &twilio, &business);

        let mut incomplete = form();
        incomplete.phone = "   ".to_string();
        let result = service.begin(&cart(), incomplete, None).await;
        assert!(matches!(result, Err(CheckoutError::MissingInformation)));

        let result = service.begin(&Cart::new(), form(), None).await;
        assert!(matches!(result, Err(CheckoutError::EmptyCart)));
    }

    #[tokio::test]
    async fn test_gateway_failure_surfaces_as_order_creation() {
        let (razorpay, twilio, business) = clients();
        let service = CheckoutService::new(&razorpay, &twilio, &business);

        let result = service.begin(&cart(), form(), None).await;
        assert!(matches!(result, Err(CheckoutError::OrderCreation(_))));
    }

    #[tokio::test]
    async fn test_open_checkout_for_same_cart_is_reused() {
        let (razorpay, twilio, business) = clients();
        let service = CheckoutService::new(&razorpay, &twilio, &business);
        let cart = cart();

        // The gateway is unreachable, so success proves no order was created
        let reused = service
            .begin(&cart, form(), Some(pending(&cart)))
            .await
            .unwrap();
        assert_eq!(reused.order_id.as_str(), "order_1");

        let mut changed = cart.clone();
        changed.update_quantity(&ProductId::new("ring-1"), 2);
        let result = service.begin(&changed, form(), Some(pending(&cart))).await;
        assert!(matches!(result, Err(CheckoutError::OrderCreation(_))));
    }

    #[test]
    fn test_widget_options() {
        let (razorpay, twilio, business) = clients();
        let service = CheckoutService::new(&razorpay, &twilio, &business);
        let options = service.widget_options(&pending(&cart()));

        assert_eq!(options.key, "rzp_test_key");
        assert_eq!(options.amount, 2_999_900);
        assert_eq!(options.name, "Nurvi Jewel");
        assert_eq!(options.description, "Jewelry Purchase");
        assert_eq!(options.prefill.name, "Priya Sharma");
        assert_eq!(options.prefill.contact, "+919876543210");
        assert_eq!(options.theme.color, "#f59e0b");
    }

    #[tokio::test]
    async fn test_bad_signature_returns_to_widget() {
        let (razorpay, twilio, business) = clients();
        let service = CheckoutService::new(&razorpay, &twilio, &business);
        let mut pending = pending(&cart());

        let confirmation = PaymentConfirmation {
            razorpay_order_id: "order_1".to_string(),
            razorpay_payment_id: "pay_1".to_string(),
            razorpay_signature: sign("wrong", "order_1", "pay_1"),
        };
        let result = service.complete(&mut pending, &confirmation).await;

        assert!(matches!(result, Err(CheckoutError::VerificationFailed)));
        assert_eq!(pending.stage, CheckoutStage::WidgetOpen);
    }

    #[tokio::test]
    async fn test_foreign_order_id_is_rejected() {
        let (razorpay, twilio, business) = clients();
        let service = CheckoutService::new(&razorpay, &twilio, &business);
        let mut pending = pending(&cart());

        let confirmation = PaymentConfirmation {
            razorpay_order_id: "order_2".to_string(),
            razorpay_payment_id: "pay_1".to_string(),
            razorpay_signature: sign(SECRET, "order_2", "pay_1"),
        };
        let result = service.complete(&mut pending, &confirmation).await;
        assert!(matches!(result, Err(CheckoutError::VerificationFailed)));
    }

    #[tokio::test]
    async fn test_sms_failure_does_not_fail_verified_payment() {
        let (razorpay, twilio, business) = clients();
        let service = CheckoutService::new(&razorpay, &twilio, &business);
        let mut pending = pending(&cart());

        let confirmation = PaymentConfirmation {
            razorpay_order_id: "order_1".to_string(),
            razorpay_payment_id: "pay_1".to_string(),
            razorpay_signature: sign(SECRET, "order_1", "pay_1"),
        };
        let receipt = service.complete(&mut pending, &confirmation).await.unwrap();

        assert_eq!(pending.stage, CheckoutStage::Completed);
        assert!(!receipt.sms_sent);
        assert_eq!(receipt.redirect, "/order-success?orderId=order_1");
        assert_eq!(receipt.summary.total, Price::from_rupees(29_999));
    }
}
