//! Razorpay payment gateway client.
//!
//! Creates gateway orders and verifies the payment signature the hosted
//! checkout widget returns. Only the two calls the storefront needs are
//! implemented; the widget itself runs in the browser.

use chrono::Utc;
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use thiserror::Error;

use nurvi_core::{CurrencyCode, Price};

use crate::config::RazorpayConfig;

type HmacSha256 = Hmac<Sha256>;

/// Hex length of an HMAC-SHA256 signature.
const SIGNATURE_HEX_LEN: usize = 64;

/// Errors that can occur when interacting with the Razorpay API.
#[derive(Debug, Error)]
pub enum RazorpayError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Amount is zero, negative, or too large for paise.
    #[error("invalid amount: {0}")]
    InvalidAmount(Price),
}

/// An order created on the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RazorpayOrder {
    pub id: String,
    /// Amount in paise.
    pub amount: i64,
    pub currency: String,
    #[serde(default)]
    pub receipt: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// The identifiers the checkout widget hands back after payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentConfirmation {
    pub razorpay_order_id: String,
    pub razorpay_payment_id: String,
    pub razorpay_signature: String,
}

#[derive(Debug, Serialize)]
struct CreateOrderRequest<'a> {
    amount: i64,
    currency: &'a str,
    receipt: &'a str,
    payment_capture: u8,
}

/// Razorpay API client.
#[derive(Clone)]
pub struct RazorpayClient {
    client: reqwest::Client,
    api_url: String,
    key_id: String,
    key_secret: SecretString,
}

impl RazorpayClient {
    /// Create a new Razorpay client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &RazorpayConfig) -> Result<Self, RazorpayError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(15))
            .build()?;

        Ok(Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            key_id: config.key_id.clone(),
            key_secret: config.key_secret.clone(),
        })
    }

    /// Public key id for the checkout widget.
    #[must_use]
    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    /// Create an auto-captured INR order for `amount` rupees.
    ///
    /// # Errors
    ///
    /// Returns `RazorpayError::InvalidAmount` for non-positive amounts without
    /// calling the gateway, or an HTTP/API error from the gateway.
    #[tracing::instrument(skip(self), fields(amount = %amount))]
    pub async fn create_order(&self, amount: Price) -> Result<RazorpayOrder, RazorpayError> {
        let paise = amount
            .to_minor_units()
            .filter(|p| *p > 0)
            .ok_or(RazorpayError::InvalidAmount(amount))?;
        let receipt = format!("receipt_{}", Utc::now().timestamp_millis());

        let body = CreateOrderRequest {
            amount: paise,
            currency: CurrencyCode::INR.code(),
            receipt: &receipt,
            payment_capture: 1,
        };

        let response = self
            .client
            .post(format!("{}/orders", self.api_url))
            .basic_auth(&self.key_id, Some(self.key_secret.expose_secret()))
            .json(&body)
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(RazorpayError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let order: RazorpayOrder = response.json().await?;
        tracing::info!(order_id = %order.id, paise, "Created gateway order");
        Ok(order)
    }

    /// Check a payment signature in constant time.
    #[must_use]
    pub fn verify_signature(&self, confirmation: &PaymentConfirmation) -> bool {
        verify_signature(
            self.key_secret.expose_secret(),
            &confirmation.razorpay_order_id,
            &confirmation.razorpay_payment_id,
            &confirmation.razorpay_signature,
        )
    }
}

/// Hex HMAC-SHA256 of `order_id|payment_id`, the value the gateway signs.
#[must_use]
pub fn sign(secret: &str, order_id: &str, payment_id: &str) -> String {
    mac_for(secret, order_id, payment_id)
        .map(|mac| hex::encode(mac.finalize().into_bytes()))
        .unwrap_or_default()
}

/// Whether `signature` is the gateway signature for the pair.
///
/// Only the exact form [`sign`] produces is accepted: 64 lowercase hex
/// digits with no surrounding whitespace.
#[must_use]
pub fn verify_signature(secret: &str, order_id: &str, payment_id: &str, signature: &str) -> bool {
    if !is_canonical_hex(signature) {
        return false;
    }
    let Ok(provided) = hex::decode(signature) else {
        return false;
    };
    let Some(mac) = mac_for(secret, order_id, payment_id) else {
        return false;
    };
    mac.verify_slice(&provided).is_ok()
}

fn is_canonical_hex(signature: &str) -> bool {
    signature.len() == SIGNATURE_HEX_LEN
        && signature
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}

fn mac_for(secret: &str, order_id: &str, payment_id: &str) -> Option<HmacSha256> {
    let Ok(mut mac) = HmacSha256::new_from_slice(secret.as_bytes()) else {
        return None;
    };
    mac.update(order_id.as_bytes());
    mac.update(b"|");
    mac.update(payment_id.as_bytes());
    Some(mac)
}
