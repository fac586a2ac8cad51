//! Twilio SMS client.
//!
//! Sends plain text messages through the Messages resource. Message bodies
//! for order notifications are built in [`templates`].

pub mod templates;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use thiserror::Error;

use crate::config::TwilioConfig;

/// Errors that can occur when sending SMS.
#[derive(Debug, Error)]
pub enum TwilioError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Recipient or body was empty.
    #[error("invalid message: {0}")]
    InvalidMessage(&'static str),
}

/// Provider receipt for an accepted message.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SmsReceipt {
    pub sid: String,
    pub status: String,
}

/// Twilio API client.
#[derive(Clone)]
pub struct TwilioClient {
    client: reqwest::Client,
    api_url: String,
    account_sid: String,
    auth_token: SecretString,
    from: String,
}

impl TwilioClient {
    /// Create a new Twilio client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &TwilioConfig) -> Result<Self, TwilioError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(15))
            .build()?;

        Ok(Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            account_sid: config.account_sid.clone(),
            auth_token: config.auth_token.clone(),
            from: config.phone_number.clone(),
        })
    }

    /// Send `body` to `to` from the configured number.
    ///
    /// # Errors
    ///
    /// Returns `TwilioError::InvalidMessage` for an empty recipient or body
    /// without calling the provider, or an HTTP/API error.
    #[tracing::instrument(skip(self, body), fields(body_len = body.len()))]
    pub async fn send_sms(&self, to: &str, body: &str) -> Result<SmsReceipt, TwilioError> {
        let to = to.trim();
        if to.is_empty() {
            return Err(TwilioError::InvalidMessage("recipient is required"));
        }
        if body.trim().is_empty() {
            return Err(TwilioError::InvalidMessage("message is required"));
        }

        let url = format!(
            "{}/Accounts/{}/Messages.json",
            self.api_url, self.account_sid
        );
        let form = [("To", to), ("From", self.from.as_str()), ("Body", body)];

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.account_sid, Some(self.auth_token.expose_secret()))
            .form(&form)
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(TwilioError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let receipt: SmsReceipt = response.json().await?;
        tracing::info!(sid = %receipt.sid, status = %receipt.status, "SMS accepted");
        Ok(receipt)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client() -> TwilioClient {
        TwilioClient::new(&TwilioConfig {
            account_sid: "AC123".to_string(),
            auth_token: SecretString::from("token"),
            phone_number: "+15005550006".to_string(),
            api_url: "http://127.0.0.1:9".to_string(),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_empty_recipient_rejected() {
        let result = client().send_sms("  ", "hello").await;
        assert!(matches!(result, Err(TwilioError::InvalidMessage(_))));
    }

    #[tokio::test]
    async fn test_empty_body_rejected() {
        let result = client().send_sms("+919876543210", "").await;
        assert!(matches!(result, Err(TwilioError::InvalidMessage(_))));
    }
}
