//! Contact form route handler.

use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use nurvi_core::Email;

use crate::error::{AppError, Result};

/// Contact form data.
#[derive(Debug, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub success: bool,
    pub message: String,
}

/// POST /api/contact
///
/// Inquiries are logged for the support team; nothing is persisted.
#[instrument(skip(form), fields(email = %form.email))]
pub async fn submit(Json(form): Json<ContactForm>) -> Result<Json<ContactResponse>> {
    if form.name.trim().is_empty() || form.message.trim().is_empty() {
        return Err(AppError::Validation(
            "Name and message are required.".to_string(),
        ));
    }
    let email = Email::parse(&form.email)
        .map_err(|_| AppError::Validation("Please enter a valid email address.".to_string()))?;

    tracing::info!(
        email = %email,
        name = %form.name.trim(),
        phone = form.phone.as_deref().unwrap_or_default(),
        subject = form.subject.as_deref().unwrap_or("General Inquiry"),
        message_len = form.message.len(),
        "Contact inquiry received"
    );

    Ok(Json(ContactResponse {
        success: true,
        message: "Thank you for reaching out! We'll get back to you within 24 hours.".to_string(),
    }))
}
