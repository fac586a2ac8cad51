//! SMS endpoint.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::Result;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SendSmsRequest {
    pub to: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendSmsResponse {
    pub success: bool,
    pub message_id: String,
    pub status: String,
}

/// POST /api/twilio/send-sms
#[instrument(skip(state, request))]
pub async fn send_sms(
    State(state): State<AppState>,
    Json(request): Json<SendSmsRequest>,
) -> Result<Json<SendSmsResponse>> {
    let receipt = state
        .twilio()
        .send_sms(&request.to, &request.message)
        .await?;

    Ok(Json(SendSmsResponse {
        success: true,
        message_id: receipt.sid,
        status: receipt.status,
    }))
}
