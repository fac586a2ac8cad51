//! Order history route handlers.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use nurvi_core::OrderStatus;

use crate::db::OrderFilter;
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::CustomerOrder;
use crate::state::AppState;

/// `status=all` (or no status) means every status.
#[derive(Debug, Default, Deserialize)]
pub struct OrderListQuery {
    pub search: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct OrdersResponse {
    pub orders: Vec<CustomerOrder>,
    pub total: usize,
}

fn parse_status(raw: Option<&str>) -> Result<Option<OrderStatus>> {
    match raw.map(|s| s.trim().to_lowercase()).as_deref() {
        None | Some("" | "all") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(AppError::BadRequest),
    }
}

/// GET /api/orders
#[instrument(skip(user, state), fields(user_id = %user.id))]
pub async fn index(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Query(query): Query<OrderListQuery>,
) -> Result<Json<OrdersResponse>> {
    let filter = OrderFilter {
        search: query.search,
        status: parse_status(query.status.as_deref())?,
    };
    let orders = state.orders().list(&filter);

    Ok(Json(OrdersResponse {
        total: orders.len(),
        orders,
    }))
}
