//! Order route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Serialize;
use tracing::instrument;

use nurvi_core::{OrderId, OrderStatus};

use super::customers::ListQuery;
use super::parse_status;
use crate::db::OrderFilter;
use crate::error::Result;
use crate::middleware::{RequireAdmin, require_permission};
use crate::models::{OrderRecord, Permission};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct OrdersResponse {
    pub orders: Vec<OrderRecord>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct OrderDeletedResponse {
    pub success: bool,
    pub message: &'static str,
}

/// GET /api/admin/orders
#[instrument(skip(admin, state), fields(admin_id = %admin.id))]
pub async fn index(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<OrdersResponse>> {
    require_permission(&admin, Permission::ViewOrders)?;

    let filter = OrderFilter {
        search: query.search,
        status: parse_status::<OrderStatus>(query.status.as_deref())?,
    };
    let orders = state.directory().orders().list(&filter).await;

    Ok(Json(OrdersResponse {
        total: orders.len(),
        orders,
    }))
}

/// GET /api/admin/orders/{id}
#[instrument(skip(admin, state), fields(admin_id = %admin.id))]
pub async fn show(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<OrderRecord>> {
    require_permission(&admin, Permission::ViewOrders)?;
    let order = state.directory().orders().get(&OrderId::new(id)).await?;
    Ok(Json(order))
}

/// DELETE /api/admin/orders/{id}
#[instrument(skip(admin, state), fields(admin_id = %admin.id))]
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<OrderDeletedResponse>> {
    require_permission(&admin, Permission::EditOrders)?;
    let removed = state.directory().orders().delete(&OrderId::new(id)).await?;

    tracing::info!(order_id = %removed.id, "Order deleted");
    Ok(Json(OrderDeletedResponse {
        success: true,
        message: "Order has been removed from the system",
    }))
}
