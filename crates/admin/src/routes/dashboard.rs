//! Dashboard overview.

use axum::{Json, extract::State};
use serde::Serialize;
use tracing::instrument;

use crate::db::{CustomerFilter, DashboardStats, OrderFilter};
use crate::error::Result;
use crate::middleware::{RequireAdmin, require_permission};
use crate::models::{CustomerRecord, OrderRecord, Permission};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub stats: DashboardStats,
    pub customers: Vec<CustomerRecord>,
    pub orders: Vec<OrderRecord>,
}

/// GET /api/admin/dashboard
///
/// Stats need `view_analytics`; the customer and order tables are included
/// only when the admin may view them.
#[instrument(skip_all, fields(admin_id = %admin.id))]
pub async fn index(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<DashboardResponse>> {
    require_permission(&admin, Permission::ViewAnalytics)?;
    let directory = state.directory();

    let customers = if admin.has_permission(Permission::ViewCustomers) {
        directory.customers().list(&CustomerFilter::default()).await
    } else {
        Vec::new()
    };
    let orders = if admin.has_permission(Permission::ViewOrders) {
        directory.orders().list(&OrderFilter::default()).await
    } else {
        Vec::new()
    };

    Ok(Json(DashboardResponse {
        stats: directory.orders().stats().await,
        customers,
        orders,
    }))
}
