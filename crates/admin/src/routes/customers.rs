//! Customer route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use nurvi_core::{CustomerId, CustomerStatus};

use super::parse_status;
use crate::db::CustomerFilter;
use crate::error::Result;
use crate::middleware::{RequireAdmin, require_permission};
use crate::models::{CustomerDetail, CustomerRecord, CustomerUpdate, Permission};
use crate::state::AppState;

/// List query parameters. `status=all` means no status filter.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub search: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CustomersResponse {
    pub customers: Vec<CustomerRecord>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct CustomerUpdatedResponse {
    pub success: bool,
    pub message: &'static str,
    pub customer: CustomerDetail,
}

#[derive(Debug, Serialize)]
pub struct CustomerDeletedResponse {
    pub success: bool,
    pub message: &'static str,
}

/// GET /api/admin/customers
#[instrument(skip(admin, state), fields(admin_id = %admin.id))]
pub async fn index(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<CustomersResponse>> {
    require_permission(&admin, Permission::ViewCustomers)?;

    let filter = CustomerFilter {
        search: query.search,
        status: parse_status::<CustomerStatus>(query.status.as_deref())?,
    };
    let customers = state.directory().customers().list(&filter).await;

    Ok(Json(CustomersResponse {
        total: customers.len(),
        customers,
    }))
}

/// GET /api/admin/customers/{id}
#[instrument(skip(admin, state), fields(admin_id = %admin.id))]
pub async fn show(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CustomerDetail>> {
    require_permission(&admin, Permission::ViewCustomers)?;
    let customer = state.directory().customers().get(&CustomerId::new(id)).await?;
    Ok(Json(customer))
}

/// PATCH /api/admin/customers/{id}
#[instrument(skip(admin, state, update), fields(admin_id = %admin.id))]
pub async fn update(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(update): Json<CustomerUpdate>,
) -> Result<Json<CustomerUpdatedResponse>> {
    require_permission(&admin, Permission::EditCustomers)?;
    let customer = state
        .directory()
        .customers()
        .update(&CustomerId::new(id), update)
        .await?;

    tracing::info!(customer_id = %customer.record.id, "Customer updated");
    Ok(Json(CustomerUpdatedResponse {
        success: true,
        message: "Customer information has been successfully updated.",
        customer,
    }))
}

/// DELETE /api/admin/customers/{id}
#[instrument(skip(admin, state), fields(admin_id = %admin.id))]
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CustomerDeletedResponse>> {
    require_permission(&admin, Permission::DeleteCustomers)?;
    let removed = state.directory().customers().delete(&CustomerId::new(id)).await?;

    tracing::info!(customer_id = %removed.id, "Customer deleted");
    Ok(Json(CustomerDeletedResponse {
        success: true,
        message: "Customer has been removed from the system",
    }))
}
