//! Order records shown in the admin dashboard.

use serde::{Deserialize, Serialize};

use nurvi_core::{OrderId, OrderStatus, Price};

/// Row in the order list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecord {
    pub id: OrderId,
    pub customer: String,
    pub email: String,
    pub total: Price,
    pub status: OrderStatus,
    pub date: String,
    pub items: u32,
    pub payment_method: String,
}
