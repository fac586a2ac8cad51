//! Past orders shown on the account's order history page.

use serde::{Deserialize, Serialize};

use nurvi_core::{OrderId, OrderStatus, Price};

/// One product line of a past order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub name: String,
    pub price: Price,
    pub quantity: u32,
    pub image: String,
}

/// A placed order as the customer sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerOrder {
    pub id: OrderId,
    pub date: String,
    pub status: OrderStatus,
    pub total: Price,
    pub items: Vec<OrderLine>,
    pub shipping_address: String,
    /// Set once the parcel has left the warehouse.
    pub tracking_number: Option<String>,
}
