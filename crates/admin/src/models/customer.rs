//! Customer records shown in the admin dashboard.

use serde::{Deserialize, Serialize};

use nurvi_core::{CustomerId, CustomerStatus, OrderId, OrderStatus, Price, ProductId};

/// Row in the customer list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRecord {
    pub id: CustomerId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub total_orders: u32,
    pub total_spent: Price,
    pub last_order: String,
    pub status: CustomerStatus,
    pub join_date: String,
}

/// An order as listed on a customer's page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerOrder {
    pub id: OrderId,
    pub date: String,
    pub total: Price,
    pub status: OrderStatus,
    pub items: Vec<String>,
}

/// A product on a customer's wishlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedItem {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub image: String,
}

/// Full customer page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerDetail {
    #[serde(flatten)]
    pub record: CustomerRecord,
    pub address: String,
    pub notes: String,
    pub orders: Vec<CustomerOrder>,
    pub wishlist: Vec<SavedItem>,
}

/// Editable customer fields. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CustomerUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
}
