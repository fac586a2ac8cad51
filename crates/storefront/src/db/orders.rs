//! Customer order history.
//!
//! Every account sees the same four mock orders until real order storage
//! exists.

use nurvi_core::{OrderId, OrderStatus, Price};

use crate::models::{CustomerOrder, OrderLine};

const ORDER_THUMBNAIL: &str = "/placeholder.svg?height=80&width=80";
const SHIPPING_ADDRESS: &str = "123 Jewelry Street, Mumbai, Maharashtra 400001";

/// Order history filters. Both are optional and combine with AND.
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    /// Matched against the order id and item names, ignoring case.
    pub search: Option<String>,
    pub status: Option<OrderStatus>,
}

impl OrderFilter {
    fn accepts(&self, order: &CustomerOrder) -> bool {
        let status_ok = self.status.is_none_or(|s| s == order.status);
        let search_ok = self.search.as_deref().is_none_or(|q| {
            let needle = q.trim().to_lowercase();
            needle.is_empty()
                || order.id.as_str().to_lowercase().contains(&needle)
                || order
                    .items
                    .iter()
                    .any(|line| line.name.to_lowercase().contains(&needle))
        });
        status_ok && search_ok
    }
}

/// Read-only order history.
#[derive(Debug, Clone)]
pub struct OrderHistory {
    orders: Vec<CustomerOrder>,
}

impl OrderHistory {
    /// The mock orders, newest first.
    #[must_use]
    pub fn seeded() -> Self {
        Self {
            orders: vec![
                order(
                    "ORD-001",
                    "2024-01-15",
                    OrderStatus::Delivered,
                    "Kundan Elegance Ring",
                    24_999,
                    Some("TRK123456789"),
                ),
                order(
                    "ORD-002",
                    "2024-01-10",
                    OrderStatus::Shipped,
                    "Pearl Jhumka Earrings",
                    8_999,
                    Some("TRK987654321"),
                ),
                order(
                    "ORD-003",
                    "2024-01-05",
                    OrderStatus::Processing,
                    "Temple Jewellery Necklace",
                    45_999,
                    None,
                ),
                order(
                    "ORD-004",
                    "2023-12-28",
                    OrderStatus::Delivered,
                    "Gold Plated Bracelet",
                    15_999,
                    Some("TRK456789123"),
                ),
            ],
        }
    }

    /// Orders matching the filter, in history order.
    #[must_use]
    pub fn list(&self, filter: &OrderFilter) -> Vec<CustomerOrder> {
        self.orders
            .iter()
            .filter(|o| filter.accepts(o))
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

fn order(
    id: &str,
    date: &str,
    status: OrderStatus,
    item: &str,
    price: i64,
    tracking: Option<&str>,
) -> CustomerOrder {
    let price = Price::from_rupees(price);
    CustomerOrder {
        id: OrderId::new(id),
        date: date.to_string(),
        status,
        total: price,
        items: vec![OrderLine {
            name: item.to_string(),
            price,
            quantity: 1,
            image: ORDER_THUMBNAIL.to_string(),
        }],
        shipping_address: SHIPPING_ADDRESS.to_string(),
        tracking_number: tracking.map(String::from),
    }
}
