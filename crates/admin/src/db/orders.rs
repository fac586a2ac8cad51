//! Order repository and dashboard statistics.

use serde::Serialize;

use nurvi_core::{CustomerStatus, OrderId, OrderStatus, Price};

use super::{Directory, RepositoryError, matches_search};
use crate::models::OrderRecord;

/// Order list filters. Both are optional and combine with AND.
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    /// Matched against order id, customer name and email.
    pub search: Option<String>,
    pub status: Option<OrderStatus>,
}

impl OrderFilter {
    fn accepts(&self, order: &OrderRecord) -> bool {
        let status_ok = self.status.is_none_or(|s| s == order.status);
        let search_ok = self.search.as_deref().is_none_or(|q| {
            matches_search(q, &[order.id.as_str(), &order.customer, &order.email])
        });
        status_ok && search_ok
    }
}

/// Headline numbers for the dashboard, computed from the current records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_customers: usize,
    pub total_orders: usize,
    /// Sum over orders that are not cancelled.
    pub revenue: Price,
    pub revenue_display: String,
    pub vip_customers: usize,
    pub processing_orders: usize,
}

/// Repository for order records.
pub struct OrderRepository<'a> {
    directory: &'a Directory,
}

impl<'a> OrderRepository<'a> {
    #[must_use]
    pub const fn new(directory: &'a Directory) -> Self {
        Self { directory }
    }

    /// Orders matching the filter, newest first as seeded.
    pub async fn list(&self, filter: &OrderFilter) -> Vec<OrderRecord> {
        let records = self.directory.records().read().await;
        records
            .orders
            .iter()
            .filter(|o| filter.accepts(o))
            .cloned()
            .collect()
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` for an unknown id.
    pub async fn get(&self, id: &OrderId) -> Result<OrderRecord, RepositoryError> {
        let records = self.directory.records().read().await;
        records
            .orders
            .iter()
            .find(|o| &o.id == id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(format!("order {id}")))
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` for an unknown id.
    pub async fn delete(&self, id: &OrderId) -> Result<OrderRecord, RepositoryError> {
        let mut records = self.directory.records().write().await;
        let index = records
            .orders
            .iter()
            .position(|o| &o.id == id)
            .ok_or_else(|| RepositoryError::NotFound(format!("order {id}")))?;
        Ok(records.orders.remove(index))
    }

    /// Dashboard figures over customers and orders.
    pub async fn stats(&self) -> DashboardStats {
        let records = self.directory.records().read().await;
        let revenue = records
            .orders
            .iter()
            .filter(|o| o.status.is_billable())
            .fold(Price::ZERO, |acc, o| acc.saturating_add(o.total));

        DashboardStats {
            total_customers: records.customers.len(),
            total_orders: records.orders.len(),
            revenue,
            revenue_display: revenue.to_string(),
            vip_customers: records
                .customers
                .iter()
                .filter(|c| c.status == CustomerStatus::Vip)
                .count(),
            processing_orders: records
                .orders
                .iter()
                .filter(|o| o.status == OrderStatus::Processing)
                .count(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_search_matches_id_and_customer() {
        let directory = Directory::seeded();
        let orders = directory.orders();

        let by_id = orders
            .list(&OrderFilter {
                search: Some("ord-003".to_string()),
                status: None,
            })
            .await;
        assert_eq!(by_id.len(), 1);
        assert_eq!(by_id[0].customer, "Michael Brown");

        let by_email = orders
            .list(&OrderFilter {
                search: Some("sarah@".to_string()),
                status: None,
            })
            .await;
        assert_eq!(by_email.len(), 1);
    }

    #[tokio::test]
    async fn test_status_filter() {
        let directory = Directory::seeded();
        let shipped = directory
            .orders()
            .list(&OrderFilter {
                search: None,
                status: Some(OrderStatus::Shipped),
            })
            .await;
        assert_eq!(shipped.len(), 1);
        assert_eq!(shipped[0].id.as_str(), "ORD-003");
    }

    #[tokio::test]
    async fn test_stats_from_seed() {
        let directory = Directory::seeded();
        let stats = directory.orders().stats().await;

        assert_eq!(stats.total_customers, 3);
        assert_eq!(stats.total_orders, 3);
        assert_eq!(stats.revenue, Price::from_rupees(1660));
        assert_eq!(stats.revenue_display, "₹1,660");
        assert_eq!(stats.vip_customers, 1);
        assert_eq!(stats.processing_orders, 1);
    }

    #[tokio::test]
    async fn test_cancelled_orders_excluded_from_revenue() {
        let directory = Directory::seeded();
        {
            let mut records = directory.records().write().await;
            records.orders[0].status = OrderStatus::Cancelled;
        }

        let stats = directory.orders().stats().await;
        assert_eq!(stats.revenue, Price::from_rupees(1210));
        assert_eq!(stats.total_orders, 3);
    }

    #[tokio::test]
    async fn test_delete_order() {
        let directory = Directory::seeded();
        let id = OrderId::new("ORD-002");

        directory.orders().delete(&id).await.unwrap();
        assert!(matches!(
            directory.orders().get(&id).await,
            Err(RepositoryError::NotFound(_))
        ));
        assert_eq!(directory.orders().stats().await.total_orders, 2);
    }
}
