//! Customer repository over the in-memory directory.

use nurvi_core::{CustomerId, CustomerStatus, Email};

use super::{CustomerProfile, Directory, Records, RepositoryError, matches_search};
use crate::models::{CustomerDetail, CustomerOrder, CustomerRecord, CustomerUpdate};

/// Customer list filters. Both are optional and combine with AND.
#[derive(Debug, Clone, Default)]
pub struct CustomerFilter {
    /// Matched against name and email, case-insensitively.
    pub search: Option<String>,
    pub status: Option<CustomerStatus>,
}

impl CustomerFilter {
    fn accepts(&self, customer: &CustomerRecord) -> bool {
        let status_ok = self.status.is_none_or(|s| s == customer.status);
        let search_ok = self
            .search
            .as_deref()
            .is_none_or(|q| matches_search(q, &[&customer.name, &customer.email]));
        status_ok && search_ok
    }
}

/// Repository for customer records.
pub struct CustomerRepository<'a> {
    directory: &'a Directory,
}

impl<'a> CustomerRepository<'a> {
    #[must_use]
    pub const fn new(directory: &'a Directory) -> Self {
        Self { directory }
    }

    /// Customers matching the filter, in dashboard order.
    pub async fn list(&self, filter: &CustomerFilter) -> Vec<CustomerRecord> {
        let records = self.directory.records().read().await;
        records
            .customers
            .iter()
            .filter(|c| filter.accepts(c))
            .cloned()
            .collect()
    }

    /// Number of customers.
    pub async fn count(&self) -> usize {
        self.directory.records().read().await.customers.len()
    }

    /// Full customer page.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` for an unknown id.
    pub async fn get(&self, id: &CustomerId) -> Result<CustomerDetail, RepositoryError> {
        let records = self.directory.records().read().await;
        detail(&records, id)
    }

    /// Apply an edit and return the updated page.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Invalid` for an empty name or malformed
    /// email (nothing is changed), or `NotFound` for an unknown id.
    pub async fn update(
        &self,
        id: &CustomerId,
        update: CustomerUpdate,
    ) -> Result<CustomerDetail, RepositoryError> {
        let name = update
            .name
            .map(|name| {
                let name = name.trim().to_string();
                if name.is_empty() {
                    Err(RepositoryError::Invalid("name cannot be empty".to_string()))
                } else {
                    Ok(name)
                }
            })
            .transpose()?;
        let email = update
            .email
            .map(|email| {
                Email::parse(&email)
                    .map(Email::into_inner)
                    .map_err(|e| RepositoryError::Invalid(e.to_string()))
            })
            .transpose()?;

        let mut records = self.directory.records().write().await;
        let customer = records
            .customers
            .iter_mut()
            .find(|c| &c.id == id)
            .ok_or_else(|| RepositoryError::NotFound(format!("customer {id}")))?;

        if let Some(name) = name {
            customer.name = name;
        }
        if let Some(email) = email {
            customer.email = email;
        }
        if let Some(phone) = update.phone {
            customer.phone = phone.trim().to_string();
        }

        if update.address.is_some() || update.notes.is_some() {
            let profile = records.profiles.entry(id.clone()).or_default();
            if let Some(address) = update.address {
                profile.address = address;
            }
            if let Some(notes) = update.notes {
                profile.notes = notes;
            }
        }

        detail(&records, id)
    }

    /// Remove a customer and their profile. Their orders stay listed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` for an unknown id.
    pub async fn delete(&self, id: &CustomerId) -> Result<CustomerRecord, RepositoryError> {
        let mut records = self.directory.records().write().await;
        let index = records
            .customers
            .iter()
            .position(|c| &c.id == id)
            .ok_or_else(|| RepositoryError::NotFound(format!("customer {id}")))?;

        records.profiles.remove(id);
        Ok(records.customers.remove(index))
    }
}

fn detail(records: &Records, id: &CustomerId) -> Result<CustomerDetail, RepositoryError> {
    let record = records
        .customers
        .iter()
        .find(|c| &c.id == id)
        .cloned()
        .ok_or_else(|| RepositoryError::NotFound(format!("customer {id}")))?;

    let CustomerProfile {
        address,
        notes,
        orders,
        wishlist,
    } = records.profiles.get(id).cloned().unwrap_or_default();

    // Customers without a recorded history get their orders from the order list
    let orders = if orders.is_empty() {
        records
            .orders
            .iter()
            .filter(|o| o.email.eq_ignore_ascii_case(&record.email))
            .map(|o| CustomerOrder {
                id: o.id.clone(),
                date: o.date.clone(),
                total: o.total,
                status: o.status,
                items: Vec::new(),
            })
            .collect()
    } else {
        orders
    };

    Ok(CustomerDetail {
        record,
        address,
        notes,
        orders,
        wishlist,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn id(s: &str) -> CustomerId {
        CustomerId::new(s)
    }

    #[tokio::test]
    async fn test_list_filters_by_search_and_status() {
        let directory = Directory::seeded();
        let customers = directory.customers();

        assert_eq!(customers.list(&CustomerFilter::default()).await.len(), 3);

        let by_name = customers
            .list(&CustomerFilter {
                search: Some("EMILY".to_string()),
                status: None,
            })
            .await;
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].name, "Emily Davis");

        let vip = customers
            .list(&CustomerFilter {
                search: None,
                status: Some(CustomerStatus::Vip),
            })
            .await;
        assert_eq!(vip.len(), 1);
        assert_eq!(vip[0].name, "Michael Brown");
    }

    #[tokio::test]
    async fn test_detail_for_first_customer() {
        let directory = Directory::seeded();
        let detail = directory.customers().get(&id("1")).await.unwrap();

        assert_eq!(detail.record.name, "Sarah Johnson");
        assert_eq!(detail.notes, "VIP customer, prefers gold jewelry");
        assert_eq!(detail.orders.len(), 2);
        assert_eq!(detail.orders[0].items.len(), 2);
        assert_eq!(detail.wishlist.len(), 2);
    }

    #[tokio::test]
    async fn test_detail_without_profile_uses_order_list() {
        let directory = Directory::seeded();
        let detail = directory.customers().get(&id("3")).await.unwrap();

        assert!(detail.address.is_empty());
        assert_eq!(detail.orders.len(), 1);
        assert_eq!(detail.orders[0].id.as_str(), "ORD-003");
    }

    #[tokio::test]
    async fn test_update_applies_fields() {
        let directory = Directory::seeded();
        let updated = directory
            .customers()
            .update(
                &id("2"),
                CustomerUpdate {
                    name: Some("  Emily Clarke ".to_string()),
                    address: Some("7 Park Lane, Mumbai".to_string()),
                    ..CustomerUpdate::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.record.name, "Emily Clarke");
        assert_eq!(updated.record.email, "emily@example.com");
        assert_eq!(updated.address, "7 Park Lane, Mumbai");
    }

    #[tokio::test]
    async fn test_invalid_update_changes_nothing() {
        let directory = Directory::seeded();
        let before = directory.customers().get(&id("1")).await.unwrap();

        let result = directory
            .customers()
            .update(
                &id("1"),
                CustomerUpdate {
                    name: Some("Sarah J".to_string()),
                    email: Some("not-an-email".to_string()),
                    ..CustomerUpdate::default()
                },
            )
            .await;

        assert!(matches!(result, Err(RepositoryError::Invalid(_))));
        assert_eq!(directory.customers().get(&id("1")).await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_delete_removes_customer() {
        let directory = Directory::seeded();
        let removed = directory.customers().delete(&id("2")).await.unwrap();
        assert_eq!(removed.name, "Emily Davis");
        assert_eq!(directory.customers().count().await, 2);

        let again = directory.customers().delete(&id("2")).await;
        assert!(matches!(again, Err(RepositoryError::NotFound(_))));
    }
}
