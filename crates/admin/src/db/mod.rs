//! In-memory record store for the admin dashboard.
//!
//! The dashboard works over a fixed set of mock customers and orders
//! ([`seed`]). Edits and deletions change the in-process copy only and are
//! lost on restart.
//!
//! Access goes through the per-entity repositories, mirroring how the
//! handlers think about the data:
//!
//! - [`CustomerRepository`] - list, detail, update, delete
//! - [`OrderRepository`] - list, detail, delete, dashboard stats

pub mod customers;
pub mod orders;
pub mod seed;

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::RwLock;

use nurvi_core::CustomerId;

use crate::models::{CustomerOrder, CustomerRecord, OrderRecord, SavedItem};

pub use customers::{CustomerFilter, CustomerRepository};
pub use orders::{DashboardStats, OrderFilter, OrderRepository};

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Requested entity was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Submitted data failed validation.
    #[error("invalid data: {0}")]
    Invalid(String),
}

/// Customer fields that only appear on the detail page.
#[derive(Debug, Clone, Default)]
pub(crate) struct CustomerProfile {
    pub address: String,
    pub notes: String,
    pub orders: Vec<CustomerOrder>,
    pub wishlist: Vec<SavedItem>,
}

#[derive(Debug, Default)]
pub(crate) struct Records {
    pub customers: Vec<CustomerRecord>,
    pub profiles: HashMap<CustomerId, CustomerProfile>,
    pub orders: Vec<OrderRecord>,
}

/// Shared handle to the admin records.
#[derive(Debug, Clone, Default)]
pub struct Directory {
    records: Arc<RwLock<Records>>,
}

impl Directory {
    /// A directory holding the dashboard's mock customers and orders.
    #[must_use]
    pub fn seeded() -> Self {
        Self {
            records: Arc::new(RwLock::new(seed::records())),
        }
    }

    /// A directory with no records.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn customers(&self) -> CustomerRepository<'_> {
        CustomerRepository::new(self)
    }

    #[must_use]
    pub const fn orders(&self) -> OrderRepository<'_> {
        OrderRepository::new(self)
    }

    pub(crate) const fn records(&self) -> &Arc<RwLock<Records>> {
        &self.records
    }
}

/// Case-insensitive substring match; an empty needle matches everything.
pub(crate) fn matches_search(needle: &str, haystacks: &[&str]) -> bool {
    let needle = needle.trim().to_lowercase();
    needle.is_empty()
        || haystacks
            .iter()
            .any(|h| h.to_lowercase().contains(&needle))
}
