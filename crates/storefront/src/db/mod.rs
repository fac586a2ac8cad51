//! Persistence for storefront data.
//!
//! The storefront keeps no product tables. The only shared state that
//! outlives a session is the list of registered users, held by
//! [`users::UserStore`] in memory or in a JSON file under the data
//! directory. Order history is a fixed set of mock records
//! ([`orders::OrderHistory`]).

pub mod orders;
pub mod users;

pub use orders::{OrderFilter, OrderHistory};
pub use users::{UserBackend, UserStore};

use thiserror::Error;

/// Errors from the user store.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Reading or writing the backing file failed.
    #[error("storage error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored data could not be decoded or encoded.
    #[error("data corruption: {0}")]
    DataCorruption(#[from] serde_json::Error),

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}
