//! Application state shared across handlers.

use std::sync::Arc;

use nurvi_core::Catalog;

use crate::config::StorefrontConfig;
use crate::db::{OrderHistory, UserStore};
use crate::services::{RazorpayClient, RazorpayError, TwilioClient, TwilioError, WishlistBus};

/// Error creating application state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("payment client: {0}")]
    Razorpay(#[from] RazorpayError),
    #[error("sms client: {0}")]
    Twilio(#[from] TwilioError),
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// the user store, the catalog, and the provider clients.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    users: UserStore,
    catalog: Catalog,
    orders: OrderHistory,
    razorpay: RazorpayClient,
    twilio: TwilioClient,
    wishlist_bus: WishlistBus,
}

impl AppState {
    /// Create a new application state.
    ///
    /// The catalog is generated from `config.catalog_seed`.
    ///
    /// # Errors
    ///
    /// Returns an error if a provider HTTP client cannot be built.
    pub fn new(config: StorefrontConfig, users: UserStore) -> Result<Self, StateError> {
        let razorpay = RazorpayClient::new(&config.razorpay)?;
        let twilio = TwilioClient::new(&config.twilio)?;
        let catalog = Catalog::generate(config.catalog_seed);

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                users,
                catalog,
                orders: OrderHistory::seeded(),
                razorpay,
                twilio,
                wishlist_bus: WishlistBus::new(),
            }),
        })
    }

    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn users(&self) -> &UserStore {
        &self.inner.users
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    #[must_use]
    pub fn orders(&self) -> &OrderHistory {
        &self.inner.orders
    }

    #[must_use]
    pub fn razorpay(&self) -> &RazorpayClient {
        &self.inner.razorpay
    }

    #[must_use]
    pub fn twilio(&self) -> &TwilioClient {
        &self.inner.twilio
    }

    #[must_use]
    pub fn wishlist_bus(&self) -> &WishlistBus {
        &self.inner.wishlist_bus
    }
}
