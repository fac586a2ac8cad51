//! Session-related types.
//!
//! Everything a browser would otherwise keep in local storage lives in the
//! server-side session under one of the [`keys`].

use serde::{Deserialize, Serialize};

use nurvi_core::UserId;

/// Session-stored user identity.
///
/// The public profile of the logged-in user. No password material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: UserId,
    pub email: String,
    pub name: String,
    pub avatar: String,
}

/// Session keys.
pub mod keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "nurvi-user";

    /// Saved products.
    pub const WISHLIST: &str = "wishlist";

    /// Cart lines.
    pub const CART: &str = "cart";

    /// Checkout awaiting payment verification.
    pub const CHECKOUT: &str = "checkout";

    /// Stable id scoping wishlist notifications to one browser.
    pub const CLIENT_ID: &str = "client_id";
}
