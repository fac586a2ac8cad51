//! Session keys for admin authentication data.

pub mod keys {
    /// Key for the logged-in [`AdminUser`](crate::models::AdminUser).
    pub const CURRENT_ADMIN: &str = "nurvi-admin";
}
