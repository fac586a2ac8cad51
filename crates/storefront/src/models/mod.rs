//! Domain models for the storefront.

pub mod order;
pub mod session;
pub mod user;

pub use order::{CustomerOrder, OrderLine};
pub use session::{CurrentUser, keys as session_keys};
pub use user::StoredUser;
