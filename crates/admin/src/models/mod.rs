//! Domain models for admin.

pub mod admin_user;
pub mod customer;
pub mod order;
pub mod session;

pub use admin_user::{AdminRole, AdminUser, Permission};
pub use customer::{CustomerDetail, CustomerOrder, CustomerRecord, CustomerUpdate, SavedItem};
pub use order::OrderRecord;
pub use session::keys as session_keys;
