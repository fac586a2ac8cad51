//! Business logic services for storefront.
//!
//! # Services
//!
//! - `auth` - Email and password accounts
//! - `checkout` - Payment checkout state machine
//! - `razorpay` - Payment gateway client and signature checks
//! - `twilio` - SMS client and customer message templates
//! - `wishlist` - Wishlist change notifications

pub mod auth;
pub mod checkout;
pub mod razorpay;
pub mod twilio;
pub mod wishlist;

pub use auth::{AuthError, AuthService};
pub use checkout::{CheckoutError, CheckoutService};
pub use razorpay::{RazorpayClient, RazorpayError};
pub use twilio::{TwilioClient, TwilioError};
pub use wishlist::{WishlistBus, WishlistEvent};
