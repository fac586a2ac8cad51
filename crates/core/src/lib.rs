//! Nurvi Jewel Core - Shared domain library.
//!
//! This crate provides the domain model used by every Nurvi Jewel component:
//! - `storefront` - Public-facing jewelry store (catalog, cart, checkout)
//! - `admin` - Internal dashboard for customers and orders
//! - `cli` - Command-line helpers
//!
//! # Architecture
//!
//! The core crate contains only types and pure state transitions - no I/O,
//! no HTTP clients, no storage. Services own the state and persist it; this
//! crate decides what a valid mutation looks like.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, prices, emails, and statuses
//! - [`cart`] - Shopping cart lines and order totals
//! - [`wishlist`] - Saved product stubs
//! - [`catalog`] - Seeded product catalog with filtering and sorting

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod types;
pub mod wishlist;

pub use cart::{Cart, CartError, CartItem, MAX_LINE_QUANTITY, OrderSummary, PromoCode};
pub use catalog::{Catalog, Category, Listing, Product, ProductPage, ProductQuery, SortOrder};
pub use types::*;
pub use wishlist::{Wishlist, WishlistItem};
