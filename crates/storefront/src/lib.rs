//! Nurvi Jewel storefront library.
//!
//! Catalog, cart, wishlist, accounts and checkout as a JSON API. The binary
//! in `main.rs` only wires configuration, telemetry and the listener.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

pub use config::StorefrontConfig;
pub use routes::app;
pub use state::AppState;
