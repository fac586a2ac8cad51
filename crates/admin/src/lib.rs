//! Nurvi Jewel admin library.
//!
//! JSON API behind the store's admin dashboard: a single configured admin
//! account with role permissions, and customer/order management over the
//! in-memory [`db::Directory`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

pub use config::AdminConfig;
pub use routes::app;
pub use state::AppState;
