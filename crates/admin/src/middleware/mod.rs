//! HTTP middleware for admin.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. Security headers (`nosniff`, `DENY` framing)
//! 4. Session layer (in-memory store, `SameSite=Strict`)
//! 5. Auth extractors per handler ([`RequireAdmin`])

pub mod auth;
pub mod session;

pub use auth::{RequireAdmin, clear_current_admin, require_permission, set_current_admin};
pub use session::create_session_layer;
