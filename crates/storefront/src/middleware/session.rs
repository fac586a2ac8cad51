//! Session middleware configuration.
//!
//! Sets up in-memory sessions using tower-sessions, plus small helpers for
//! the per-browser values kept in the session.

use serde::de::DeserializeOwned;
use tower_sessions::{Expiry, MemoryStore, Session, SessionManagerLayer};
use uuid::Uuid;

use crate::config::StorefrontConfig;
use crate::models::session_keys;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "nurvi_session";

/// Session expiry time in seconds (7 days).
const SESSION_EXPIRY_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Create the session layer backed by process memory.
#[must_use]
pub fn create_session_layer(config: &StorefrontConfig) -> SessionManagerLayer<MemoryStore> {
    SessionManagerLayer::new(MemoryStore::default())
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.secure_cookies())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}

/// Read a value, treating a missing key as the default.
///
/// # Errors
///
/// Returns an error if the session store fails or the stored value does not
/// decode as `T`.
pub async fn load_or_default<T>(
    session: &Session,
    key: &str,
) -> Result<T, tower_sessions::session::Error>
where
    T: DeserializeOwned + Default,
{
    Ok(session.get::<T>(key).await?.unwrap_or_default())
}

/// The id that scopes wishlist events to this browser, created on first use.
///
/// # Errors
///
/// Returns an error if the session cannot be read or written.
pub async fn wishlist_client_id(session: &Session) -> Result<Uuid, tower_sessions::session::Error> {
    if let Some(id) = session.get::<Uuid>(session_keys::CLIENT_ID).await? {
        return Ok(id);
    }
    let id = Uuid::new_v4();
    session.insert(session_keys::CLIENT_ID, id).await?;
    Ok(id)
}
