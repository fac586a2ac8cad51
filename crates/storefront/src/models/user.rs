//! Registered user record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use nurvi_core::UserId;

use super::session::CurrentUser;

/// A registered storefront user as persisted in the user store.
///
/// `password_hash` is an Argon2 PHC string and never leaves the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredUser {
    pub id: UserId,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub avatar: String,
    pub created_at: DateTime<Utc>,
}

impl StoredUser {
    /// Avatar assigned at registration.
    pub const DEFAULT_AVATAR: &'static str = "/placeholder.svg?height=40&width=40";

    /// The public part cached in the session.
    #[must_use]
    pub fn to_current_user(&self) -> CurrentUser {
        CurrentUser {
            id: self.id.clone(),
            email: self.email.clone(),
            name: self.name.clone(),
            avatar: self.avatar.clone(),
        }
    }
}
