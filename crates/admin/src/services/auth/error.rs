//! Admin authentication error types.

use thiserror::Error;

/// Errors that can occur during admin authentication.
#[derive(Debug, Error)]
pub enum AdminAuthError {
    /// Email does not match the admin account or the password is wrong.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Hashing failed or the configured hash is unreadable.
    #[error("password hash error")]
    PasswordHash,
}
