//! Admin authentication service.
//!
//! The store has one admin account, configured by `ADMIN_EMAIL` and
//! `ADMIN_PASSWORD_HASH`. Email comparison is exact (case-sensitive).

mod error;

pub use error::AdminAuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use secrecy::ExposeSecret;

use crate::config::AdminConfig;
use crate::models::AdminUser;

/// Admin authentication service over the configured account.
pub struct AdminAuthService<'a> {
    config: &'a AdminConfig,
}

impl<'a> AdminAuthService<'a> {
    #[must_use]
    pub const fn new(config: &'a AdminConfig) -> Self {
        Self { config }
    }

    /// Check credentials against the admin account.
    ///
    /// The password is verified even when the email is wrong, so both
    /// failures take the same time.
    ///
    /// # Errors
    ///
    /// Returns `AdminAuthError::InvalidCredentials` on any mismatch.
    pub fn login(&self, email: &str, password: &str) -> Result<AdminUser, AdminAuthError> {
        let password_ok = verify_password(password, self.config.admin_password_hash.expose_secret())?;
        let email_ok = email == self.config.admin_email;

        if !(email_ok && password_ok) {
            tracing::warn!("Admin login rejected");
            return Err(AdminAuthError::InvalidCredentials);
        }

        let admin = AdminUser::primary(email);
        tracing::info!(admin_id = %admin.id, "Admin logged in");
        Ok(admin)
    }
}

/// Hash a password using Argon2id.
///
/// # Errors
///
/// Returns `AdminAuthError::PasswordHash` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AdminAuthError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AdminAuthError::PasswordHash)
}

fn verify_password(password: &str, hash: &str) -> Result<bool, AdminAuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AdminAuthError::PasswordHash)?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
