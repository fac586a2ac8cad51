//! Admin credential commands.
//!
//! # Usage
//!
//! ```bash
//! nurvi-cli admin hash-password -p 'correct horse battery'
//! ```
//!
//! Put the printed PHC string in `ADMIN_PASSWORD_HASH` for the admin service.

use thiserror::Error;

use nurvi_admin::services::auth::{AdminAuthError, hash_password as argon2_hash};

/// Shortest password accepted for the admin account.
pub const MIN_ADMIN_PASSWORD_LENGTH: usize = 8;

/// Errors that can occur during admin operations.
#[derive(Debug, Error)]
pub enum AdminError {
    /// Password below the minimum length.
    #[error("Password must be at least {MIN_ADMIN_PASSWORD_LENGTH} characters")]
    PasswordTooShort,

    /// Hashing failed.
    #[error("Failed to hash password: {0}")]
    Hash(#[from] AdminAuthError),
}

/// Hash a password and print the PHC string.
///
/// # Errors
///
/// Returns `AdminError::PasswordTooShort` or `AdminError::Hash`.
pub fn hash_password(password: &str) -> Result<(), AdminError> {
    let hash = phc_hash(password)?;

    #[allow(clippy::print_stdout)]
    {
        println!("{hash}");
    }
    tracing::info!("Set ADMIN_PASSWORD_HASH to the value above");
    Ok(())
}

fn phc_hash(password: &str) -> Result<String, AdminError> {
    if password.chars().count() < MIN_ADMIN_PASSWORD_LENGTH {
        return Err(AdminError::PasswordTooShort);
    }
    Ok(argon2_hash(password)?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_phc_hash_is_argon2() {
        let hash = phc_hash("correct horse battery").unwrap();
        assert!(hash.starts_with("$argon2id$"));
    }

    #[test]
    fn test_short_password_rejected() {
        assert!(matches!(phc_hash("admin12"), Err(AdminError::PasswordTooShort)));
    }
}
