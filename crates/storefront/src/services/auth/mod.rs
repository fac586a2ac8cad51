//! Authentication service.
//!
//! Email and password accounts. Input is validated before any store access,
//! so rejected attempts never touch the user store or the session.

mod error;

pub use error::AuthError;

use std::sync::OnceLock;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::Utc;
use uuid::Uuid;

use nurvi_core::{Email, UserId};

use crate::db::{RepositoryError, UserStore};
use crate::models::{CurrentUser, StoredUser};

/// Minimum password length.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Minimum trimmed name length.
pub const MIN_NAME_LENGTH: usize = 2;

/// Authentication service over the shared user store.
pub struct AuthService<'a> {
    users: &'a UserStore,
}

impl<'a> AuthService<'a> {
    #[must_use]
    pub const fn new(users: &'a UserStore) -> Self {
        Self { users }
    }

    /// Login with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` or `AuthError::WeakPassword` for
    /// malformed input, and `AuthError::InvalidCredentials` when the email is
    /// unknown or the password does not match.
    pub async fn login(&self, email: &str, password: &str) -> Result<CurrentUser, AuthError> {
        let email = Email::parse(email)?;
        validate_password(password)?;

        let Some(user) = self.users.find_by_email(&email).await else {
            // Same Argon2 cost as a real account, so timing does not reveal
            // which emails are registered
            let _ = verify_password(password, dummy_hash()?);
            return Err(AuthError::InvalidCredentials);
        };

        verify_password(password, &user.password_hash)?;

        tracing::info!(user_id = %user.id, "User logged in");
        Ok(user.to_current_user())
    }

    /// Register a new account.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidName`, `AuthError::InvalidEmail` or
    /// `AuthError::WeakPassword` for malformed input, and
    /// `AuthError::UserAlreadyExists` if the email is taken in any letter case.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<CurrentUser, AuthError> {
        let name = name.trim();
        if name.chars().count() < MIN_NAME_LENGTH {
            return Err(AuthError::InvalidName);
        }
        let email = Email::parse(email)?;
        validate_password(password)?;

        if self.users.find_by_email(&email).await.is_some() {
            return Err(AuthError::UserAlreadyExists);
        }

        let user = StoredUser {
            id: UserId::new(format!("user_{}", Uuid::new_v4().simple())),
            email: email.into_inner(),
            name: name.to_string(),
            password_hash: hash_password(password)?,
            avatar: StoredUser::DEFAULT_AVATAR.to_string(),
            created_at: Utc::now(),
        };

        self.users.insert(user.clone()).await.map_err(|e| match e {
            RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
            other => AuthError::Repository(other),
        })?;

        tracing::info!(user_id = %user.id, "User registered");
        Ok(user.to_current_user())
    }
}

/// Validate password requirements.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters."
        )));
    }
    Ok(())
}

/// Hash a password using Argon2id.
///
/// # Errors
///
/// Returns `AuthError::PasswordHash` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Hash checked against when a login names an unknown email.
fn dummy_hash() -> Result<&'static str, AuthError> {
    static DUMMY: OnceLock<String> = OnceLock::new();
    if let Some(hash) = DUMMY.get() {
        return Ok(hash.as_str());
    }
    let hash = hash_password("nurvi-unknown-account")?;
    Ok(DUMMY.get_or_init(|| hash).as_str())
}

/// Verify a password against a stored hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::PasswordHash)?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}
