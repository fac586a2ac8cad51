//! Registered user records.
//!
//! Records live in a `Vec` behind a `tokio::sync::RwLock`. The file backend
//! rewrites the whole array on every insert through a temp file and a
//! rename, so a crash never leaves a half-written `nurvi-users.json`.

use std::path::{Path, PathBuf};

use tokio::sync::RwLock;

use nurvi_core::Email;

use super::RepositoryError;
use crate::models::user::StoredUser;

/// Where user records are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserBackend {
    /// Process memory only. Used by tests.
    Memory,
    /// JSON array at the given path.
    File(PathBuf),
}

/// Store of registered users, unique by case-insensitive email.
#[derive(Debug)]
pub struct UserStore {
    backend: UserBackend,
    users: RwLock<Vec<StoredUser>>,
}

impl UserStore {
    /// An empty store that never touches disk.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            backend: UserBackend::Memory,
            users: RwLock::new(Vec::new()),
        }
    }

    /// Open a file-backed store, loading existing records if the file exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Io` if the file exists but cannot be read, or
    /// `RepositoryError::DataCorruption` if it is not a JSON user array.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, RepositoryError> {
        let path = path.into();
        let users = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };

        tracing::info!(path = %path.display(), count = users.len(), "Loaded user store");

        Ok(Self {
            backend: UserBackend::File(path),
            users: RwLock::new(users),
        })
    }

    #[must_use]
    pub const fn backend(&self) -> &UserBackend {
        &self.backend
    }

    /// Find a user by email, ignoring case.
    pub async fn find_by_email(&self, email: &Email) -> Option<StoredUser> {
        let key = email.normalized();
        self.users
            .read()
            .await
            .iter()
            .find(|u| email_key(&u.email) == key)
            .cloned()
    }

    /// Append a user.
    ///
    /// The email check and the write happen under one lock, so two concurrent
    /// registrations for the same address cannot both succeed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email is already registered,
    /// or a storage error if the file backend cannot be written. Nothing is
    /// added when an error is returned.
    pub async fn insert(&self, user: StoredUser) -> Result<(), RepositoryError> {
        let mut users = self.users.write().await;

        let key = email_key(&user.email);
        if users.iter().any(|u| email_key(&u.email) == key) {
            return Err(RepositoryError::Conflict(format!(
                "email already registered: {}",
                user.email
            )));
        }

        if let UserBackend::File(path) = &self.backend {
            let mut next = users.clone();
            next.push(user.clone());
            write_atomic(path, &next).await?;
        }

        users.push(user);
        Ok(())
    }

    /// Number of registered users.
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }

    /// Confirm the backing file can still be read. Used by readiness checks.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error. A missing file is fine.
    pub async fn check_readable(&self) -> Result<(), RepositoryError> {
        match &self.backend {
            UserBackend::Memory => Ok(()),
            UserBackend::File(path) => match tokio::fs::metadata(path).await {
                Ok(_) => Ok(()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                Err(e) => Err(e.into()),
            },
        }
    }
}

/// Uniqueness key for a stored address; the same folding as
/// [`Email::normalized`].
fn email_key(email: &str) -> String {
    email.trim().to_lowercase()
}

async fn write_atomic(path: &Path, users: &[StoredUser]) -> Result<(), RepositoryError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }

    let json = serde_json::to_vec_pretty(users)?;
    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, json).await?;
    tokio::fs::rename(&tmp, path).await?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;
    use nurvi_core::UserId;

    use super::*;

    fn user(email: &str) -> StoredUser {
        StoredUser {
            id: UserId::new(format!("user_{email}")),
            email: email.to_string(),
            name: "Priya Sharma".to_string(),
            password_hash: "$argon2id$placeholder".to_string(),
            avatar: StoredUser::DEFAULT_AVATAR.to_string(),
            created_at: Utc::now(),
        }
    }

    fn email(raw: &str) -> Email {
        Email::parse(raw).unwrap()
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("nurvi-store-{}", uuid::Uuid::new_v4()))
            .join(name)
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected_case_insensitively() {
        let store = UserStore::in_memory();
        store.insert(user("priya@example.com")).await.unwrap();

        let result = store.insert(user("PRIYA@Example.com")).await;
        assert!(matches!(result, Err(RepositoryError::Conflict(_))));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_find_by_email_ignores_case() {
        let store = UserStore::in_memory();
        store.insert(user("priya@example.com")).await.unwrap();

        assert!(store.find_by_email(&email("Priya@Example.COM")).await.is_some());
        assert!(store.find_by_email(&email("other@example.com")).await.is_none());
    }

    #[tokio::test]
    async fn test_non_ascii_case_folds_like_email_key() {
        let store = UserStore::in_memory();
        store.insert(user("élodie@example.com")).await.unwrap();

        assert!(store.find_by_email(&email("ÉLODIE@example.com")).await.is_some());
        let result = store.insert(user("Élodie@Example.com")).await;
        assert!(matches!(result, Err(RepositoryError::Conflict(_))));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_file_backend_persists_across_reopen() {
        let path = temp_path("nurvi-users.json");

        let store = UserStore::open(&path).await.unwrap();
        assert!(store.is_empty().await);
        store.insert(user("priya@example.com")).await.unwrap();
        store.insert(user("arjun@example.com")).await.unwrap();

        let reopened = UserStore::open(&path).await.unwrap();
        assert_eq!(reopened.len().await, 2);
        assert!(reopened.find_by_email(&email("arjun@example.com")).await.is_some());
        assert!(reopened.check_readable().await.is_ok());

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_reported() {
        let path = temp_path("nurvi-users.json");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, b"not json").unwrap();

        let result = UserStore::open(&path).await;
        assert!(matches!(result, Err(RepositoryError::DataCorruption(_))));

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }
}
