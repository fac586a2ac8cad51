//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::AdminConfig;
use crate::db::Directory;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    directory: Directory,
}

impl AppState {
    #[must_use]
    pub fn new(config: AdminConfig, directory: Directory) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, directory }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn directory(&self) -> &Directory {
        &self.inner.directory
    }
}
