use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use anyhow::{Context, Result};
use tracing::info;

/// Client-side key-value storage for the session record.
pub trait SessionStore: Send + Sync {
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn get(&self, key: &str) -> Option<String>;
}

/// Session/navigation collaborator: receives the logged-in transition and
/// route change requests after a successful submission.
pub trait Navigator: Send + Sync {
    /// Idempotent logged-in transition.
    fn mark_authenticated(&self);
    fn navigate(&self, route: &str);
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    items: Mutex<HashMap<String, String>>,
}

impl SessionStore for MemoryStore {
    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());

        Ok(())
    }

    fn get(&self, key: &str) -> Option<String> {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }
}

/// Session records persisted as a JSON map on disk.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn read_items(&self) -> HashMap<String, String> {
        fs::read_to_string(&self.path)
            .ok()
            .and_then(|contents| serde_json::from_str(&contents).ok())
            .unwrap_or_default()
    }
}

impl SessionStore for FileStore {
    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut items = self.read_items();
        items.insert(key.to_string(), value.to_string());

        let contents = serde_json::to_string_pretty(&items)?;

        fs::write(&self.path, contents)
            .with_context(|| format!("Error writing session file {}", self.path.display()))?;

        Ok(())
    }

    fn get(&self, key: &str) -> Option<String> {
        self.read_items().get(key).cloned()
    }
}

/// Navigator for headless use: emits the transitions as log events.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn mark_authenticated(&self) {
        info!("user logged in");
    }

    fn navigate(&self, route: &str) {
        info!("navigate to {}", route);
    }
}
