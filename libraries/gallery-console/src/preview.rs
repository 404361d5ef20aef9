//! Local preview handles for images that are selected but not yet uploaded.
//!
//! A handle stays live until it is dropped, so removing a file from the
//! pending queue (or dropping the form) releases its preview.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

#[derive(Debug, Default)]
struct Registry {
    next_id: u64,
    live: HashSet<u64>,
}

/// Tracks which previews are currently live.
#[derive(Debug, Clone, Default)]
pub struct PreviewRegistry {
    inner: Arc<Mutex<Registry>>,
}

impl PreviewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a preview for a selected file
    pub fn create(&self, file_name: &str) -> PreviewHandle {
        let mut registry = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        registry.next_id += 1;
        let id = registry.next_id;
        registry.live.insert(id);

        PreviewHandle {
            id,
            file_name: file_name.to_string(),
            registry: Arc::clone(&self.inner),
        }
    }

    /// Number of previews not yet released
    pub fn live_count(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .live
            .len()
    }
}

/// A live preview; released on drop.
#[derive(Debug)]
pub struct PreviewHandle {
    id: u64,
    file_name: String,
    registry: Arc<Mutex<Registry>>,
}

impl PreviewHandle {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }
}

impl Drop for PreviewHandle {
    fn drop(&mut self) {
        self.registry
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .live
            .remove(&self.id);
    }
}
