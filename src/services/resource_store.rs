//! Session-local image resources addressable by URL.
//!
//! A [`LocalHandle`] is the only way to release a resource and it cannot be
//! cloned, so each resource has exactly one owner.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

/// URL prefix under which live resources are served.
pub const LOCAL_URL_PREFIX: &str = "/local/";

/// Bytes and media type of an uploaded image.
#[derive(Debug)]
pub struct LocalImage {
    pub bytes: Arc<[u8]>,
    pub mime: String,
}

/// Exclusive ownership of one live resource.
#[derive(Debug, PartialEq, Eq)]
pub struct LocalHandle {
    id: u64,
}

impl LocalHandle {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Page-relative URL the resource is served at.
    pub fn url(&self) -> String {
        format!("{LOCAL_URL_PREFIX}{}", self.id)
    }
}

/// Counters for leak checks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreStats {
    pub created: u64,
    pub released: u64,
    pub alive: usize,
}

#[derive(Default)]
struct StoreInner {
    next_id: u64,
    live: HashMap<u64, Arc<LocalImage>>,
    created: u64,
    released: u64,
}

#[derive(Default)]
pub struct LocalResourceStore {
    inner: Mutex<StoreInner>,
}

impl LocalResourceStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, StoreInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register bytes as a live resource and hand out its owning handle.
    pub fn create(&self, bytes: Vec<u8>, mime: impl Into<String>) -> LocalHandle {
        let mut inner = self.lock();
        inner.next_id += 1;
        let id = inner.next_id;
        inner.live.insert(
            id,
            Arc::new(LocalImage {
                bytes: bytes.into(),
                mime: mime.into(),
            }),
        );
        inner.created += 1;

        tracing::debug!(id, alive = inner.live.len(), "Created local resource");
        LocalHandle { id }
    }

    /// Release a resource. Its URL stops resolving immediately; readers that
    /// already hold the bytes keep them.
    pub fn release(&self, handle: LocalHandle) {
        let mut inner = self.lock();
        if inner.live.remove(&handle.id).is_some() {
            inner.released += 1;
        }
        tracing::debug!(id = handle.id, alive = inner.live.len(), "Released local resource");
    }

    pub fn get(&self, id: u64) -> Option<Arc<LocalImage>> {
        self.lock().live.get(&id).cloned()
    }

    pub fn stats(&self) -> StoreStats {
        let inner = self.lock();
        StoreStats {
            created: inner.created,
            released: inner.released,
            alive: inner.live.len(),
        }
    }
}
