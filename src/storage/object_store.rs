//! Object store collaborator
//!
//! The narrow interface the connector needs from a flat key/value bucket,
//! and an in-memory implementation of it.

use std::collections::BTreeMap;
use std::io;
use std::sync::{Mutex, MutexGuard};

use crate::storage::results::ObjectInfo;

/// Flat object namespace. Keys are `/`-separated strings; a key ending in
/// `/` is a directory marker.
pub trait ObjectStore: Send + Sync {
    /// Contents of `key`, `None` if absent
    fn get(&self, key: &str) -> io::Result<Option<Vec<u8>>>;

    /// Create or replace `key`
    fn put(&self, key: &str, bytes: &[u8]) -> io::Result<()>;

    /// Remove `key`, returning whether it existed
    fn delete(&self, key: &str) -> io::Result<bool>;

    /// Every object whose key starts with `prefix`, sorted by key
    fn list(&self, prefix: &str) -> io::Result<Vec<ObjectInfo>>;
}

impl<S: ObjectStore + ?Sized> ObjectStore for Box<S> {
    fn get(&self, key: &str) -> io::Result<Option<Vec<u8>>> {
        (**self).get(key)
    }

    fn put(&self, key: &str, bytes: &[u8]) -> io::Result<()> {
        (**self).put(key, bytes)
    }

    fn delete(&self, key: &str) -> io::Result<bool> {
        (**self).delete(key)
    }

    fn list(&self, prefix: &str) -> io::Result<Vec<ObjectInfo>> {
        (**self).list(prefix)
    }
}

/// Process-local bucket backed by a sorted map
#[derive(Debug, Default)]
pub struct InMemoryObjectStore {
    objects: Mutex<BTreeMap<String, Vec<u8>>>,
}

impl InMemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> io::Result<usize> {
        Ok(self.lock()?.len())
    }

    pub fn is_empty(&self) -> io::Result<bool> {
        Ok(self.lock()?.is_empty())
    }

    fn lock(&self) -> io::Result<MutexGuard<'_, BTreeMap<String, Vec<u8>>>> {
        self.objects
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "object map lock poisoned"))
    }
}

impl ObjectStore for InMemoryObjectStore {
    fn get(&self, key: &str) -> io::Result<Option<Vec<u8>>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn put(&self, key: &str, bytes: &[u8]) -> io::Result<()> {
        self.lock()?.insert(key.to_string(), bytes.to_vec());
        Ok(())
    }

    fn delete(&self, key: &str) -> io::Result<bool> {
        Ok(self.lock()?.remove(key).is_some())
    }

    fn list(&self, prefix: &str) -> io::Result<Vec<ObjectInfo>> {
        let objects = self.lock()?;
        Ok(objects
            .range(prefix.to_string()..)
            .take_while(|(key, _)| key.starts_with(prefix))
            .map(|(key, bytes)| ObjectInfo {
                key: key.clone(),
                size: bytes.len() as u64,
            })
            .collect())
    }
}
