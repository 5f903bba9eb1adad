//! Object store wrapper that retries transient failures

use std::io;
use std::sync::Arc;

use crate::backoff::{ExponentialBackOff, RetryBoundedBackOff, Sleeper, retry_with_backoff};
use crate::error::is_retriable;
use crate::storage::{ObjectInfo, ObjectStore};

/// Runs every store call under a fresh copy of a bounded backoff.
pub struct RetryingStore<S> {
    inner: S,
    backoff: RetryBoundedBackOff<ExponentialBackOff>,
    sleeper: Arc<dyn Sleeper>,
}

impl<S: ObjectStore> RetryingStore<S> {
    pub fn new(
        inner: S,
        backoff: RetryBoundedBackOff<ExponentialBackOff>,
        sleeper: Arc<dyn Sleeper>,
    ) -> Self {
        Self {
            inner,
            backoff,
            sleeper,
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn set_sleeper(&mut self, sleeper: Arc<dyn Sleeper>) {
        self.sleeper = sleeper;
    }

    fn call<T, F>(&self, operation: F) -> io::Result<T>
    where
        F: FnMut() -> io::Result<T>,
    {
        let mut backoff = self.backoff.clone();
        retry_with_backoff(&mut backoff, self.sleeper.as_ref(), is_retriable, operation)
    }
}

impl<S: ObjectStore> ObjectStore for RetryingStore<S> {
    fn get(&self, key: &str) -> io::Result<Option<Vec<u8>>> {
        self.call(|| self.inner.get(key))
    }

    fn put(&self, key: &str, bytes: &[u8]) -> io::Result<()> {
        self.call(|| self.inner.put(key, bytes))
    }

    fn delete(&self, key: &str) -> io::Result<bool> {
        self.call(|| self.inner.delete(key))
    }

    fn list(&self, prefix: &str) -> io::Result<Vec<ObjectInfo>> {
        self.call(|| self.inner.list(prefix))
    }
}
