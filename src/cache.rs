//! Query cache with request deduplication.
//!
//! `fetch(key, loader)` answers from a fresh entry when one exists, joins an
//! identical request that is already in flight, and otherwise runs `loader`.
//! Entries become stale after the configured window and are swept out on the
//! next `fetch`, whatever its key. Failures are never stored, so the next
//! identical request goes to the network again.
//!
//! The mutex is never held across an `.await`.

use futures::future::{BoxFuture, FutureExt, Shared};
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::time::Instant;

use crate::error::FetchResult;
use crate::types::Cursor;

/// Request descriptor; two requests with the same key are the same request
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum QueryKey {
    /// One browse page of the project listings
    ProjectItems { page: Cursor },
    /// Single-item lookup for a search term
    ProjectItemSearch { term: String },
}

struct Entry<V> {
    value: V,
    fetched_at: Instant,
}

type InFlight<V> = Shared<BoxFuture<'static, FetchResult<V>>>;

struct Inner<V> {
    entries: HashMap<QueryKey, Arc<Entry<V>>>,
    in_flight: HashMap<QueryKey, InFlight<V>>,
}

pub struct QueryCache<V> {
    stale_time: Duration,
    inner: Mutex<Inner<V>>,
}

impl<V> QueryCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    pub fn new(stale_time: Duration) -> Self {
        Self {
            stale_time,
            inner: Mutex::new(Inner {
                entries: HashMap::new(),
                in_flight: HashMap::new(),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner<V>> {
        // A panic while holding the lock cannot leave the maps half-updated.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Cached-or-fresh result for `key`
    pub async fn fetch<F, Fut>(&self, key: QueryKey, loader: F) -> FetchResult<V>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = FetchResult<V>> + Send + 'static,
    {
        let pending = {
            let mut inner = self.lock();
            let stale_time = self.stale_time;
            inner.entries.retain(|_, e| e.fetched_at.elapsed() < stale_time);
            if let Some(entry) = inner.entries.get(&key) {
                if entry.fetched_at.elapsed() < self.stale_time {
                    log::debug!("[cache] hit {key:?}");
                    return Ok(entry.value.clone());
                }
            }
            match inner.in_flight.get(&key) {
                Some(pending) => {
                    log::debug!("[cache] joining in-flight {key:?}");
                    pending.clone()
                }
                None => {
                    log::debug!("[cache] miss {key:?}");
                    let pending = loader().boxed().shared();
                    inner.in_flight.insert(key.clone(), pending.clone());
                    pending
                }
            }
        };

        let result = pending.clone().await;

        let mut inner = self.lock();
        let owner = inner
            .in_flight
            .get(&key)
            .is_some_and(|current| Shared::ptr_eq(current, &pending));
        if owner {
            inner.in_flight.remove(&key);
            if let Ok(value) = &result {
                inner.entries.insert(
                    key,
                    Arc::new(Entry {
                        value: value.clone(),
                        fetched_at: Instant::now(),
                    }),
                );
            }
        }
        result
    }

    /// Fresh cached value, if any
    pub fn get(&self, key: &QueryKey) -> Option<V> {
        let inner = self.lock();
        inner
            .entries
            .get(key)
            .filter(|e| e.fetched_at.elapsed() < self.stale_time)
            .map(|e| e.value.clone())
    }

    pub fn is_in_flight(&self, key: &QueryKey) -> bool {
        self.lock().in_flight.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every entry; in-flight loads still resolve for their waiters
    pub fn clear(&self) {
        let mut inner = self.lock();
        inner.entries.clear();
        inner.in_flight.clear();
    }
}
