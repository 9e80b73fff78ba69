//! Time-bounded memoization of catalog responses
//!
//! Each key owns a slot guarded by an async mutex. A caller that finds the
//! slot empty or expired runs the fetch while holding the slot, so concurrent
//! callers for the same key wait for that one fetch and then read its result.
//! Slots for different keys are independent.

use std::fmt;
use std::future::Future;
use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::debug;

/// Source of the current time for expiry checks
pub trait Clock: Send + Sync + fmt::Debug {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that only moves when told to
#[derive(Debug)]
pub struct ManualClock {
    now: StdMutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: StdMutex::new(start),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now += chrono::Duration::from_std(by).unwrap_or(chrono::Duration::zero());
    }

    pub fn set(&self, to: DateTime<Utc>) {
        *self.now.lock().unwrap_or_else(|e| e.into_inner()) = to;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(Utc::now())
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Catalog call a cached value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallKind {
    Search,
    Discography,
    TopTracks,
}

impl CallKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::Discography => "discography",
            Self::TopTracks => "top_tracks",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    kind: CallKind,
    param: String,
}

impl CacheKey {
    pub fn new(kind: CallKind, param: &str) -> Self {
        Self {
            kind,
            param: param.trim().to_string(),
        }
    }

    pub fn search(name: &str) -> Self {
        Self::new(CallKind::Search, name)
    }

    pub fn discography(artist_id: &str) -> Self {
        Self::new(CallKind::Discography, artist_id)
    }

    pub fn top_tracks(name: &str) -> Self {
        Self::new(CallKind::TopTracks, name)
    }

    pub fn kind(&self) -> CallKind {
        self.kind
    }

    pub fn param(&self) -> &str {
        &self.param
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind.as_str(), self.param)
    }
}

#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    pub value: V,
    pub fetched_at: DateTime<Utc>,
}

impl<V> CacheEntry<V> {
    /// Valid while `now - fetched_at < ttl`
    pub fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        match now.signed_duration_since(self.fetched_at).to_std() {
            Ok(age) => age < ttl,
            // fetched_at is ahead of the clock
            Err(_) => true,
        }
    }
}

type Slot<V> = Arc<Mutex<Option<CacheEntry<V>>>>;

/// Process-lifetime cache of fetch results keyed by call and parameter
pub struct ResponseCache<V> {
    slots: DashMap<CacheKey, Slot<V>>,
    clock: Arc<dyn Clock>,
}

impl<V> fmt::Debug for ResponseCache<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseCache")
            .field("slots", &self.slots.len())
            .field("clock", &self.clock)
            .finish()
    }
}

impl<V: Clone> ResponseCache<V> {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            slots: DashMap::new(),
            clock,
        }
    }

    /// Return the cached value for `key`, or run `fetch` and cache its result.
    ///
    /// Results are cached whatever they contain, so an empty answer is not
    /// re-requested until it expires.
    pub async fn get_or_fetch<F, Fut>(&self, key: &CacheKey, ttl: Duration, fetch: F) -> V
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = V>,
    {
        let slot = self.slots.entry(key.clone()).or_default().clone();
        let mut entry = slot.lock().await;

        if let Some(cached) = entry.as_ref() {
            if cached.is_fresh(self.clock.now(), ttl) {
                debug!(key = %key, "Cache hit");
                return cached.value.clone();
            }
            debug!(key = %key, "Cache entry expired");
        }

        let value = fetch().await;
        *entry = Some(CacheEntry {
            value: value.clone(),
            fetched_at: self.clock.now(),
        });
        debug!(key = %key, "Cached fresh response");

        value
    }

    /// Number of keys with a slot, including ones being fetched
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Drop one key; returns whether a slot was removed.
    ///
    /// A slot with a fetch in flight is kept, so the next caller waits for
    /// that fetch instead of starting a second one.
    pub fn invalidate(&self, key: &CacheKey) -> bool {
        self.slots
            .remove_if(key, |_, slot| slot.try_lock().is_ok())
            .is_some()
    }

    pub fn clear(&self) {
        self.slots.clear();
    }

    /// Drop every expired slot and return how many were removed.
    ///
    /// Slots with a fetch in flight are kept.
    pub fn purge_expired(&self, ttl: Duration) -> usize {
        let now = self.clock.now();
        let before = self.slots.len();

        self.slots.retain(|_, slot| match slot.try_lock() {
            Ok(entry) => entry.as_ref().is_some_and(|e| e.is_fresh(now, ttl)),
            Err(_) => true,
        });

        before.saturating_sub(self.slots.len())
    }
}
