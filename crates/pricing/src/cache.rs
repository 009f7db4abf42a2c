//! Explicit keyed query cache
//!
//! The front end this service replaces relied on a query library's implicit
//! caching. Here the same behavior is a plain map with an injectable clock:
//! staleness, in-flight deduplication, and stale-response discard are all
//! observable without a timer or a network.
//!
//! Per-key lifecycle: `Idle → Fetching → Ready` on success, `Fetching →
//! Error` on failure. `Error` is terminal for the key until it is
//! invalidated — the cache never schedules retries on its own.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

/// Millisecond clock, injectable so tests can drive time by hand
pub trait Clock: Send + Sync {
    /// Milliseconds since the unix epoch
    fn now_millis(&self) -> u64;
}

/// Wall clock
#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

/// Manually driven clock for cache and engine tests
#[cfg(test)]
pub(crate) struct ManualClock(pub std::sync::atomic::AtomicU64);

#[cfg(test)]
impl ManualClock {
    pub fn new(start_millis: u64) -> Self {
        Self(std::sync::atomic::AtomicU64::new(start_millis))
    }

    pub fn advance(&self, duration: Duration) {
        self.0.fetch_add(
            duration.as_millis() as u64,
            std::sync::atomic::Ordering::SeqCst,
        );
    }
}

#[cfg(test)]
impl Clock for ManualClock {
    fn now_millis(&self) -> u64 {
        self.0.load(std::sync::atomic::Ordering::SeqCst)
    }
}

/// Per-key fetch lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchState {
    Idle,
    Fetching,
    Ready,
    Error,
}

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    state: FetchState,
    value: Option<V>,
    error: Option<String>,
    /// When the current value was committed (millis)
    fetched_at: u64,
    /// Bumped on invalidation; commits from older generations are discarded
    generation: u64,
}

impl<V> CacheEntry<V> {
    fn idle(generation: u64) -> Self {
        Self {
            state: FetchState::Idle,
            value: None,
            error: None,
            fetched_at: 0,
            generation,
        }
    }
}

/// Permission to run one fetch for one key. Committing a ticket whose key
/// was invalidated in the meantime is discarded, not applied.
#[derive(Debug)]
pub struct FetchTicket<K> {
    key: K,
    generation: u64,
}

/// What a caller should do for a key right now
#[derive(Debug, Clone, PartialEq)]
pub enum CacheStatus<V> {
    /// Value inside the freshness window: serve it, do not fetch
    Fresh(V),
    /// A fetch is already in flight for this key; do not start another.
    /// Carries the previous value while it is still servable.
    Fetching(Option<V>),
    /// Last fetch failed; terminal until the key is invalidated
    Failed(String),
    /// No fresh value; a fetch may begin. Carries the stale value while
    /// it has not hard-expired.
    Miss(Option<V>),
}

/// Keyed read-through cache with distinct fresh and hard-expiry windows
pub struct QueryCache<K, V> {
    entries: HashMap<K, CacheEntry<V>>,
    fresh_ttl: Duration,
    expire_ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl<K: Eq + Hash + Clone, V: Clone> QueryCache<K, V> {
    pub fn new(fresh_ttl: Duration, expire_ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: HashMap::new(),
            fresh_ttl,
            expire_ttl,
            clock,
        }
    }

    fn age_millis(&self, entry: &CacheEntry<V>) -> u64 {
        self.clock.now_millis().saturating_sub(entry.fetched_at)
    }

    /// The committed value while it has not hard-expired
    fn servable(&self, entry: &CacheEntry<V>) -> Option<V> {
        if self.age_millis(entry) < self.expire_ttl.as_millis() as u64 {
            entry.value.clone()
        } else {
            None
        }
    }

    /// Inspect a key without changing any state
    pub fn status(&self, key: &K) -> CacheStatus<V> {
        let Some(entry) = self.entries.get(key) else {
            return CacheStatus::Miss(None);
        };

        match entry.state {
            FetchState::Fetching => CacheStatus::Fetching(self.servable(entry)),
            FetchState::Error => {
                CacheStatus::Failed(entry.error.clone().unwrap_or_default())
            }
            FetchState::Ready => {
                if self.age_millis(entry) < self.fresh_ttl.as_millis() as u64 {
                    match entry.value.clone() {
                        Some(value) => CacheStatus::Fresh(value),
                        None => CacheStatus::Miss(None),
                    }
                } else {
                    CacheStatus::Miss(self.servable(entry))
                }
            }
            FetchState::Idle => CacheStatus::Miss(None),
        }
    }

    /// Begin a fetch for `key` unless one is already in flight, the entry
    /// is still fresh, or the key is in the terminal error state.
    pub fn begin_fetch(&mut self, key: &K) -> Option<FetchTicket<K>> {
        let now = self.clock.now_millis();
        let fresh_ttl = self.fresh_ttl.as_millis() as u64;
        let entry = self
            .entries
            .entry(key.clone())
            .or_insert_with(|| CacheEntry::idle(0));

        match entry.state {
            FetchState::Fetching | FetchState::Error => return None,
            FetchState::Ready => {
                if now.saturating_sub(entry.fetched_at) < fresh_ttl {
                    return None;
                }
            }
            FetchState::Idle => {}
        }

        entry.state = FetchState::Fetching;
        Some(FetchTicket {
            key: key.clone(),
            generation: entry.generation,
        })
    }

    /// Commit a fetch result. Returns false when the result was discarded
    /// because the key was invalidated after the ticket was issued.
    pub fn commit(&mut self, ticket: FetchTicket<K>, result: Result<V, String>) -> bool {
        let now = self.clock.now_millis();
        let Some(entry) = self.entries.get_mut(&ticket.key) else {
            return false;
        };
        if entry.generation != ticket.generation || entry.state != FetchState::Fetching {
            return false;
        }

        match result {
            Ok(value) => {
                entry.state = FetchState::Ready;
                entry.value = Some(value);
                entry.error = None;
                entry.fetched_at = now;
            }
            Err(message) => {
                entry.state = FetchState::Error;
                entry.error = Some(message);
            }
        }
        true
    }

    /// Drop a key's cached state: `Ready → Idle` when an input that feeds
    /// the key changes, and the cancellation point for in-flight fetches.
    pub fn invalidate(&mut self, key: &K) {
        if let Some(entry) = self.entries.get_mut(key) {
            *entry = CacheEntry::idle(entry.generation + 1);
        }
    }
}
