//! Cache invalidation events.
//!
//! Instead of reaching into a global query cache, producers emit a
//! [`CacheEvent`] and each subscriber decides whether to refetch.

use flume::{Receiver, Sender};

/// Keys of cached data sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKey {
    Users,
}

impl QueryKey {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Users => "users",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheEvent {
    /// The cached list of users may no longer match the server.
    UsersListInvalidated,
}

impl CacheEvent {
    pub const fn key(self) -> QueryKey {
        match self {
            Self::UsersListInvalidated => QueryKey::Users,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CacheEventSender {
    tx: Sender<CacheEvent>,
}

impl CacheEventSender {
    pub fn emit(&self, event: CacheEvent) {
        log::debug!("Cache event {event:?} for key '{}'", event.key().as_str());
        if self.tx.send(event).is_err() {
            log::debug!("No subscriber for cache event {event:?}");
        }
    }
}

#[derive(Debug, Clone)]
pub struct CacheEventReceiver {
    rx: Receiver<CacheEvent>,
}

impl CacheEventReceiver {
    /// Takes every pending event without blocking.
    pub fn drain(&self) -> Vec<CacheEvent> {
        self.rx.try_iter().collect()
    }
}

pub fn cache_channel() -> (CacheEventSender, CacheEventReceiver) {
    let (tx, rx) = flume::unbounded();
    (CacheEventSender { tx }, CacheEventReceiver { rx })
}

/// Subscriber-side view of the users list freshness.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsersListCache {
    stale: bool,
    invalidations: u64,
}

impl UsersListCache {
    pub fn apply(&mut self, event: CacheEvent) {
        match event {
            CacheEvent::UsersListInvalidated => {
                self.stale = true;
                self.invalidations += 1;
            }
        }
    }

    /// Applies every pending event from `receiver`. Returns how many were applied.
    pub fn sync(&mut self, receiver: &CacheEventReceiver) -> usize {
        let events = receiver.drain();
        let count = events.len();
        for event in events {
            self.apply(event);
        }
        count
    }

    pub fn is_stale(&self) -> bool {
        self.stale
    }

    pub fn invalidations(&self) -> u64 {
        self.invalidations
    }

    /// Called after the list has been refetched.
    pub fn mark_fresh(&mut self) {
        self.stale = false;
    }
}
