pub mod error;

use dashmap::{mapref::entry::Entry, DashMap};
use std::time::{Duration, Instant};

pub use model::{Artifact, ArtifactKind, ReviewRecord, Uploader};

struct Slot {
    record: ReviewRecord,
    created: Instant,
}

impl Slot {
    fn is_expired(&self, ttl: Option<Duration>) -> bool {
        ttl.is_some_and(|ttl| self.created.elapsed() >= ttl)
    }
}

/// Open review polls keyed by poll ID.
///
/// Lookups and insertions only ever lock the shard holding a single entry, so callers may share one
/// registry across tasks freely. Without a TTL, records are kept for the lifetime of the registry.
/// With a TTL, expired records read as absent and are dropped by [`Registry::sweep`].
#[derive(Default)]
pub struct Registry {
    polls: DashMap<Box<str>, Slot>,
    ttl: Option<Duration>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self { polls: DashMap::new(), ttl: Some(ttl) }
    }

    pub const fn ttl(&self) -> Option<Duration> {
        self.ttl
    }

    /// Starts tracking `poll`. Fails if a live record already exists for the same ID.
    pub fn put(&self, poll: &str, record: ReviewRecord) -> error::Result<()> {
        let slot = Slot { record, created: Instant::now() };
        match self.polls.entry(poll.into()) {
            Entry::Occupied(mut entry) => {
                if !entry.get().is_expired(self.ttl) {
                    return Err(error::Error::DuplicateKey);
                }
                entry.insert(slot);
            }
            Entry::Vacant(entry) => {
                entry.insert(slot);
            }
        }
        Ok(())
    }

    pub fn get(&self, poll: &str) -> Option<ReviewRecord> {
        let slot = self.polls.get(poll)?;
        if slot.is_expired(self.ttl) {
            return None;
        }
        Some(slot.record.clone())
    }

    /// Drops every expired record. Returns the number of records removed.
    pub fn sweep(&self) -> usize {
        let ttl = self.ttl;
        let mut removed = 0;
        self.polls.retain(|_, slot| {
            let expired = slot.is_expired(ttl);
            removed += usize::from(expired);
            !expired
        });
        removed
    }

    pub fn len(&self) -> usize {
        self.polls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polls.is_empty()
    }
}
