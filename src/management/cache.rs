//! Per-range storage of loaded artists.
//!
//! One [`RangeCache`] lives inside each logged-in session and is thrown away
//! with it. Since the service answers with the same top artists for a range
//! for the lifetime of a session, entries are never refreshed.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::types::{Artist, TimeRange};

/// The artists of one range plus the time they arrived.
#[derive(Debug, Clone)]
pub struct CachedArtists {
    pub artists: Vec<Artist>,
    pub fetched_at: DateTime<Utc>,
}

/// In-memory artists per time range for one session.
///
/// Entries are write-once: once a range is filled it is never replaced or
/// evicted, only dropped all together by [`RangeCache::clear`].
#[derive(Debug, Default)]
pub struct RangeCache {
    entries: HashMap<TimeRange, CachedArtists>,
}

impl RangeCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `artists` under `range` unless the range is already filled.
    /// Returns whether the entry was written.
    pub fn insert(&mut self, range: TimeRange, artists: Vec<Artist>) -> bool {
        if self.entries.contains_key(&range) {
            return false;
        }

        self.entries.insert(
            range,
            CachedArtists {
                artists,
                fetched_at: Utc::now(),
            },
        );
        true
    }

    /// Returns the entry for `range`, if it has been filled.
    ///
    /// # Example
    ///
    /// ```
    /// let mut cache = RangeCache::new();
    /// assert!(cache.get(TimeRange::ShortTerm).is_none());
    /// cache.insert(TimeRange::ShortTerm, Vec::new());
    /// assert!(cache.get(TimeRange::ShortTerm).is_some());
    /// ```
    pub fn get(&self, range: TimeRange) -> Option<&CachedArtists> {
        self.entries.get(&range)
    }

    pub fn contains(&self, range: TimeRange) -> bool {
        self.entries.contains_key(&range)
    }

    /// Filled ranges in picker order.
    pub fn ranges(&self) -> Vec<TimeRange> {
        TimeRange::ALL
            .into_iter()
            .filter(|r| self.entries.contains_key(r))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every range at once; the only way an entry ever goes away.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
