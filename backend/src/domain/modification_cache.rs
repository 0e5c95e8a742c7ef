//! # Modification Cache
//!
//! Remembers when each bath, and the bath collection as a whole, last
//! changed. Backs the conditional request headers of the baths API:
//!
//! - `If-Modified-Since` on reads: answer "not modified" when the client's
//!   timestamp equals the remembered one.
//! - `If-Unmodified-Since` on writes: refuse the write unless the client's
//!   timestamp equals the remembered one.
//!
//! Timestamps are compared for equality, not ordering: a client is expected
//! to echo back a `Last-Modified` value it received earlier.
//!
//! Writes stamp the touched bath and drop the collection entry. Reads stamp
//! lazily: an absent entry is filled with the current time on first read.
//! An absent entry is always considered stale.

use chrono::{Local, NaiveDateTime};
use dashmap::DashMap;
use std::sync::Arc;
use tracing::debug;

use super::errors::{DomainError, DomainResult};
use super::models::BathId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheKey {
    Bath(BathId),
    /// The list of all baths
    Collection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheEntry {
    Present(NaiveDateTime),
    Absent,
}

impl CacheEntry {
    /// Whether the entry holds exactly `timestamp`
    pub fn matches(&self, timestamp: NaiveDateTime) -> bool {
        matches!(self, CacheEntry::Present(stored) if *stored == timestamp)
    }
}

#[derive(Clone, Default)]
pub struct ModificationCache {
    entries: Arc<DashMap<CacheKey, NaiveDateTime>>,
}

impl ModificationCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn now() -> NaiveDateTime {
        Local::now().naive_local()
    }

    pub fn entry(&self, key: CacheKey) -> CacheEntry {
        self.entries
            .get(&key)
            .map_or(CacheEntry::Absent, |ts| CacheEntry::Present(*ts))
    }

    /// Current stamp for `key`, stamping it with the current time if absent
    pub fn stamp_if_absent(&self, key: CacheKey) -> NaiveDateTime {
        *self.entries.entry(key).or_insert_with(Self::now)
    }

    pub fn invalidate(&self, key: CacheKey) {
        self.entries.remove(&key);
    }

    /// A bath was created or replaced: stamp it, forget the collection stamp
    pub fn record_write(&self, bath_id: BathId) -> NaiveDateTime {
        let now = Self::now();
        self.entries.insert(CacheKey::Bath(bath_id), now);
        self.invalidate(CacheKey::Collection);
        debug!("Stamped bath {} at {}", bath_id, now);
        now
    }

    /// A bath was deleted: forget both its stamp and the collection stamp
    pub fn record_delete(&self, bath_id: BathId) {
        self.invalidate(CacheKey::Bath(bath_id));
        self.invalidate(CacheKey::Collection);
    }

    /// Fails with `NotModified` when `if_modified_since` equals the stored stamp
    pub fn check_modified_since(
        &self,
        key: CacheKey,
        if_modified_since: Option<NaiveDateTime>,
    ) -> DomainResult<()> {
        match if_modified_since {
            Some(since) if self.entry(key).matches(since) => {
                debug!("{:?} not modified since {}", key, since);
                Err(DomainError::NotModified)
            }
            _ => Ok(()),
        }
    }

    /// Fails with `PreconditionFailed` unless `if_unmodified_since` is absent
    /// or equals the stored stamp
    pub fn check_unmodified_since(
        &self,
        bath_id: BathId,
        if_unmodified_since: Option<NaiveDateTime>,
    ) -> DomainResult<()> {
        match if_unmodified_since {
            Some(since) if !self.entry(CacheKey::Bath(bath_id)).matches(since) => {
                debug!("Bath {} modified since {}", bath_id, since);
                Err(DomainError::PreconditionFailed { entity: "bath", id: bath_id })
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts(second: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(12, 0, second)
            .unwrap()
    }

    #[test]
    fn test_entries_start_absent() {
        let cache = ModificationCache::new();
        assert_eq!(cache.entry(CacheKey::Bath(1)), CacheEntry::Absent);
        assert_eq!(cache.entry(CacheKey::Collection), CacheEntry::Absent);
    }

    #[test]
    fn test_write_stamps_bath_and_invalidates_collection() {
        let cache = ModificationCache::new();
        let collection = cache.stamp_if_absent(CacheKey::Collection);
        assert_eq!(cache.entry(CacheKey::Collection), CacheEntry::Present(collection));

        let stamp = cache.record_write(1);

        assert_eq!(cache.entry(CacheKey::Bath(1)), CacheEntry::Present(stamp));
        assert_eq!(cache.entry(CacheKey::Collection), CacheEntry::Absent);
    }

    #[test]
    fn test_delete_invalidates_bath_and_collection() {
        let cache = ModificationCache::new();
        cache.record_write(1);
        cache.stamp_if_absent(CacheKey::Collection);

        cache.record_delete(1);

        assert_eq!(cache.entry(CacheKey::Bath(1)), CacheEntry::Absent);
        assert_eq!(cache.entry(CacheKey::Collection), CacheEntry::Absent);
    }

    #[test]
    fn test_stamp_if_absent_keeps_existing_stamp() {
        let cache = ModificationCache::new();
        let first = cache.stamp_if_absent(CacheKey::Collection);
        let second = cache.stamp_if_absent(CacheKey::Collection);
        assert_eq!(first, second);
    }

    #[test]
    fn test_check_modified_since() {
        let cache = ModificationCache::new();
        let stamp = cache.record_write(3);

        assert_eq!(
            cache.check_modified_since(CacheKey::Bath(3), Some(stamp)),
            Err(DomainError::NotModified)
        );
        assert_eq!(cache.check_modified_since(CacheKey::Bath(3), Some(ts(1))), Ok(()));
        assert_eq!(cache.check_modified_since(CacheKey::Bath(3), None), Ok(()));
    }

    #[test]
    fn test_absent_entry_is_always_modified() {
        let cache = ModificationCache::new();
        assert_eq!(cache.check_modified_since(CacheKey::Bath(9), Some(ts(1))), Ok(()));
        assert_eq!(cache.check_modified_since(CacheKey::Collection, Some(ts(1))), Ok(()));
    }

    #[test]
    fn test_check_unmodified_since() {
        let cache = ModificationCache::new();
        let stamp = cache.record_write(4);

        assert_eq!(cache.check_unmodified_since(4, Some(stamp)), Ok(()));
        assert_eq!(cache.check_unmodified_since(4, None), Ok(()));
        assert_eq!(
            cache.check_unmodified_since(4, Some(ts(1))),
            Err(DomainError::PreconditionFailed { entity: "bath", id: 4 })
        );
    }

    #[test]
    fn test_absent_entry_fails_unmodified_since() {
        let cache = ModificationCache::new();
        assert_eq!(cache.check_unmodified_since(5, None), Ok(()));
        assert_eq!(
            cache.check_unmodified_since(5, Some(ts(1))),
            Err(DomainError::PreconditionFailed { entity: "bath", id: 5 })
        );
    }

    #[test]
    fn test_clones_share_entries() {
        let cache = ModificationCache::new();
        let clone = cache.clone();
        let stamp = cache.record_write(1);
        assert_eq!(clone.entry(CacheKey::Bath(1)), CacheEntry::Present(stamp));
    }
}
