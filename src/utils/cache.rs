use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

const DEFAULT_MAX_ENTRIES: usize = 1024;

#[derive(Debug, Clone)]
struct CachedEntry<V> {
    value: V,
    stored_at: Instant,
}

/// In-memory cache with a fixed time-to-live per entry and a bounded size.
///
/// Values are cloned out on read, so the lock is only held for the map
/// lookup and never across an `.await` in callers.
#[derive(Debug)]
pub struct TtlCache<K, V> {
    ttl: Duration,
    max_entries: usize,
    entries: Mutex<HashMap<K, CachedEntry<V>>>,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new(ttl: Duration) -> Self {
        Self::with_max_entries(ttl, DEFAULT_MAX_ENTRIES)
    }

    pub fn with_max_entries(ttl: Duration, max_entries: usize) -> Self {
        Self {
            ttl,
            max_entries: max_entries.max(1),
            entries: Mutex::new(HashMap::new()),
        }
    }

    // Recovers the map from a poisoned lock
    fn entries(&self) -> MutexGuard<'_, HashMap<K, CachedEntry<V>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the value for `key` if it was stored less than `ttl` ago.
    /// Expired entries are dropped on the way out.
    pub fn get(&self, key: &K) -> Option<V> {
        let mut entries = self.entries();

        match entries.get(key) {
            Some(entry) if entry.stored_at.elapsed() < self.ttl => Some(entry.value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Stores `value`, first sweeping expired entries. When the cache is
    /// still full the oldest entry makes room.
    pub fn insert(&self, key: K, value: V) {
        let mut entries = self.entries();
        let ttl = self.ttl;
        entries.retain(|_, entry| entry.stored_at.elapsed() < ttl);

        if entries.len() >= self.max_entries && !entries.contains_key(&key) {
            let oldest = entries
                .iter()
                .min_by_key(|(_, entry)| entry.stored_at)
                .map(|(k, _)| k.clone());
            if let Some(oldest) = oldest {
                entries.remove(&oldest);
            }
        }

        entries.insert(
            key,
            CachedEntry {
                value,
                stored_at: Instant::now(),
            },
        );
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_hit_within_ttl() {
        let cache = TtlCache::new(Duration::from_secs(60));
        cache.insert("cities_IL".to_string(), vec!["Haifa".to_string()]);

        assert_eq!(cache.get(&"cities_IL".to_string()), Some(vec!["Haifa".to_string()]));
        assert_eq!(cache.get(&"cities_FR".to_string()), None);
    }

    #[test]
    fn test_expired_entry_is_evicted() {
        let cache = TtlCache::new(Duration::ZERO);
        cache.insert(1u32, "stale");

        assert_eq!(cache.get(&1), None);
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn test_insert_overwrites() {
        let cache = TtlCache::new(Duration::from_secs(60));
        cache.insert("k", 1);
        cache.insert("k", 2);
        assert_eq!(cache.get(&"k"), Some(2));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_insert_sweeps_expired_keys_never_read_again() {
        let cache = TtlCache::new(Duration::from_millis(1));
        for i in 0..500 {
            cache.insert(format!("city-{}", i), i);
        }
        std::thread::sleep(Duration::from_millis(20));

        cache.insert("fresh".to_string(), 0);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&"fresh".to_string()), Some(0));
    }

    #[test]
    fn test_full_cache_evicts_oldest() {
        let cache = TtlCache::with_max_entries(Duration::from_secs(60), 3);
        for key in ["a", "b", "c"] {
            cache.insert(key, key.len());
            std::thread::sleep(Duration::from_millis(2));
        }

        cache.insert("d", 1);
        assert_eq!(cache.len(), 3);
        assert_eq!(cache.get(&"a"), None);
        assert_eq!(cache.get(&"d"), Some(1));

        // Refreshing an existing key never evicts another one
        cache.insert("b", 9);
        assert_eq!(cache.len(), 3);
        assert_eq!(cache.get(&"c"), Some(1));
    }

    #[test]
    fn test_poisoned_lock_keeps_serving() {
        let cache = Arc::new(TtlCache::new(Duration::from_secs(60)));
        cache.insert("k", 1);

        let poisoner = Arc::clone(&cache);
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.entries.lock().unwrap();
            panic!("worker died holding the cache lock");
        })
        .join();
        assert!(cache.entries.is_poisoned());

        assert_eq!(cache.get(&"k"), Some(1));
        cache.insert("j", 2);
        assert_eq!(cache.get(&"j"), Some(2));
    }
}
