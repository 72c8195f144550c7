use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use bytes::Bytes;

/// In-memory audio cache keyed by request signature.
///
/// Entries live for the lifetime of the process; there is no eviction.
/// The lock is only held for a lookup or an insert, never across an
/// upstream call, so two identical requests racing each other may both
/// miss and both go upstream.
#[derive(Default)]
pub struct AudioCache {
    entries: RwLock<HashMap<String, Bytes>>,
}

impl AudioCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<Bytes> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(key).cloned()
    }

    pub fn insert(&self, key: String, audio: Bytes) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key, audio);
    }

    pub(crate) fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_miss_then_hit() {
        let cache = AudioCache::new();
        assert_eq!(cache.len(), 0);
        assert!(cache.get("a").is_none());

        cache.insert("a".to_string(), Bytes::from_static(b"ID3"));
        assert_eq!(cache.get("a").unwrap(), Bytes::from_static(b"ID3"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_insert_overwrites() {
        let cache = AudioCache::new();
        cache.insert("a".to_string(), Bytes::from_static(b"one"));
        cache.insert("a".to_string(), Bytes::from_static(b"two"));
        assert_eq!(cache.get("a").unwrap(), Bytes::from_static(b"two"));
        assert_eq!(cache.len(), 1);
    }
}
