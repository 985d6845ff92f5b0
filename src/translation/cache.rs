//! Session cache for provider translations.

use std::collections::HashMap;
use std::sync::Arc;

use crate::models::{TranslationKey, TranslationPayload};

/// Append-only store of resolved payloads, keyed by verse and language
///
/// Entries live for the whole reading session and are never persisted.
#[derive(Debug, Default)]
pub struct TranslationCache {
    entries: HashMap<TranslationKey, Arc<TranslationPayload>>,
}

impl TranslationCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a payload under its own key.
    pub fn insert(&mut self, key: TranslationKey, payload: Arc<TranslationPayload>) {
        tracing::debug!("Caching translation for {key}");
        self.entries.insert(key, payload);
    }

    /// Get a cached payload.
    pub fn get(&self, key: &TranslationKey) -> Option<Arc<TranslationPayload>> {
        self.entries.get(key).map(Arc::clone)
    }

    /// Check if a payload is cached.
    pub fn contains(&self, key: &TranslationKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Get the number of cached payloads.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_per_verse_and_language() {
        let mut cache = TranslationCache::new();
        let fr = TranslationKey::new("v2", "fr");
        let payload = Arc::new(TranslationPayload::from_purport("La vérité est une."));

        cache.insert(fr.clone(), Arc::clone(&payload));

        assert!(cache.contains(&fr));
        assert!(!cache.contains(&TranslationKey::new("v2", "de")));
        assert!(!cache.contains(&TranslationKey::new("v3", "fr")));
        assert!(Arc::ptr_eq(&cache.get(&fr).unwrap(), &payload));
        assert_eq!(cache.len(), 1);
    }
}
