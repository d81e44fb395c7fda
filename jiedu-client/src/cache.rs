//! Translation cache with batch deduplication
//!
//! One cache per analysis result: trimmed word/character keys mapped to
//! translations, merged in from batch responses. The in-flight guard is
//! the single mutual-exclusion device the system needs — while a batch
//! request is outstanding, concurrent lookups wait for it instead of
//! issuing a duplicate.

use crate::backend::AnalysisBackend;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use tokio::sync::Notify;

#[derive(Default)]
struct CacheState {
    entries: HashMap<String, String>,
    in_flight: bool,
}

/// Item-to-translation cache scoped to one analysis result.
#[derive(Default)]
pub struct TranslationCache {
    state: Mutex<CacheState>,
    fetch_done: Notify,
}

impl TranslationCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Translation for a single item, if cached.
    pub fn get(&self, item: &str) -> Option<String> {
        self.state().entries.get(item.trim()).cloned()
    }

    /// The cached subset of the given items.
    pub fn snapshot(&self, items: &[String]) -> HashMap<String, String> {
        let state = self.state();
        items
            .iter()
            .map(|item| item.trim())
            .filter_map(|key| {
                state
                    .entries
                    .get(key)
                    .map(|translation| (key.to_string(), translation.clone()))
            })
            .collect()
    }

    /// Merge a batch result into the cache. New keys are added; existing
    /// keys are left untouched.
    pub fn merge_in(&self, translations: HashMap<String, String>) {
        let mut state = self.state();
        for (key, translation) in translations {
            let key = key.trim().to_string();
            if key.is_empty() {
                continue;
            }
            state.entries.entry(key).or_insert(translation);
        }
    }

    /// Claim the single outstanding-fetch slot. Returns false when a batch
    /// request is already in flight.
    pub fn try_begin_fetch(&self) -> bool {
        let mut state = self.state();
        if state.in_flight {
            return false;
        }
        state.in_flight = true;
        true
    }

    /// Release the fetch slot and wake all waiters.
    pub fn end_fetch(&self) {
        self.state().in_flight = false;
        self.fetch_done.notify_waiters();
    }

    /// Drop all entries. Called whenever a new analysis result is loaded.
    pub fn reset(&self) {
        self.state().entries.clear();
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.state().entries.len()
    }

    /// True when nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.state().entries.is_empty()
    }

    async fn wait_for_fetch(&self) {
        loop {
            let notified = self.fetch_done.notified();
            if !self.state().in_flight {
                return;
            }
            notified.await;
        }
    }

    /// Resolve translations for a batch of items.
    ///
    /// Cached items are excluded from the outgoing request; an empty
    /// remainder resolves immediately with no network call. A concurrent
    /// invocation while a batch is outstanding waits for that batch and
    /// then reads the merged view. A failed request leaves the cache
    /// unchanged — consumers fall back to per-character meanings.
    pub async fn lookup_batch<B>(&self, backend: &B, items: &[String]) -> HashMap<String, String>
    where
        B: AnalysisBackend + ?Sized,
    {
        let mut wanted: Vec<String> = Vec::new();
        for item in items {
            let key = item.trim();
            if !key.is_empty() && !wanted.iter().any(|w| w == key) {
                wanted.push(key.to_string());
            }
        }

        let missing: Vec<String> = {
            let state = self.state();
            wanted
                .iter()
                .filter(|key| !state.entries.contains_key(key.as_str()))
                .cloned()
                .collect()
        };
        if missing.is_empty() {
            return self.snapshot(&wanted);
        }

        if !self.try_begin_fetch() {
            tracing::debug!("translation batch already in flight, waiting");
            self.wait_for_fetch().await;
            return self.snapshot(&wanted);
        }

        match backend.translate_batch(&missing).await {
            Ok(translations) => {
                tracing::debug!(received = translations.len(), "merging batch translations");
                self.merge_in(translations);
            }
            Err(err) => {
                tracing::warn!(error = %err, "translation batch failed, keeping cache unchanged");
            }
        }
        self.end_fetch();

        self.snapshot(&wanted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{AnalysisResponse, DictionaryStats, ScriptType};
    use crate::error::{ClientError, Result};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Backend fake that counts batch requests and answers each item with
    /// an uppercase marker translation.
    #[derive(Default)]
    struct CountingBackend {
        batches: AtomicUsize,
        fail: bool,
        delay: Option<Duration>,
    }

    #[async_trait::async_trait]
    impl AnalysisBackend for CountingBackend {
        async fn analyze(&self, _text: &str) -> Result<AnalysisResponse> {
            unimplemented!("not used by cache tests")
        }

        async fn translate_batch(&self, items: &[String]) -> Result<HashMap<String, String>> {
            self.batches.fetch_add(1, Ordering::SeqCst);
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            if self.fail {
                return Err(ClientError::Unavailable { status: 503 });
            }
            Ok(items
                .iter()
                .map(|item| (item.clone(), format!("<{item}>")))
                .collect())
        }

        async fn detect_script(&self, _text: &str) -> Result<ScriptType> {
            Ok(ScriptType::Traditional)
        }

        async fn convert_script(&self, text: &str, _to: ScriptType) -> Result<String> {
            Ok(text.to_string())
        }

        async fn dictionary_stats(&self) -> Result<DictionaryStats> {
            Ok(DictionaryStats::default())
        }
    }

    fn items(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn fetches_missing_items_and_caches_them() {
        let cache = TranslationCache::new();
        let backend = CountingBackend::default();

        let result = cache.lookup_batch(&backend, &items(&["氣功", "修煉"])).await;
        assert_eq!(result.get("氣功").map(String::as_str), Some("<氣功>"));
        assert_eq!(result.len(), 2);
        assert_eq!(backend.batches.load(Ordering::SeqCst), 1);
        assert_eq!(cache.len(), 2);
    }

    #[tokio::test]
    async fn cached_items_issue_no_request() {
        let cache = TranslationCache::new();
        let backend = CountingBackend::default();

        cache.lookup_batch(&backend, &items(&["氣功"])).await;
        let again = cache.lookup_batch(&backend, &items(&["氣功"])).await;
        assert_eq!(again.len(), 1);
        assert_eq!(backend.batches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn keys_are_trimmed_and_deduplicated() {
        let cache = TranslationCache::new();
        let backend = CountingBackend::default();

        let result = cache
            .lookup_batch(&backend, &items(&[" 氣功 ", "氣功", "  "]))
            .await;
        assert_eq!(result.len(), 1);
        assert_eq!(cache.get("氣功").as_deref(), Some("<氣功>"));
    }

    #[tokio::test]
    async fn concurrent_lookups_issue_one_request() {
        let cache = TranslationCache::new();
        let backend = CountingBackend {
            delay: Some(Duration::from_millis(20)),
            ..CountingBackend::default()
        };

        let wanted = items(&["氣功", "修煉"]);
        let (first, second) = tokio::join!(
            cache.lookup_batch(&backend, &wanted),
            cache.lookup_batch(&backend, &wanted),
        );

        assert_eq!(backend.batches.load(Ordering::SeqCst), 1);
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }

    #[tokio::test]
    async fn failure_leaves_cache_unchanged() {
        let cache = TranslationCache::new();
        cache.merge_in(HashMap::from([("好".to_string(), "good".to_string())]));

        let backend = CountingBackend {
            fail: true,
            ..CountingBackend::default()
        };
        let result = cache.lookup_batch(&backend, &items(&["好", "氣功"])).await;

        // Only the previously cached subset comes back.
        assert_eq!(result.len(), 1);
        assert_eq!(result.get("好").map(String::as_str), Some("good"));
        assert_eq!(cache.len(), 1);

        // The guard was released; a later lookup retries.
        let retrying = CountingBackend::default();
        let recovered = cache.lookup_batch(&retrying, &items(&["氣功"])).await;
        assert_eq!(recovered.len(), 1);
        assert_eq!(retrying.batches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn merge_keeps_existing_entries() {
        let cache = TranslationCache::new();
        cache.merge_in(HashMap::from([("好".to_string(), "good".to_string())]));
        cache.merge_in(HashMap::from([
            ("好".to_string(), "clobbered".to_string()),
            ("壞".to_string(), "bad".to_string()),
        ]));
        assert_eq!(cache.get("好").as_deref(), Some("good"));
        assert_eq!(cache.get("壞").as_deref(), Some("bad"));
    }

    #[tokio::test]
    async fn reset_clears_entries() {
        let cache = TranslationCache::new();
        cache.merge_in(HashMap::from([("好".to_string(), "good".to_string())]));
        assert!(!cache.is_empty());
        cache.reset();
        assert!(cache.is_empty());
        assert_eq!(cache.get("好"), None);
    }

    #[test]
    fn fetch_guard_is_exclusive() {
        let cache = TranslationCache::new();
        assert!(cache.try_begin_fetch());
        assert!(!cache.try_begin_fetch());
        cache.end_fetch();
        assert!(cache.try_begin_fetch());
    }
}
