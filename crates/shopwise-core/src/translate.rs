//! Cached, fallback-aware translation.
//!
//! [`TranslationService`] wraps a [`Translator`] with a read-through
//! [`TranslationCache`]:
//!
//! - English is the source language and passes through untouched.
//! - Natively supported languages are translated directly and cached.
//! - Any other language is translated into [`Language::FALLBACK`] (through
//!   the cache), prefixed with [`FALLBACK_MARKER`], and the marked text is
//!   cached under the requested language.
//!
//! Entries are never invalidated: the same `(text, language)` pair is
//! assumed to always translate the same way. Concurrent misses on one key
//! may both call the translator; the last insert wins.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use anyhow::Result;
use chrono::{DateTime, Utc};

use crate::language::{Language, FALLBACK_MARKER};
use crate::services::Translator;

/// A cached translation.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    pub translated_text: String,
    pub cached_at: DateTime<Utc>,
}

/// Process-lifetime translation cache keyed by `(text, language)`.
///
/// Construct one and share it via `Arc` between every
/// [`TranslationService`] that should see the same entries.
#[derive(Debug, Default)]
pub struct TranslationCache {
    entries: RwLock<HashMap<(String, Language), CacheEntry>>,
}

impl TranslationCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, text: &str, language: Language) -> Option<CacheEntry> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&(text.to_string(), language))
            .cloned()
    }

    /// Store a translation, overwriting any previous entry for the key.
    pub fn insert(&self, text: &str, language: Language, translated_text: String) {
        let entry = CacheEntry {
            translated_text,
            cached_at: Utc::now(),
        };
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert((text.to_string(), language), entry);
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Translator front-end with caching and fallback.
#[derive(Clone)]
pub struct TranslationService {
    translator: Arc<dyn Translator>,
    cache: Arc<TranslationCache>,
}

impl TranslationService {
    pub fn new(translator: Arc<dyn Translator>, cache: Arc<TranslationCache>) -> Self {
        Self { translator, cache }
    }

    pub fn cache(&self) -> &Arc<TranslationCache> {
        &self.cache
    }

    /// Translate `text` into `target`, using the cache when possible.
    pub async fn translate(&self, text: &str, target: Language) -> Result<String> {
        if target == Language::English {
            return Ok(text.to_string());
        }

        if target.is_natively_supported() {
            return self.translate_native(text, target).await;
        }

        if let Some(hit) = self.cache.get(text, target) {
            tracing::info!(language = %target, "translation cache hit");
            return Ok(hit.translated_text);
        }
        tracing::info!(language = %target, "translation cache miss");
        tracing::info!(
            requested = %target,
            fallback = %Language::FALLBACK,
            "language not natively supported, using fallback"
        );
        let via_fallback = self.translate_native(text, Language::FALLBACK).await?;
        let marked = format!("{}{}", FALLBACK_MARKER, via_fallback);
        self.cache.insert(text, target, marked.clone());
        Ok(marked)
    }

    async fn translate_native(&self, text: &str, target: Language) -> Result<String> {
        if let Some(hit) = self.cache.get(text, target) {
            tracing::info!(language = %target, "translation cache hit");
            return Ok(hit.translated_text);
        }
        tracing::info!(language = %target, "translation cache miss");

        match self.translator.translate(text, target).await {
            Ok(translated) => {
                tracing::info!(language = %target, "translation call succeeded");
                self.cache.insert(text, target, translated.clone());
                Ok(translated)
            }
            Err(e) => {
                tracing::error!(language = %target, error = %e, "translation call failed");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingTranslator {
        calls: AtomicUsize,
        targets: Mutex<Vec<Language>>,
        fail: bool,
    }

    #[async_trait]
    impl Translator for RecordingTranslator {
        async fn translate(&self, text: &str, target: Language) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.targets.lock().unwrap().push(target);
            if self.fail {
                anyhow::bail!("translator offline");
            }
            Ok(format!("<{}>{}", target.code(), text))
        }
    }

    fn service(translator: Arc<RecordingTranslator>) -> TranslationService {
        TranslationService::new(translator, Arc::new(TranslationCache::new()))
    }

    #[tokio::test]
    async fn test_second_call_served_from_cache() {
        let translator = Arc::new(RecordingTranslator::default());
        let svc = service(translator.clone());

        let first = svc.translate("Best phone", Language::Tamil).await.unwrap();
        let second = svc.translate("Best phone", Language::Tamil).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first, "<ta>Best phone");
        assert_eq!(translator.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unsupported_language_uses_fallback_with_marker() {
        let translator = Arc::new(RecordingTranslator::default());
        let svc = service(translator.clone());

        let out = svc.translate("Best phone", Language::Bengali).await.unwrap();

        assert!(out.starts_with(FALLBACK_MARKER), "got: {}", out);
        assert_eq!(out, format!("{}<hi>Best phone", FALLBACK_MARKER));
        assert_eq!(*translator.targets.lock().unwrap(), vec![Language::Hindi]);
    }

    #[tokio::test]
    async fn test_fallback_shares_hindi_cache() {
        let translator = Arc::new(RecordingTranslator::default());
        let svc = service(translator.clone());

        svc.translate("Best phone", Language::Hindi).await.unwrap();
        svc.translate("Best phone", Language::Gujarati).await.unwrap();
        svc.translate("Best phone", Language::Gujarati).await.unwrap();

        assert_eq!(translator.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_english_is_identity() {
        let translator = Arc::new(RecordingTranslator::default());
        let svc = service(translator.clone());

        let out = svc.translate("Best phone", Language::English).await.unwrap();
        assert_eq!(out, "Best phone");
        assert_eq!(translator.calls.load(Ordering::SeqCst), 0);
        assert!(svc.cache().is_empty());
    }

    #[tokio::test]
    async fn test_failure_is_not_cached() {
        let translator = Arc::new(RecordingTranslator {
            fail: true,
            ..Default::default()
        });
        let svc = service(translator.clone());

        assert!(svc.translate("Best phone", Language::Tamil).await.is_err());
        assert!(svc.translate("Best phone", Language::Tamil).await.is_err());
        assert_eq!(translator.calls.load(Ordering::SeqCst), 2);
        assert!(svc.cache().is_empty());
    }

    #[test]
    fn test_cache_last_write_wins() {
        let cache = TranslationCache::new();
        cache.insert("hello", Language::Tamil, "one".into());
        cache.insert("hello", Language::Tamil, "two".into());
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("hello", Language::Tamil).unwrap().translated_text, "two");
        assert!(cache.get("hello", Language::Telugu).is_none());
    }

    #[test]
    fn test_concurrent_writes_leave_one_entry() {
        let cache = Arc::new(TranslationCache::new());
        let writers: Vec<_> = (0..8)
            .map(|i| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || {
                    for round in 0..50 {
                        cache.insert("hello", Language::Tamil, format!("w{}-{}", i, round));
                    }
                })
            })
            .collect();
        for writer in writers {
            writer.join().unwrap();
        }

        assert_eq!(cache.len(), 1);
        let stored = cache.get("hello", Language::Tamil).unwrap().translated_text;
        let written: Vec<String> = (0..8)
            .flat_map(|i| (0..50).map(move |round| format!("w{}-{}", i, round)))
            .collect();
        assert!(written.contains(&stored), "unexpected value: {}", stored);
        assert!(stored.ends_with("-49"), "not a final write: {}", stored);
    }
}
