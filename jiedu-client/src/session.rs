//! Reading session
//!
//! Owns the loaded document, the current selection and the analysis state,
//! and drives the backend. All work is event-driven: selection fully
//! updates the resolved-sentence state before the analysis request is
//! issued, and the Loading state covers the whole request span.
//!
//! Superseded requests are not cancelled; instead every issued request
//! captures a sequence number and a response is applied only while its
//! sequence is still the latest, so a slow earlier response can never
//! overwrite a newer result.

use crate::backend::{AnalysisBackend, ScriptType};
use crate::cache::TranslationCache;
use crate::error::Result;
use jiedu_core::{resolver, Document, ResolvedSentence, WordGroup, WordGroups};
use std::collections::HashMap;

/// State of the analysis pane.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AnalysisState {
    /// No selection analyzed yet.
    #[default]
    Idle,
    /// A request is outstanding.
    Loading,
    /// Analysis of the current selection.
    Ready(SentenceAnalysis),
    /// The backend was unavailable; navigation stays usable.
    Failed,
}

/// Word-level analysis of one selected sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentenceAnalysis {
    /// The analyzed text.
    pub original: String,
    /// Pinyin for the whole sentence.
    pub pinyin: String,
    /// Sentence-level translation.
    pub translation: String,
    /// Aggregated word groups with the cross-view anchor mapping.
    pub groups: WordGroups,
    /// Word-level translations fetched through the cache.
    pub word_translations: HashMap<String, String>,
}

impl SentenceAnalysis {
    /// Translation to display for a group: the batch translation when
    /// available, else the per-character default meanings.
    pub fn group_translation(&self, group: &WordGroup) -> String {
        self.word_translations
            .get(group.word().trim())
            .cloned()
            .unwrap_or_else(|| group.fallback_meaning())
    }
}

/// A reading session over one document at a time.
pub struct Session<B> {
    backend: B,
    cache: TranslationCache,
    document: Option<Document>,
    script: Option<ScriptType>,
    current: ResolvedSentence,
    state: AnalysisState,
    sequence: u64,
}

impl<B: AnalysisBackend> Session<B> {
    /// Create a session with no document loaded.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            cache: TranslationCache::new(),
            document: None,
            script: None,
            current: ResolvedSentence::unresolved(),
            state: AnalysisState::Idle,
            sequence: 0,
        }
    }

    /// Load new text, replacing any previous document wholesale.
    ///
    /// Script detection is best-effort; a failure leaves the script
    /// unknown and the document fully usable.
    pub async fn load_text(&mut self, title: &str, raw: &str) {
        self.sequence += 1; // invalidate any in-flight analysis
        let document = Document::new("user_input", title, raw);
        tracing::info!(sentences = document.sentence_count(), "loaded document");

        self.script = match self.backend.detect_script(raw).await {
            Ok(script) => Some(script),
            Err(err) => {
                tracing::debug!(error = %err, "script detection unavailable");
                None
            }
        };
        self.document = Some(document);
        self.current = ResolvedSentence::unresolved();
        self.state = AnalysisState::Idle;
        self.cache.reset();
    }

    /// The loaded document, if any.
    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    /// The current selection.
    pub fn current(&self) -> &ResolvedSentence {
        &self.current
    }

    /// The analysis state for the current selection.
    pub fn state(&self) -> &AnalysisState {
        &self.state
    }

    /// Detected script of the loaded document.
    pub fn script(&self) -> Option<ScriptType> {
        self.script
    }

    /// Select a canonical sentence by index and analyze it.
    pub async fn select_index(&mut self, index: usize) {
        let Some(document) = &self.document else {
            return;
        };
        let resolved = resolver::resolve_index(document, index);
        self.apply_selection(resolved).await;
    }

    /// Resolve the sentence around a character offset and analyze it.
    pub async fn select_at_offset(&mut self, offset: usize) {
        let Some(document) = &self.document else {
            return;
        };
        let resolved = resolver::resolve_at_offset(document, offset);
        self.apply_selection(resolved).await;
    }

    /// Select free-form text (e.g. a mouse selection) and analyze it.
    ///
    /// The text does not have to match a canonical sentence; such
    /// selections are analyzable but not navigable.
    pub async fn select_text(&mut self, text: &str) {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return;
        }
        self.apply_selection(ResolvedSentence::ad_hoc(trimmed)).await;
    }

    /// Advance to the next canonical sentence, if any.
    pub async fn next(&mut self) {
        let Some(document) = &self.document else {
            return;
        };
        let resolved = resolver::resolve_forward(document, &self.current);
        if resolved != self.current {
            self.apply_selection(resolved).await;
        }
    }

    /// Step back to the previous canonical sentence, if any.
    pub async fn prev(&mut self) {
        let Some(document) = &self.document else {
            return;
        };
        let resolved = resolver::resolve_backward(document, &self.current);
        if resolved != self.current {
            self.apply_selection(resolved).await;
        }
    }

    /// Re-issue the analysis request for the current selection.
    pub async fn reanalyze(&mut self) {
        let current = self.current.clone();
        if current.is_resolved() {
            self.apply_selection(current).await;
        }
    }

    /// Convert the loaded document between script variants and reload it.
    pub async fn convert_script(&mut self, to: ScriptType) -> Result<()> {
        let Some(document) = &self.document else {
            return Ok(());
        };
        let converted = self.backend.convert_script(&document.raw_content, to).await?;
        let title = document.title.clone();
        self.load_text(&title, &converted).await;
        self.script = Some(to);
        Ok(())
    }

    async fn apply_selection(&mut self, resolved: ResolvedSentence) {
        self.current = resolved;
        if !self.current.is_resolved() {
            self.state = AnalysisState::Idle;
            return;
        }

        self.sequence += 1;
        let issued = self.sequence;
        self.state = AnalysisState::Loading;

        let outcome = self.backend.analyze(&self.current.text).await;
        if issued != self.sequence {
            tracing::debug!(sequence = issued, "discarding superseded analysis response");
            return;
        }

        match outcome {
            Ok(response) => {
                let groups = WordGroups::from_annotations(&response.character_analysis);
                // The cache is keyed by this analysis result's content.
                self.cache.reset();
                let items: Vec<String> =
                    groups.content_groups().map(|(_, group)| group.word()).collect();
                let word_translations = self.cache.lookup_batch(&self.backend, &items).await;
                if issued != self.sequence {
                    tracing::debug!(sequence = issued, "discarding superseded translations");
                    return;
                }
                self.state = AnalysisState::Ready(SentenceAnalysis {
                    original: response.original,
                    pinyin: response.pinyin,
                    translation: response.translation,
                    groups,
                    word_translations,
                });
            }
            Err(err) => {
                tracing::warn!(error = %err, "analysis failed");
                self.state = AnalysisState::Failed;
            }
        }
    }
}
