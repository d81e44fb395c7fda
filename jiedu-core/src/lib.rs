//! Deterministic text algorithms for CJK reading analysis
//!
//! This crate derives a canonical sentence list from raw prose, resolves
//! sentence boundaries around arbitrary character offsets (pointer clicks),
//! aggregates per-character annotations into word groups, and computes the
//! text splits needed to highlight a selection in a rendered view.
//!
//! Everything here is synchronous and free of I/O; the network boundary
//! lives in `jiedu-client`. All offsets are **character** offsets into the
//! raw text, since pointer events and rendered text are character-based.

#![warn(missing_docs)]

pub mod annotation;
pub mod document;
pub mod highlight;
pub mod resolver;
pub mod segmenter;
pub mod text;
pub mod word_group;

// Re-export key types
pub use annotation::CharacterAnnotation;
pub use document::{Document, ResolvedSentence};
pub use highlight::{HighlightSplit, NodeSelection};
pub use segmenter::segment;
pub use word_group::{WordGroup, WordGroups};
