//! Network boundary and reading-session orchestration for jiedu
//!
//! The analysis/translation backend is consumed as a black box through the
//! [`AnalysisBackend`] trait; [`Session`] ties documents, selection,
//! analysis state and the translation cache together for a front end.

#![warn(missing_docs)]

pub mod backend;
pub mod cache;
pub mod error;
pub mod session;

// Re-export key types
pub use backend::{AnalysisBackend, AnalysisResponse, DictionaryStats, HttpBackend, ScriptType};
pub use cache::TranslationCache;
pub use error::{ClientError, Result};
pub use session::{AnalysisState, SentenceAnalysis, Session};
