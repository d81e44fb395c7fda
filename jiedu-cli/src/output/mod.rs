//! Output formatting module

use anyhow::Result;

/// One segmented sentence with its position in the source.
#[derive(Debug, Clone)]
pub struct SentenceRecord<'a> {
    /// Index in the canonical sentence list.
    pub index: usize,
    /// The sentence text.
    pub text: &'a str,
    /// Character offset in the raw content, when located.
    pub offset: Option<usize>,
}

/// Trait for sentence output formatters
pub trait SentenceFormatter {
    /// Format and output a single sentence record
    fn format_sentence(&mut self, record: &SentenceRecord<'_>) -> Result<()>;

    /// Finalize output (e.g. close a JSON array)
    fn finish(&mut self) -> Result<()>;
}

pub mod json;
pub mod text;

pub use json::JsonFormatter;
pub use text::TextFormatter;
