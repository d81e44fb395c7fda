//! JSON output formatter

use super::{SentenceFormatter, SentenceRecord};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// JSON formatter - outputs sentences as a JSON array
pub struct JsonFormatter<W: Write> {
    writer: W,
    sentences: Vec<SentenceData>,
}

/// Data structure for JSON output
#[derive(Debug, Serialize, Deserialize)]
pub struct SentenceData {
    /// Index in the canonical sentence list
    pub index: usize,
    /// The sentence text
    pub text: String,
    /// Character offset in the raw content, when located
    pub offset: Option<usize>,
    /// Length of the sentence in characters
    pub length: usize,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            sentences: Vec::new(),
        }
    }
}

impl<W: Write> SentenceFormatter for JsonFormatter<W> {
    fn format_sentence(&mut self, record: &SentenceRecord<'_>) -> Result<()> {
        self.sentences.push(SentenceData {
            index: record.index,
            text: record.text.to_string(),
            offset: record.offset,
            length: record.text.chars().count(),
        });
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, &self.sentences)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
