//! Segment command implementation

use crate::input::TextReader;
use crate::output::{JsonFormatter, SentenceFormatter, SentenceRecord, TextFormatter};
use anyhow::Result;
use clap::Args;
use jiedu_core::{segment, text};
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

/// Arguments for the segment command
#[derive(Debug, Args)]
pub struct SegmentArgs {
    /// Input files (use `-` for stdin)
    #[arg(short, long, value_name = "FILE", required = true)]
    pub input: Vec<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Suppress log output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Supported output formats
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text, one sentence per line
    Text,
    /// JSON array of sentence records
    Json,
}

/// A segmented sentence together with its location in the source text.
#[derive(Debug, Clone)]
pub struct LocatedSentence {
    /// Index in the canonical sentence list.
    pub index: usize,
    /// The sentence text.
    pub text: String,
    /// Character offset in the raw content, when located.
    pub offset: Option<usize>,
}

impl SegmentArgs {
    /// Execute the segment command
    pub fn execute(&self) -> Result<()> {
        super::init_logging(self.verbose, self.quiet);

        let writer: Box<dyn Write> = match &self.output {
            Some(path) => Box::new(File::create(path)?),
            None => Box::new(io::stdout()),
        };
        let mut formatter: Box<dyn SentenceFormatter> = match self.format {
            OutputFormat::Text => Box::new(TextFormatter::new(writer)),
            OutputFormat::Json => Box::new(JsonFormatter::new(writer)),
        };

        for path in &self.input {
            log::info!("segmenting {}", path.display());
            let raw = TextReader::read(path)?;
            for located in locate_sentences(&raw) {
                formatter.format_sentence(&SentenceRecord {
                    index: located.index,
                    text: &located.text,
                    offset: located.offset,
                })?;
            }
        }
        formatter.finish()?;
        Ok(())
    }
}

/// Segment raw text and locate each sentence by forward accumulation.
///
/// Each search starts where the previous sentence ended, so duplicate
/// sentences map to successive occurrences.
pub fn locate_sentences(raw: &str) -> Vec<LocatedSentence> {
    let sentences = segment(raw);
    let mut located = Vec::with_capacity(sentences.len());
    let mut position = 0;
    for (index, text) in sentences.into_iter().enumerate() {
        let offset = text::find_from(raw, &text, position);
        if let Some(found) = offset {
            position = found + text::char_len(&text);
        }
        located.push(LocatedSentence {
            index,
            text,
            offset,
        });
    }
    located
}
