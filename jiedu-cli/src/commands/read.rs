//! Interactive reading command

use crate::input::TextReader;
use anyhow::Result;
use clap::Args;
use jiedu_client::{AnalysisState, HttpBackend, ScriptType, SentenceAnalysis, Session};
use jiedu_core::{highlight, text};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Arguments for the read command
#[derive(Debug, Args)]
pub struct ReadArgs {
    /// Text file to read (use `-` for stdin)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Base URL of the analysis server
    #[arg(
        long,
        value_name = "URL",
        env = "JIEDU_SERVER",
        default_value = "http://localhost:5000/api"
    )]
    pub server: String,

    /// Suppress log output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl ReadArgs {
    /// Execute the read command
    pub async fn execute(&self) -> Result<()> {
        super::init_logging(self.verbose, self.quiet);

        let raw = TextReader::read(&self.file)?;
        let title = self
            .file
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "stdin".to_string());

        let mut session = Session::new(HttpBackend::new(&self.server));
        session.load_text(&title, &raw).await;

        let stdout = io::stdout();
        let stdin = io::stdin();
        let mut out = stdout.lock();
        print_sentence_list(&mut out, &session)?;
        print_help(&mut out)?;

        let mut line = String::new();
        loop {
            write!(out, "jiedu> ")?;
            out.flush()?;
            line.clear();
            if stdin.lock().read_line(&mut line)? == 0 {
                break;
            }
            match run_command(&mut out, &mut session, line.trim()).await? {
                Flow::Continue => {}
                Flow::Quit => break,
            }
        }
        Ok(())
    }
}

enum Flow {
    Continue,
    Quit,
}

async fn run_command<W: Write>(
    out: &mut W,
    session: &mut Session<HttpBackend>,
    input: &str,
) -> Result<Flow> {
    let (command, rest) = match input.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (input, ""),
    };
    match command {
        "" | "h" | "help" => print_help(out)?,
        "q" | "quit" => return Ok(Flow::Quit),
        "l" | "list" => print_sentence_list(out, session)?,
        "n" | "next" => {
            session.next().await;
            print_current(out, session)?;
        }
        "p" | "prev" => {
            session.prev().await;
            print_current(out, session)?;
        }
        "g" | "go" => match rest.parse::<usize>() {
            Ok(index) => {
                session.select_index(index).await;
                print_current(out, session)?;
            }
            Err(_) => writeln!(out, "usage: g <sentence index>")?,
        },
        "o" | "offset" => match rest.parse::<usize>() {
            Ok(offset) => {
                session.select_at_offset(offset).await;
                print_current(out, session)?;
            }
            Err(_) => writeln!(out, "usage: o <character offset>")?,
        },
        "s" | "select" => {
            if rest.is_empty() {
                writeln!(out, "usage: s <text>")?;
            } else {
                session.select_text(rest).await;
                print_current(out, session)?;
            }
        }
        "t" | "where" => print_highlight(out, session)?,
        "c" | "convert" => {
            let target = match rest {
                "trad" | "traditional" => Some(ScriptType::Traditional),
                "simp" | "simplified" => Some(ScriptType::Simplified),
                _ => None,
            };
            match target {
                Some(script) => {
                    if let Err(err) = session.convert_script(script).await {
                        writeln!(out, "conversion failed: {err}")?;
                    } else {
                        writeln!(out, "converted to {script}")?;
                        print_sentence_list(out, session)?;
                    }
                }
                None => writeln!(out, "usage: c trad|simp")?,
            }
        }
        "a" | "again" => {
            session.reanalyze().await;
            print_current(out, session)?;
        }
        other => writeln!(out, "unknown command: {other} (h for help)")?,
    }
    Ok(Flow::Continue)
}

fn print_help<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, "commands:")?;
    writeln!(out, "  l          list sentences")?;
    writeln!(out, "  n / p      next / previous sentence")?;
    writeln!(out, "  g N        go to sentence N")?;
    writeln!(out, "  o N        select the sentence around character offset N")?;
    writeln!(out, "  s TEXT     analyze free-form text")?;
    writeln!(out, "  t          show the current selection in context")?;
    writeln!(out, "  c trad|simp  convert the document script")?;
    writeln!(out, "  a          re-analyze the current selection")?;
    writeln!(out, "  q          quit")?;
    Ok(())
}

fn print_sentence_list<W: Write>(out: &mut W, session: &Session<HttpBackend>) -> Result<()> {
    let Some(document) = session.document() else {
        writeln!(out, "no document loaded")?;
        return Ok(());
    };
    if let Some(script) = session.script() {
        writeln!(out, "{} ({script}, {} sentences)", document.title, document.sentence_count())?;
    } else {
        writeln!(out, "{} ({} sentences)", document.title, document.sentence_count())?;
    }
    for (index, sentence) in document.sentences().iter().enumerate() {
        let marker = if session.current().canonical_index == Some(index) {
            '>'
        } else {
            ' '
        };
        writeln!(out, "{marker} {index:3}  {sentence}")?;
    }
    Ok(())
}

fn print_current<W: Write>(out: &mut W, session: &Session<HttpBackend>) -> Result<()> {
    let current = session.current();
    if !current.is_resolved() {
        writeln!(out, "nothing selected")?;
        return Ok(());
    }
    match current.canonical_index {
        Some(index) => writeln!(out, "[{index}] {}", current.text)?,
        None => writeln!(out, "[ad hoc] {}", current.text)?,
    }
    match session.state() {
        AnalysisState::Idle => {}
        AnalysisState::Loading => writeln!(out, "analyzing...")?,
        AnalysisState::Failed => {
            writeln!(out, "analysis unavailable; navigation still works")?;
        }
        AnalysisState::Ready(analysis) => print_analysis(out, analysis)?,
    }
    Ok(())
}

fn print_analysis<W: Write>(out: &mut W, analysis: &SentenceAnalysis) -> Result<()> {
    if !analysis.pinyin.trim().is_empty() {
        writeln!(out, "pinyin: {}", analysis.pinyin.trim())?;
    }
    if !analysis.translation.trim().is_empty() {
        writeln!(out, "translation: {}", analysis.translation.trim())?;
    }
    for (_, group) in analysis.groups.content_groups() {
        let pinyin = group.pinyin();
        let translation = analysis.group_translation(group);
        writeln!(out, "  {} [{pinyin}] {translation}", group.text())?;
    }
    Ok(())
}

fn print_highlight<W: Write>(out: &mut W, session: &Session<HttpBackend>) -> Result<()> {
    let Some(document) = session.document() else {
        writeln!(out, "no document loaded")?;
        return Ok(());
    };
    let current = session.current();
    if !current.is_resolved() {
        writeln!(out, "nothing selected")?;
        return Ok(());
    }
    let split = highlight::split_for_highlight(&document.raw_content, current);
    if split.highlighted.is_empty() {
        writeln!(out, "selection not present in the document text")?;
        return Ok(());
    }
    // Show a bounded window around the highlighted span.
    let before = tail_chars(&split.before, 24);
    let after = head_chars(&split.after, 24);
    writeln!(out, "...{before}\u{300c}{}\u{300d}{after}...", split.highlighted)?;
    Ok(())
}

fn tail_chars(s: &str, n: usize) -> String {
    let len = text::char_len(s);
    let start = len.saturating_sub(n);
    text::char_substring(s, start, len - start).unwrap_or_default()
}

fn head_chars(s: &str, n: usize) -> String {
    text::char_substring(s, 0, n.min(text::char_len(s))).unwrap_or_default()
}
