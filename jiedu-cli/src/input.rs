//! Input reading utilities

use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;
use std::{fs, io};

/// Text reader for files and stdin, with UTF-8 validation.
pub struct TextReader;

impl TextReader {
    /// Read a file as UTF-8 text. The path `-` means stdin.
    pub fn read(path: &Path) -> Result<String> {
        if path.as_os_str() == "-" {
            return Self::read_stdin();
        }
        fs::read_to_string(path).with_context(|| format!("failed to read file: {}", path.display()))
    }

    /// Read stdin to end as UTF-8 text.
    pub fn read_stdin() -> Result<String> {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read stdin")?;
        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn reads_utf8_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("text.txt");
        fs::write(&path, "氣功是史前文化。").unwrap();
        assert_eq!(TextReader::read(&path).unwrap(), "氣功是史前文化。");
    }

    #[test]
    fn missing_file_reports_its_path() {
        let err = TextReader::read(Path::new("/nonexistent/text.txt")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/text.txt"));
    }

    #[test]
    fn empty_file_is_valid() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.txt");
        fs::write(&path, "").unwrap();
        assert_eq!(TextReader::read(&path).unwrap(), "");
    }
}
