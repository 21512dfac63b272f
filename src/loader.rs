//! File loading
//!
//! Reads a whole file into memory and hands it to the parser with a
//! `file:` source identifier.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use thiserror::Error;

use crate::dom::Document;
use crate::error::ParseError;

/// Errors raised while loading a file.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be opened or its size could not be read.
    #[error("{path}: file not found: {error}")]
    Stat {
        /// Path as given.
        path: String,
        /// Underlying error.
        error: io::Error,
    },

    /// Reading the contents failed.
    #[error("{path}: read error: {error}")]
    Read {
        /// Path as given.
        path: String,
        /// Underlying error.
        error: io::Error,
    },

    /// Fewer bytes were read than the file size reported.
    #[error("{path}: expected ({expected}) found ({found})")]
    ShortRead {
        /// Path as given.
        path: String,
        /// Size from the file metadata.
        expected: u64,
        /// Bytes actually read.
        found: u64,
    },

    /// The contents did not parse.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl LoadError {
    /// Stable snake_case tag for this error.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::Stat { .. } => "stat",
            Self::Read { .. } => "read",
            Self::ShortRead { .. } => "short_read",
            Self::Parse(err) => err.reason(),
        }
    }
}

/// A file read fully into memory
#[derive(Debug, Clone)]
pub struct Loaded {
    /// Source identifier, `file:` followed by the path
    pub source: String,
    /// File contents
    pub content: Vec<u8>,
}

impl Loaded {
    /// Read the whole file at `path`
    pub fn read(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let display = path.display().to_string();

        let stat = |error| LoadError::Stat {
            path: display.clone(),
            error,
        };
        let file = File::open(path).map_err(stat)?;
        let expected = file.metadata().map_err(stat)?.len();

        let mut content = Vec::with_capacity(expected as usize);
        file.take(expected)
            .read_to_end(&mut content)
            .map_err(|error| LoadError::Read {
                path: display.clone(),
                error,
            })?;

        let found = content.len() as u64;
        if found != expected {
            return Err(LoadError::ShortRead {
                path: display,
                expected,
                found,
            });
        }

        log::debug!("read {} bytes from {}", found, display);
        Ok(Loaded {
            source: format!("file:{display}"),
            content,
        })
    }

    /// Parse the loaded contents
    pub fn parse(&self) -> Result<Document<'_>, ParseError> {
        Document::parse(&self.source, &self.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_file(name: &str, content: &[u8]) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("tagtree-{}-{}", std::process::id(), name));
        let mut file = File::create(&path).unwrap();
        file.write_all(content).unwrap();
        path
    }

    #[test]
    fn test_read_and_parse() {
        let path = temp_file("ok.xml", b"<note><to>you</to></note>");
        let loaded = Loaded::read(&path).unwrap();
        assert_eq!(loaded.source, format!("file:{}", path.display()));

        let doc = loaded.parse().unwrap();
        let note = doc.root_element().unwrap();
        assert_eq!(doc.name(note), Some("note"));
        assert_eq!(doc.source(), loaded.source);
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_missing_file() {
        let err = Loaded::read("/nonexistent/tagtree/missing.xml").unwrap_err();
        assert!(matches!(err, LoadError::Stat { .. }));
        assert_eq!(err.reason(), "stat");
    }

    #[test]
    fn test_empty_file_fails_to_parse() {
        let path = temp_file("empty.xml", b"");
        let loaded = Loaded::read(&path).unwrap();
        let err = LoadError::from(loaded.parse().unwrap_err());
        assert_eq!(err.reason(), "empty_input");
        std::fs::remove_file(path).unwrap();
    }
}
