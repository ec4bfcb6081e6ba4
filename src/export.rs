//! Delivery of rendered tracks to their destination.
//!
//! The engine itself does no I/O; a stopped session hands its rendered
//! text to an [`ExportSink`]. [`FileSink`] is the stock implementation,
//! writing `.vtt` files into a target directory with sanitized names.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use deunicode::deunicode;
use tracing::info;

/// Extension every exported track carries.
const EXTENSION: &str = ".vtt";

/// Fallback stem when sanitization eats the whole name.
const FALLBACK_STEM: &str = "recording";

/// Characters that are invalid in filenames on common filesystems.
const INVALID_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Accepts rendered wire-format text plus a filename and performs the
/// actual delivery.
pub trait ExportSink {
    fn deliver(&mut self, filename: &str, contents: &str) -> Result<PathBuf>;
}

/// Writes exported tracks into a directory on disk.
#[derive(Debug, Clone)]
pub struct FileSink {
    dir: PathBuf,
}

impl FileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ExportSink for FileSink {
    fn deliver(&mut self, filename: &str, contents: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create export directory: {:?}", self.dir))?;
        let path = self.dir.join(sanitize_filename(filename));
        fs::write(&path, contents)
            .with_context(|| format!("Failed to write track: {:?}", path))?;
        info!(path = %path.display(), bytes = contents.len(), "track exported");
        Ok(path)
    }
}

/// Default export filename: `slides_{date}_{time}.vtt`.
pub fn default_filename() -> String {
    format!(
        "slides_{}{}",
        chrono::Local::now().format("%Y-%m-%d_%H-%M-%S"),
        EXTENSION
    )
}

/// Sanitize a user-supplied name into a filesystem-safe `.vtt` filename.
///
/// Unicode is transliterated to ASCII, whitespace becomes hyphens
/// (collapsed), invalid filesystem characters are dropped, and the `.vtt`
/// extension is appended when missing. An empty result falls back to
/// `recording.vtt`.
pub fn sanitize_filename(name: &str) -> String {
    let stem = name.strip_suffix(EXTENSION).unwrap_or(name);
    let ascii = deunicode(stem);

    let mut result = String::with_capacity(ascii.len());
    let mut last_was_hyphen = false;
    for c in ascii.chars() {
        if c.is_whitespace() || c == '-' {
            if !last_was_hyphen {
                result.push('-');
                last_was_hyphen = true;
            }
        } else if INVALID_CHARS.contains(&c) {
            continue;
        } else if c.is_ascii_alphanumeric() || c == '_' || c == '.' {
            result.push(c);
            last_was_hyphen = false;
        }
    }

    let trimmed = result.trim_matches(|c| c == '-' || c == '.').to_string();
    let stem = if trimmed.is_empty() {
        FALLBACK_STEM.to_string()
    } else {
        trimmed
    };

    format!("{}{}", stem, EXTENSION)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn sanitize_preserves_valid_names() {
        assert_eq!(sanitize_filename("my-session"), "my-session.vtt");
        assert_eq!(sanitize_filename("talk_2024"), "talk_2024.vtt");
    }

    #[test]
    fn sanitize_keeps_existing_extension() {
        assert_eq!(sanitize_filename("talk.vtt"), "talk.vtt");
    }

    #[test]
    fn sanitize_replaces_spaces_with_dashes() {
        assert_eq!(sanitize_filename("my talk  today"), "my-talk-today.vtt");
    }

    #[test]
    fn sanitize_strips_invalid_chars() {
        assert_eq!(sanitize_filename("a/b\\c:d"), "abcd.vtt");
    }

    #[test]
    fn sanitize_transliterates_unicode() {
        assert_eq!(sanitize_filename("café"), "cafe.vtt");
    }

    #[test]
    fn sanitize_falls_back_when_empty() {
        assert_eq!(sanitize_filename(""), "recording.vtt");
        assert_eq!(sanitize_filename("///"), "recording.vtt");
    }

    #[test]
    fn default_filename_is_vtt() {
        let name = default_filename();
        assert!(name.starts_with("slides_"));
        assert!(name.ends_with(".vtt"));
    }

    #[test]
    fn file_sink_writes_into_directory() {
        let dir = TempDir::new().unwrap();
        let mut sink = FileSink::new(dir.path());

        let path = sink.deliver("demo talk.vtt", "WEBVTT\n\n").unwrap();
        assert_eq!(path.file_name().unwrap(), "demo-talk.vtt");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "WEBVTT\n\n");
    }

    #[test]
    fn file_sink_creates_missing_directories() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        let mut sink = FileSink::new(&nested);

        let path = sink.deliver("x.vtt", "WEBVTT\n\n").unwrap();
        assert!(path.exists());
        assert!(path.starts_with(&nested));
    }
}
