//! WEBVTT cue track: encoder, renderer and parser.
//!
//! The wire format is the plainest possible WEBVTT profile: a `WEBVTT`
//! header line, one blank line, then cue blocks separated by blank lines.
//! Each block is a `HH:MM:SS.mmm --> HH:MM:SS.mmm` timing line followed by
//! the payload text (JSON in the recording path). No cue identifiers, no
//! settings, no styling.
//!
//! Encoding and playback deliberately use different payload shapes
//! ([`RecordingPayload`] vs [`PlaybackPayload`]); see DESIGN.md.

mod payload;

use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::clock::{format_elapsed, parse_timestamp};
use crate::session::Sample;

pub use payload::{PlaybackPayload, RecordingPayload};

/// Magic line opening every track.
pub const HEADER: &str = "WEBVTT";

/// Errors produced while parsing a track off disk or out of a string.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("not a WEBVTT track (missing header line)")]
    MissingHeader,

    #[error("line {line}: malformed cue timing: {text:?}")]
    BadTiming { line: usize, text: String },

    #[error("line {line}: cue block has no payload")]
    MissingPayload { line: usize },

    #[error("failed to read track: {0}")]
    Io(#[from] std::io::Error),
}

/// One timed-text unit: a half-open `[start, end)` interval plus an opaque
/// text payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cue {
    pub start_ms: u64,
    pub end_ms: u64,
    /// Payload text, verbatim. Multi-line payloads keep their newlines.
    pub text: String,
}

impl Cue {
    /// Cue start in seconds, as media clocks expose it.
    pub fn start_secs(&self) -> f64 {
        self.start_ms as f64 / 1_000.0
    }
}

/// An ordered sequence of cues plus the render/parse logic around it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CueTrack {
    pub cues: Vec<Cue>,
}

impl CueTrack {
    pub fn new(cues: Vec<Cue>) -> Self {
        Self { cues }
    }

    /// Parse a track from a file path.
    pub fn parse<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file =
            fs::File::open(path).with_context(|| format!("Failed to open track: {:?}", path))?;
        Ok(Self::parse_reader(BufReader::new(file))?)
    }

    /// Parse a track from a string.
    pub fn parse_str(content: &str) -> Result<Self, ParseError> {
        Self::parse_reader(BufReader::new(content.as_bytes()))
    }

    /// Parse a track from any buffered reader.
    pub fn parse_reader<R: BufRead>(reader: R) -> Result<Self, ParseError> {
        let mut lines = reader.lines();

        let header = match lines.next() {
            Some(line) => line?,
            None => return Err(ParseError::MissingHeader),
        };
        if header.trim_end() != HEADER {
            return Err(ParseError::MissingHeader);
        }

        let mut cues = Vec::new();
        let mut block: Vec<String> = Vec::new();
        let mut block_start_line = 0;
        let mut line_no = 1;

        for line in lines {
            let line = line?;
            line_no += 1;
            if line.trim().is_empty() {
                if !block.is_empty() {
                    cues.push(parse_block(&block, block_start_line)?);
                    block.clear();
                }
            } else {
                if block.is_empty() {
                    block_start_line = line_no;
                }
                block.push(line);
            }
        }
        if !block.is_empty() {
            cues.push(parse_block(&block, block_start_line)?);
        }

        Ok(Self { cues })
    }

    /// Render the whole track into wire-format text.
    pub fn render(&self) -> String {
        let mut out = String::from("WEBVTT\n\n");
        for cue in &self.cues {
            out.push_str(&format!(
                "{} --> {}\n{}\n\n",
                format_elapsed(cue.start_ms),
                format_elapsed(cue.end_ms),
                cue.text,
            ));
        }
        out
    }

    /// Write the rendered track to a file path.
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let mut file = fs::File::create(path)
            .with_context(|| format!("Failed to create track: {:?}", path))?;
        self.write_to(&mut file)
    }

    /// Write the rendered track to any writer.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(self.render().as_bytes())?;
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cues.len()
    }
}

fn parse_block(block: &[String], start_line: usize) -> Result<Cue, ParseError> {
    let timing = &block[0];
    let (start_ms, end_ms) = parse_timing(timing).ok_or_else(|| ParseError::BadTiming {
        line: start_line,
        text: timing.clone(),
    })?;

    if block.len() < 2 {
        return Err(ParseError::MissingPayload { line: start_line });
    }
    let text = block[1..].join("\n");

    Ok(Cue {
        start_ms,
        end_ms,
        text,
    })
}

fn parse_timing(line: &str) -> Option<(u64, u64)> {
    let (start, end) = line.split_once("-->")?;
    let start_ms = parse_timestamp(start.trim())?;
    let end_ms = parse_timestamp(end.trim())?;
    Some((start_ms, end_ms))
}

/// Encode an ordered sample sequence into a cue track.
///
/// Each sample opens a cue at its own offset; the cue closes where the next
/// sample begins, or at `total_ms` for the last one. Payloads are the JSON
/// [`RecordingPayload`] of the full sample. Degenerate intervals (tied
/// offsets, or a `total_ms` at or before the last offset) are emitted
/// verbatim; the encoder never merges, drops or perturbs timestamps.
pub fn encode_samples(samples: &[Sample], total_ms: u64) -> CueTrack {
    let mut cues = Vec::with_capacity(samples.len());
    for (i, sample) in samples.iter().enumerate() {
        let end_ms = samples
            .get(i + 1)
            .map(|next| next.offset_ms)
            .unwrap_or(total_ms);
        let payload = RecordingPayload::from(sample);
        cues.push(Cue {
            start_ms: sample.offset_ms,
            end_ms,
            text: payload.to_json(),
        });
    }
    CueTrack { cues }
}
