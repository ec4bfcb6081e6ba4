//! `slidecast convert`: translate recordings into playback tracks.
//!
//! Recorded payloads carry `{time, slide, title, content}` while the
//! playback path consumes `{title, data}`; this command is the translation
//! step between the two. It accepts either a raw JSON capture log (an array
//! of recording payloads, optionally prefixed with the legacy `slidedata=`
//! header) or a recorded `.vtt` track.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde_json::json;

use slidecast::vtt::{Cue, CueTrack, RecordingPayload};

/// Legacy prefix found on capture logs saved straight out of the browser.
const LOG_PREFIX: &str = "slidedata=";

pub fn handle(input: &Path, output: Option<&Path>) -> Result<()> {
    let track = match input.extension().and_then(|ext| ext.to_str()) {
        Some("json") => convert_log(&read_input(input)?)?,
        Some("vtt") => convert_track(&read_input(input)?)?,
        _ => bail!("Unsupported input type: {:?} (expected .json or .vtt)", input),
    };

    let output = output
        .map(PathBuf::from)
        .unwrap_or_else(|| input.with_extension("vtt"));
    if output == input {
        bail!("Refusing to overwrite the input file; pass --output");
    }
    track.write(&output)?;
    println!("Wrote {} cues to {}", track.len(), output.display());
    Ok(())
}

fn read_input(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read input: {:?}", path))
}

/// Convert a JSON capture log into a playback track.
///
/// Each entry's `time` (milliseconds) closes the cue that shows it: entry
/// `i` is displayed over `[time[i-1], time[i])`, with the first cue opening
/// at zero. This matches the original log converter, which treated capture
/// times as transition points rather than cue starts.
fn convert_log(raw: &str) -> Result<CueTrack> {
    let raw = raw.trim_start();
    let raw = raw.strip_prefix(LOG_PREFIX).unwrap_or(raw);

    let entries: Vec<RecordingPayload> =
        serde_json::from_str(raw).context("Capture log is not an array of recording payloads")?;

    let mut cues = Vec::with_capacity(entries.len());
    let mut prev_ms = 0;
    for entry in &entries {
        cues.push(Cue {
            start_ms: prev_ms,
            end_ms: entry.time,
            text: playback_text(entry),
        });
        prev_ms = entry.time;
    }
    Ok(CueTrack::new(cues))
}

/// Convert a recorded track in place: boundaries survive unchanged, each
/// payload is reshaped from the recording form to the playback form.
fn convert_track(raw: &str) -> Result<CueTrack> {
    let track = CueTrack::parse_str(raw)?;

    let mut cues = Vec::with_capacity(track.len());
    for cue in &track.cues {
        let payload: RecordingPayload = serde_json::from_str(&cue.text).with_context(|| {
            format!(
                "Cue at {}ms does not carry a recording payload",
                cue.start_ms
            )
        })?;
        cues.push(Cue {
            start_ms: cue.start_ms,
            end_ms: cue.end_ms,
            text: playback_text(&payload),
        });
    }
    Ok(CueTrack::new(cues))
}

fn playback_text(entry: &RecordingPayload) -> String {
    json!({
        "slide": entry.slide,
        "title": entry.title,
        "data": entry.content,
    })
    .to_string()
}
