//! `slidecast cues`: inspect the cue boundaries of a track.

use std::path::Path;

use anyhow::Result;

use slidecast::clock::format_elapsed;
use slidecast::vtt::{CueTrack, PlaybackPayload, RecordingPayload};

/// Print one line per cue: boundaries plus the best title we can decode.
pub fn handle(file: &Path) -> Result<()> {
    let track = CueTrack::parse(file)?;

    for cue in &track.cues {
        println!(
            "{} --> {}  {}",
            format_elapsed(cue.start_ms),
            format_elapsed(cue.end_ms),
            cue_title(&cue.text),
        );
    }

    let total = track.cues.last().map(|cue| cue.end_ms).unwrap_or(0);
    println!("{} cues, ends at {}", track.len(), format_elapsed(total));
    Ok(())
}

/// Cue payloads come in two shapes; try both before giving up.
fn cue_title(text: &str) -> String {
    if let Ok(payload) = PlaybackPayload::from_json(text) {
        return payload.title;
    }
    if let Ok(payload) = serde_json::from_str::<RecordingPayload>(text) {
        return payload.title;
    }
    "(opaque payload)".to_string()
}
