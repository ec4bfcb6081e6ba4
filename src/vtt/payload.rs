//! Cue payload shapes.
//!
//! The recording path serializes the full captured sample
//! (`{time, slide, title, content}`); the playback path consumes the
//! simpler `{title, data}` shape. The two are intentionally not unified:
//! a recorded track needs a translation step before it can feed the
//! playback path, and papering over that here would hide the mismatch.

use serde::{Deserialize, Serialize};

use crate::session::Sample;

/// Encode-side payload: the full sample, one JSON object per cue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordingPayload {
    /// Capture offset in milliseconds.
    pub time: u64,
    pub slide: String,
    pub title: String,
    pub content: String,
}

impl RecordingPayload {
    pub fn to_json(&self) -> String {
        // Serializing a plain string/number struct cannot fail.
        serde_json::to_string(self).unwrap()
    }
}

impl From<&Sample> for RecordingPayload {
    fn from(sample: &Sample) -> Self {
        Self {
            time: sample.offset_ms,
            slide: sample.slide.clone(),
            title: sample.title.clone(),
            content: sample.content.clone(),
        }
    }
}

/// Decode-side payload consumed by the playback path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackPayload {
    /// Human-readable label source for the cue choice list.
    pub title: String,
    /// Rendered slide HTML.
    pub data: String,
}

impl PlaybackPayload {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}
