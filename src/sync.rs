//! Cue track synchronization for the playback path.
//!
//! [`SlideSync`] consumes an already-parsed cue track plus the stream of
//! "active cue changed" notifications a media clock fires as it crosses cue
//! boundaries, and maintains the single authoritative active slide. It also
//! answers the reverse question: which position should the media clock seek
//! to for a slide picked from the choice list.

use tracing::debug;

use crate::vtt::{Cue, CueTrack, PlaybackPayload};

/// External media clock collaborator.
///
/// The engine never drives the clock itself; hosts wire this to whatever
/// is actually playing (tests use a synthetic implementation).
pub trait MediaClock {
    /// Current playback position in milliseconds.
    fn position_ms(&self) -> u64;
    /// Jump playback to the given position.
    fn seek_ms(&mut self, ms: u64);
    /// Set the playback-rate multiplier (1.0 = realtime).
    fn set_rate(&mut self, rate: f64);
}

/// Failure to decode a cue payload during playback.
///
/// The synchronizer never lets this escape as a panic; the active-slide
/// view stays untouched and the caller decides what to log.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("cue payload is not a valid playback object: {0}")]
    Payload(#[from] serde_json::Error),
}

/// The slide currently judged active. Replaced wholesale on every change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveSlide {
    pub start_ms: u64,
    pub title: String,
    /// Rendered slide HTML for the content region.
    pub html: String,
}

/// One entry of the cue choice list, built once from the full track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CueOption {
    /// Display label, `"{title}: {start_secs}s"`.
    pub label: String,
    /// Seek target for this choice.
    pub start_ms: u64,
}

type ChangeHandler = Box<dyn FnMut(&ActiveSlide)>;

/// Maps cue-change notifications to the single active slide and slide
/// choices back to seek targets.
#[derive(Default)]
pub struct SlideSync {
    options: Vec<CueOption>,
    current: Option<ActiveSlide>,
    change_handler: Option<ChangeHandler>,
}

impl SlideSync {
    /// Build the synchronizer and its choice list from a full cue track.
    ///
    /// Cues whose payload does not decode still get an entry (with a
    /// placeholder label) so every cue stays seekable.
    pub fn new(track: &CueTrack) -> Self {
        let options = track
            .cues
            .iter()
            .map(|cue| {
                let title = match PlaybackPayload::from_json(&cue.text) {
                    Ok(payload) => payload.title,
                    Err(err) => {
                        debug!(start_ms = cue.start_ms, %err, "cue payload undecodable, using placeholder label");
                        "(untitled)".to_string()
                    }
                };
                CueOption {
                    label: format!("{}: {}s", title, cue.start_secs()),
                    start_ms: cue.start_ms,
                }
            })
            .collect();

        Self {
            options,
            current: None,
            change_handler: None,
        }
    }

    /// The choice list, in track order.
    pub fn options(&self) -> &[CueOption] {
        &self.options
    }

    /// The slide judged active at the latest notification, if any yet.
    pub fn current(&self) -> Option<&ActiveSlide> {
        self.current.as_ref()
    }

    /// Register a handler invoked whenever the active slide changes.
    pub fn on_change(&mut self, handler: impl FnMut(&ActiveSlide) + 'static) {
        self.change_handler = Some(Box::new(handler));
    }

    /// Process one "active cue changed" notification.
    ///
    /// `active` is the provider's current active-cue set in its native
    /// order. An empty set leaves the current slide untouched (spurious
    /// empty notifications are ignored, not treated as "no slide"). When
    /// several cues are active at once the first reported wins. A payload
    /// that fails to decode is surfaced as [`DecodeError`] without
    /// disturbing the current slide.
    pub fn on_cue_change(&mut self, active: &[Cue]) -> Result<(), DecodeError> {
        let Some(cue) = active.first() else {
            debug!("empty active-cue notification ignored");
            return Ok(());
        };

        let payload = PlaybackPayload::from_json(&cue.text)?;
        let slide = ActiveSlide {
            start_ms: cue.start_ms,
            title: payload.title,
            html: payload.data,
        };
        if let Some(handler) = self.change_handler.as_mut() {
            handler(&slide);
        }
        self.current = Some(slide);
        Ok(())
    }

    /// Reverse lookup: the seek target for a choice-list label.
    ///
    /// Only labels originally produced by this synchronizer resolve; a
    /// stale or unknown label yields `None`.
    pub fn seek_target(&self, label: &str) -> Option<u64> {
        self.options
            .iter()
            .find(|option| option.label == label)
            .map(|option| option.start_ms)
    }

    /// Resolve a label and drive the media clock there in one step.
    pub fn seek_to(&self, label: &str, clock: &mut dyn MediaClock) -> Option<u64> {
        let target = self.seek_target(label)?;
        clock.seek_ms(target);
        Some(target)
    }
}
