//! Recording session state machine.
//!
//! A `RecordingSession` owns the recording/paused/idle lifecycle and the
//! elapsed-time accounting across pause/resume cycles. Elapsed time is always
//! derived from a single anchor instant: `pause` freezes an exact snapshot
//! and `resume` re-bases the anchor from it, so no cumulative arithmetic
//! error can build up no matter how many cycles a session goes through.
//!
//! Every transition has an `*_at(now)` form taking an explicit [`Instant`],
//! which is what the tests use to drive the machine with a synthetic clock.
//! The plain forms call `Instant::now()`.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::clock::format_elapsed;

/// How often the host should invoke [`RecordingSession::tick`] while
/// recording, to refresh the human-readable timer display.
pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Lifecycle phase of a recording session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Not recording; elapsed time reads as zero.
    #[default]
    Idle,
    /// Actively recording; elapsed time advances with the clock.
    Recording,
    /// Recording suspended; elapsed time is frozen.
    Paused,
}

/// The externally observable slide state at the moment of a capture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideSnapshot {
    /// Selectable slide index/value, opaque to the session.
    pub slide: String,
    /// Slide title text.
    pub title: String,
    /// Serialized slide markup, passed through verbatim.
    pub content: String,
}

/// One captured slide transition, timestamped against the session timeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    /// Offset from the logical start of the session, in milliseconds.
    /// Non-decreasing across the sample list; ties are legal.
    pub offset_ms: u64,
    pub slide: String,
    pub title: String,
    pub content: String,
}

/// Everything handed to the encoder when a session stops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flush {
    /// Samples in capture order.
    pub samples: Vec<Sample>,
    /// Total elapsed session time at the moment of `stop`.
    pub total_ms: u64,
}

type TickHandler = Box<dyn FnMut(&str)>;

/// Recording state machine with pause/resume drift correction.
///
/// All operations are synchronous and return immediately; the session is
/// meant to live on a single logical thread and be driven from event
/// callbacks. Calls that are illegal in the current phase are ignored
/// rather than raised, since the public control surface (a single toggle
/// button) structurally prevents most of them.
#[derive(Default)]
pub struct RecordingSession {
    phase: Phase,
    start_anchor: Option<Instant>,
    accumulated: Duration,
    samples: Vec<Sample>,
    tick_handler: Option<TickHandler>,
}

impl RecordingSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Register a handler for timer-display ticks.
    ///
    /// The handler receives the current elapsed time already formatted as
    /// `HH:MM:SS.mmm`. Ticks only fire while recording; the scheduling
    /// itself (every [`TICK_INTERVAL`]) is the host's job.
    pub fn on_tick(&mut self, handler: impl FnMut(&str) + 'static) {
        self.tick_handler = Some(Box::new(handler));
    }

    /// Begin a new session. Only legal from `Idle`; ignored otherwise.
    pub fn start(&mut self) {
        self.start_at(Instant::now());
    }

    pub fn start_at(&mut self, now: Instant) {
        if self.phase() != Phase::Idle {
            debug!(phase = ?self.phase(), "start ignored: session already running");
            return;
        }
        self.accumulated = Duration::ZERO;
        self.start_anchor = Some(now);
        self.samples = Vec::new();
        self.phase = Phase::Recording;
        debug!("recording started");
    }

    /// Suspend the session, freezing elapsed time. Only legal from
    /// `Recording`; ignored otherwise.
    pub fn pause(&mut self) {
        self.pause_at(Instant::now());
    }

    pub fn pause_at(&mut self, now: Instant) {
        if self.phase() != Phase::Recording {
            debug!(phase = ?self.phase(), "pause ignored: not recording");
            return;
        }
        // Exact snapshot; this is the value resume re-bases from.
        self.accumulated = self.elapsed_at(now);
        self.phase = Phase::Paused;
        debug!(elapsed_ms = self.accumulated.as_millis() as u64, "recording paused");
    }

    /// Continue a paused session seamlessly. Only legal from `Paused`;
    /// ignored otherwise.
    pub fn resume(&mut self) {
        self.resume_at(Instant::now());
    }

    pub fn resume_at(&mut self, now: Instant) {
        if self.phase() != Phase::Paused {
            debug!(phase = ?self.phase(), "resume ignored: not paused");
            return;
        }
        self.start_anchor = Some(now - self.accumulated);
        self.phase = Phase::Recording;
        debug!("recording resumed");
    }

    /// End the session and flush the captured samples.
    ///
    /// Legal from `Recording` or `Paused`; returns `None` (and does
    /// nothing) from `Idle`. The returned [`Flush`] carries the sample list
    /// and the final elapsed time; the session itself resets to `Idle` with
    /// an empty sample list.
    pub fn stop(&mut self) -> Option<Flush> {
        self.stop_at(Instant::now())
    }

    pub fn stop_at(&mut self, now: Instant) -> Option<Flush> {
        if self.phase() == Phase::Idle {
            debug!("stop ignored: no session in progress");
            return None;
        }
        let total_ms = self.elapsed_at(now).as_millis() as u64;
        self.phase = Phase::Idle;
        self.start_anchor = None;
        self.accumulated = Duration::ZERO;
        let samples = std::mem::take(&mut self.samples);
        debug!(total_ms, samples = samples.len(), "recording stopped");
        Some(Flush { samples, total_ms })
    }

    /// Elapsed session time: live while `Recording`, frozen while `Paused`,
    /// zero while `Idle`.
    pub fn elapsed(&self) -> Duration {
        self.elapsed_at(Instant::now())
    }

    pub fn elapsed_at(&self, now: Instant) -> Duration {
        match self.phase() {
            Phase::Recording => {
                // start_anchor is always set while recording.
                self.start_anchor
                    .map(|anchor| now.saturating_duration_since(anchor))
                    .unwrap_or(Duration::ZERO)
            }
            Phase::Paused => self.accumulated,
            Phase::Idle => Duration::ZERO,
        }
    }

    /// Capture the current slide state as a timestamped sample.
    ///
    /// A deliberate no-op unless the session is actively recording;
    /// captures arriving while `Paused` or `Idle` are silently dropped.
    pub fn capture(&mut self, snapshot: SlideSnapshot) {
        self.capture_at(Instant::now(), snapshot);
    }

    pub fn capture_at(&mut self, now: Instant, snapshot: SlideSnapshot) {
        if self.phase() != Phase::Recording {
            debug!(phase = ?self.phase(), "capture ignored: not recording");
            return;
        }
        let offset_ms = self.elapsed_at(now).as_millis() as u64;
        self.samples.push(Sample {
            offset_ms,
            slide: snapshot.slide,
            title: snapshot.title,
            content: snapshot.content,
        });
    }

    /// Samples captured so far in the current session.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Deliver one timer-display tick to the registered handler.
    ///
    /// Has no effect outside `Recording`, so a paused or stopped session
    /// observably behaves as if its tick had been cancelled. Ticks never
    /// touch recorded data.
    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    pub fn tick_at(&mut self, now: Instant) {
        if self.phase() != Phase::Recording {
            return;
        }
        let elapsed_ms = self.elapsed_at(now).as_millis() as u64;
        if let Some(handler) = self.tick_handler.as_mut() {
            handler(&format_elapsed(elapsed_ms));
        }
    }
}
