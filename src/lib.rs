//! Timeline recording and cue-synchronized playback.
//!
//! Timestamps slide transitions during a live session against a wall-clock
//! timeline, serializes them into a WEBVTT track, and, symmetrically,
//! keeps a slide view synchronized with a playing media stream from a
//! previously authored track.
//!
//! # Architecture
//!
//! - [`clock`]: `HH:MM:SS.mmm` formatting/parsing shared by the timer
//!   display and the wire format
//! - [`session`]: recording state machine with pause/resume drift
//!   correction and sample capture
//! - [`vtt`]: cue encoding, rendering and parsing of the wire format
//! - [`sync`]: active-cue tracking and reverse (label to seek) lookup
//! - [`export`]: delivery of rendered tracks (file sink, filenames)
//! - [`config`]: TOML configuration for the CLI
//!
//! The recording and playback paths share only the wire format; neither
//! calls the other. All core state lives in explicit objects
//! ([`RecordingSession`], [`SlideSync`]) driven synchronously from host
//! event callbacks. No globals, no timers of our own.

pub mod clock;
pub mod config;
pub mod export;
pub mod session;
pub mod sync;
pub mod vtt;

pub use config::Config;
pub use export::{ExportSink, FileSink};
pub use session::{Flush, Phase, RecordingSession, Sample, SlideSnapshot};
pub use sync::{ActiveSlide, MediaClock, SlideSync};
pub use vtt::{encode_samples, Cue, CueTrack};
