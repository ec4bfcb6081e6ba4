//! End-to-end tests over the library: record a session with a synthetic
//! clock, encode it, convert the payload shape, and replay it through the
//! synchronizer.

use std::time::{Duration, Instant};

use slidecast::sync::SlideSync;
use slidecast::vtt::{encode_samples, Cue, CueTrack};
use slidecast::{RecordingSession, SlideSnapshot};

fn snapshot(slide: &str, title: &str) -> SlideSnapshot {
    SlideSnapshot {
        slide: slide.to_string(),
        title: title.to_string(),
        content: format!("<h2>{}</h2>", title),
    }
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

/// Record a three-slide session (with a pause in the middle) and check the
/// produced wire text round-trips into the same boundaries.
#[test]
fn recorded_session_roundtrips_through_wire_format() {
    let t0 = Instant::now();
    let mut session = RecordingSession::new();

    session.start_at(t0);
    session.capture_at(t0, snapshot("1", "Intro"));
    session.capture_at(t0 + ms(2_000), snapshot("2", "Middle"));
    session.pause_at(t0 + ms(3_000));
    session.resume_at(t0 + ms(60_000)); // long pause contributes nothing
    session.capture_at(t0 + ms(61_000), snapshot("3", "End"));
    let flush = session.stop_at(t0 + ms(62_500)).unwrap();

    assert_eq!(flush.total_ms, 5_500);
    let track = encode_samples(&flush.samples, flush.total_ms);
    let rendered = track.render();

    assert!(rendered.starts_with("WEBVTT\n\n"));
    let reparsed = CueTrack::parse_str(&rendered).unwrap();
    let boundaries: Vec<(u64, u64)> = reparsed
        .cues
        .iter()
        .map(|c| (c.start_ms, c.end_ms))
        .collect();
    assert_eq!(
        boundaries,
        vec![(0, 2_000), (2_000, 4_000), (4_000, 5_500)]
    );
}

/// A playback-shaped track drives the synchronizer: choice list, active
/// slide tracking, reverse lookup.
#[test]
fn playback_track_drives_the_synchronizer() {
    let cues = vec![
        Cue {
            start_ms: 0,
            end_ms: 2_000,
            text: r#"{"title":"Intro","data":"<h2>Intro</h2>"}"#.to_string(),
        },
        Cue {
            start_ms: 2_000,
            end_ms: 5_000,
            text: r#"{"title":"Demo","data":"<h2>Demo</h2>"}"#.to_string(),
        },
    ];
    let track = CueTrack::new(cues);
    let mut sync = SlideSync::new(&track);

    assert_eq!(sync.options().len(), 2);
    assert_eq!(sync.options()[1].label, "Demo: 2s");

    sync.on_cue_change(&track.cues[..1]).unwrap();
    assert_eq!(sync.current().unwrap().title, "Intro");

    // Boundary crossing with a momentarily empty set keeps the old slide.
    sync.on_cue_change(&[]).unwrap();
    assert_eq!(sync.current().unwrap().title, "Intro");

    sync.on_cue_change(&track.cues[1..]).unwrap();
    assert_eq!(sync.current().unwrap().html, "<h2>Demo</h2>");

    assert_eq!(sync.seek_target("Demo: 2s"), Some(2_000));
    assert_eq!(sync.seek_target("Demo: 999s"), None);
}

/// The encoder's own output is recording-shaped, so the playback decoder
/// must reject it; the asymmetry is part of the contract.
#[test]
fn recorded_payloads_are_not_playback_payloads() {
    let t0 = Instant::now();
    let mut session = RecordingSession::new();
    session.start_at(t0);
    session.capture_at(t0, snapshot("1", "Intro"));
    let flush = session.stop_at(t0 + ms(1_000)).unwrap();

    let track = encode_samples(&flush.samples, flush.total_ms);
    let mut sync = SlideSync::new(&track);
    assert!(sync.on_cue_change(&track.cues[..1]).is_err());
    assert!(sync.current().is_none());
}
