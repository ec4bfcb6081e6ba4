//! `slidecast record`: interactive recording loop driven from stdin.
//!
//! Stands in for the browser control surface: one `toggle` command cycles
//! start/pause/resume like the original single record button, `slide`
//! captures a transition, `stop` flushes and exports.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use tracing::warn;

use slidecast::clock::format_elapsed;
use slidecast::export::{default_filename, ExportSink, FileSink};
use slidecast::session::{Phase, RecordingSession, SlideSnapshot};
use slidecast::vtt::encode_samples;
use slidecast::Config;

const HELP: &str = "\
commands:
  toggle                start, pause or resume the session
  slide <label> <title> capture a slide transition
  time                  show the elapsed session time
  stop                  flush the session and export the track
  quit                  exit (stops and exports a running session first)";

pub fn handle(output_dir: Option<PathBuf>) -> Result<()> {
    let config = Config::load().unwrap_or_else(|err| {
        warn!(%err, "could not load config, using defaults");
        Config::default()
    });
    let dir = output_dir.unwrap_or_else(|| config.output_dir());
    let mut sink = FileSink::new(dir);
    let mut session = RecordingSession::new();

    println!("{}", HELP);
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let mut parts = line.split_whitespace();
        match parts.next() {
            Some("toggle") => toggle(&mut session),
            Some("slide") => {
                let label = parts.next().unwrap_or_default().to_string();
                let title = parts.collect::<Vec<_>>().join(" ");
                if label.is_empty() || title.is_empty() {
                    println!("usage: slide <label> <title>");
                    continue;
                }
                capture(&mut session, label, title);
            }
            Some("time") => {
                println!("{}", format_elapsed(session.elapsed().as_millis() as u64));
            }
            Some("stop") => export(&mut session, &mut sink)?,
            Some("quit") => break,
            Some(other) => println!("unknown command: {} (try one of the list above)", other),
            None => {}
        }
        io::stdout().flush()?;
    }

    // A session still running at EOF is flushed rather than lost.
    export(&mut session, &mut sink)?;
    Ok(())
}

fn toggle(session: &mut RecordingSession) {
    match session.phase() {
        Phase::Idle => {
            session.start();
            println!("recording");
        }
        Phase::Recording => {
            session.pause();
            println!(
                "paused at {}",
                format_elapsed(session.elapsed().as_millis() as u64)
            );
        }
        Phase::Paused => {
            session.resume();
            println!("recording");
        }
    }
}

fn capture(session: &mut RecordingSession, label: String, title: String) {
    let recording = session.phase() == Phase::Recording;
    session.capture(SlideSnapshot {
        slide: label,
        content: format!("<h2>{}</h2>", title),
        title,
    });
    if recording {
        println!("captured slide {}", session.samples().len());
    } else {
        println!("not recording, capture ignored");
    }
}

fn export(session: &mut RecordingSession, sink: &mut FileSink) -> Result<()> {
    let Some(flush) = session.stop() else {
        return Ok(());
    };
    let track = encode_samples(&flush.samples, flush.total_ms);
    let path = sink.deliver(&default_filename(), &track.render())?;
    println!(
        "exported {} cues ({}) to {}",
        track.len(),
        format_elapsed(flush.total_ms),
        path.display()
    );
    Ok(())
}
