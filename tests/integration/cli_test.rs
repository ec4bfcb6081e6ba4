//! CLI-level tests driving the `slidecast` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn slidecast() -> Command {
    Command::cargo_bin("slidecast").unwrap()
}

const SAMPLE_TRACK: &str = "WEBVTT\n\n\
    00:00:00.000 --> 00:00:01.500\n\
    {\"title\":\"Intro\",\"data\":\"<h2>Intro</h2>\"}\n\n\
    00:00:01.500 --> 00:00:03.000\n\
    {\"title\":\"End\",\"data\":\"<h2>End</h2>\"}\n\n";

#[test]
fn help_lists_subcommands() {
    slidecast()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("record"))
        .stdout(predicate::str::contains("convert"))
        .stdout(predicate::str::contains("cues"));
}

#[test]
fn cues_lists_boundaries_and_titles() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("talk.vtt");
    std::fs::write(&path, SAMPLE_TRACK).unwrap();

    slidecast()
        .arg("cues")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("00:00:00.000 --> 00:00:01.500  Intro"))
        .stdout(predicate::str::contains("00:00:01.500 --> 00:00:03.000  End"))
        .stdout(predicate::str::contains("2 cues, ends at 00:00:03.000"));
}

#[test]
fn cues_fails_cleanly_on_missing_file() {
    slidecast()
        .arg("cues")
        .arg("/nonexistent/talk.vtt")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to open track"));
}

#[test]
fn convert_turns_a_capture_log_into_a_track() {
    let dir = TempDir::new().unwrap();
    let log = dir.path().join("recording.json");
    std::fs::write(
        &log,
        r#"[{"time":1500,"slide":"1","title":"Intro","content":"<h2>Intro</h2>"}]"#,
    )
    .unwrap();

    let out = dir.path().join("recording.vtt");
    slidecast()
        .arg("convert")
        .arg(&log)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 1 cues"));

    let rendered = std::fs::read_to_string(&out).unwrap();
    assert!(rendered.starts_with("WEBVTT\n\n"));
    assert!(rendered.contains("00:00:00.000 --> 00:00:01.500"));
    assert!(rendered.contains("\"data\":\"<h2>Intro</h2>\""));
}

#[test]
fn convert_rejects_unknown_extensions() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, "hello").unwrap();

    slidecast()
        .arg("convert")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported input type"));
}

#[test]
fn record_session_exports_a_track() {
    let dir = TempDir::new().unwrap();

    slidecast()
        .arg("record")
        .arg("--output-dir")
        .arg(dir.path())
        .write_stdin("toggle\nslide 1 Intro\nslide 2 Demo\nstop\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("recording"))
        .stdout(predicate::str::contains("exported 2 cues"));

    let exported: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect();
    assert_eq!(exported.len(), 1);

    let rendered = std::fs::read_to_string(&exported[0]).unwrap();
    assert!(rendered.starts_with("WEBVTT\n\n"));
    assert!(rendered.contains("\"slide\":\"1\""));
    assert!(rendered.contains("\"title\":\"Demo\""));
}

#[test]
fn record_ignores_captures_while_idle() {
    let dir = TempDir::new().unwrap();

    slidecast()
        .arg("record")
        .arg("--output-dir")
        .arg(dir.path())
        .write_stdin("slide 1 Intro\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("not recording, capture ignored"));

    // Nothing recorded, nothing exported.
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}
