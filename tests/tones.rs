//! Runs the tone converter against generated midi files.

use midly::{
    Format, Header, MetaMessage, MidiMessage, Smf, Timing, TrackEvent, TrackEventKind,
    num::{u4, u7, u15, u28},
};
use std::{
    path::Path,
    process::{Command, Output},
};
use tempfile::tempdir;

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_lcdkit-tones"))
        .args(args)
        .output()
        .expect("Failed to run lcdkit-tones")
}

fn note(delta: u32, key: u8, on: bool) -> TrackEvent<'static> {
    let message = if on {
        MidiMessage::NoteOn {
            key: u7::new(key),
            vel: u7::new(100),
        }
    } else {
        MidiMessage::NoteOff {
            key: u7::new(key),
            vel: u7::new(0),
        }
    };

    TrackEvent {
        delta: u28::new(delta),
        kind: TrackEventKind::Midi {
            channel: u4::new(0),
            message,
        },
    }
}

fn end_of_track() -> TrackEvent<'static> {
    TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
    }
}

fn write_midi(path: &Path, mut track: Vec<TrackEvent<'static>>) {
    track.push(end_of_track());

    let smf = Smf {
        header: Header::new(Format::SingleTrack, Timing::Metrical(u15::new(96))),
        tracks: vec![track],
    };
    smf.save(path).expect("Failed to write midi file");
}

#[test]
fn writes_json_next_to_input() {
    let dir = tempdir().expect("Failed to create temp dir");
    let midi = dir.path().join("melody.mid");

    write_midi(&midi, vec![
        note(10, 49, true),
        note(5, 49, false),
        note(0, 61, true),
        note(20, 61, false),
    ]);

    let output = run(&[midi.to_str().unwrap()]);
    assert!(output.status.success(), "lcdkit-tones failed: {output:?}");

    let json = std::fs::read_to_string(dir.path().join("melody.json")).unwrap();
    let tones: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(tones, serde_json::json!([[0, 10], [440.0, 5], [880.0, 20]]));
}

#[test]
fn writes_firmware_lines() {
    let dir = tempdir().expect("Failed to create temp dir");
    let midi = dir.path().join("beep.mid");

    write_midi(&midi, vec![note(3, 37, true), note(8, 37, false)]);

    let output = run(&[midi.to_str().unwrap(), "--format", "lines"]);
    assert!(output.status.success(), "lcdkit-tones failed: {output:?}");

    let lines = std::fs::read_to_string(dir.path().join("beep.txt")).unwrap();
    assert_eq!(lines, "0,3\n220,8\n");
}

#[test]
fn transpose_moves_midi_keys_onto_piano_keys() {
    let dir = tempdir().expect("Failed to create temp dir");
    let midi = dir.path().join("a4.mid");

    // midi key 29 shifted by 20 lands on piano key 49
    write_midi(&midi, vec![note(0, 29, true), note(4, 29, false)]);

    let output = run(&[midi.to_str().unwrap(), "--transpose", "20"]);
    assert!(output.status.success(), "lcdkit-tones failed: {output:?}");

    let json = std::fs::read_to_string(dir.path().join("a4.json")).unwrap();
    assert_eq!(json, "[[440.0, 4]]");
}

#[test]
fn polyphony_fails_without_output() {
    let dir = tempdir().expect("Failed to create temp dir");
    let midi = dir.path().join("chord.mid");

    write_midi(&midi, vec![
        note(0, 49, true),
        note(0, 53, true),
        note(5, 53, false),
        note(0, 49, false),
    ]);

    let output = run(&[midi.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(!dir.path().join("chord.json").exists());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("polyphony"), "stderr: {stderr}");
}

#[test]
fn missing_track_is_an_error() {
    let dir = tempdir().expect("Failed to create temp dir");
    let midi = dir.path().join("one.mid");

    write_midi(&midi, vec![note(0, 49, true), note(1, 49, false)]);

    let output = run(&[midi.to_str().unwrap(), "--track", "3"]);
    assert!(!output.status.success());
}

#[test]
fn missing_arguments_exit_with_two() {
    let output = run(&[]);
    assert_eq!(output.status.code(), Some(2));
}
