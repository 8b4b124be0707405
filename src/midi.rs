use lcdkit_common::NoteEvent;
use midly::{MidiMessage, TrackEvent, TrackEventKind};

/// Flattens a track into note events. A note on with velocity 0 is a note off.
pub fn note_events(track: &[TrackEvent<'_>]) -> Vec<NoteEvent> {
    track
        .iter()
        .map(|event| {
            let delta = event.delta.as_int();

            match event.kind {
                TrackEventKind::Midi {
                    message: MidiMessage::NoteOn { key, vel },
                    ..
                } if vel.as_int() > 0 => NoteEvent::NoteOn {
                    key: key.as_int(),
                    delta,
                },
                TrackEventKind::Midi {
                    message: MidiMessage::NoteOn { key, .. } | MidiMessage::NoteOff { key, .. },
                    ..
                } => NoteEvent::NoteOff {
                    key: key.as_int(),
                    delta,
                },
                _ => NoteEvent::Other { delta },
            }
        })
        .collect()
}
