//! Monophonic note events to piezo tone lists.

use crate::error::{Error, Result};
use serde::{Serialize, Serializer, ser::SerializeTuple};
use serde_json::ser::Formatter;
use std::io;

/// Key number of concert A on an 88 key piano.
pub const CONCERT_A_KEY: i32 = 49;
pub const CONCERT_A_HZ: f64 = 440.0;

/// A track event, `delta` being the ticks since the previous event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoteEvent {
    NoteOn { key: u8, delta: u32 },
    NoteOff { key: u8, delta: u32 },
    Other { delta: u32 },
}

/// Frequency in Hz and duration in ticks. A frequency of 0 is a rest.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tone {
    pub frequency: f64,
    pub duration: u32,
}

impl Tone {
    pub fn silence(duration: u32) -> Self {
        Self {
            frequency: 0.0,
            duration,
        }
    }

    pub fn is_silence(&self) -> bool {
        self.frequency == 0.0
    }
}

// `[0, 10]` for rests and `[440.0, 5]` for notes
impl Serialize for Tone {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut tuple = serializer.serialize_tuple(2)?;
        if self.is_silence() {
            tuple.serialize_element(&0_u32)?;
        } else {
            tuple.serialize_element(&self.frequency)?;
        }
        tuple.serialize_element(&self.duration)?;
        tuple.end()
    }
}

pub fn calc_frequency(key: i32) -> f64 {
    2_f64.powf(f64::from(key - CONCERT_A_KEY) / 12.0) * CONCERT_A_HZ
}

struct EventCursor<'a> {
    events: &'a [NoteEvent],
    position: usize,
}

impl EventCursor<'_> {
    fn remaining(&self) -> usize {
        self.events.len() - self.position
    }

    /// Pops events until `select` accepts one. Everything skipped is lost.
    fn next_matching<T>(&mut self, select: impl Fn(&NoteEvent) -> Option<T>) -> Option<T> {
        while let Some(event) = self.events.get(self.position) {
            self.position += 1;
            if let Some(found) = select(event) {
                return Some(found);
            }
        }

        None
    }

    fn next_note_on(&mut self) -> Option<(u8, u32)> {
        self.next_matching(|event| match *event {
            NoteEvent::NoteOn { key, delta } => Some((key, delta)),
            _ => None,
        })
    }

    fn next_note_off(&mut self) -> Option<(u8, u32)> {
        self.next_matching(|event| match *event {
            NoteEvent::NoteOff { key, delta } => Some((key, delta)),
            _ => None,
        })
    }
}

pub fn build_sequence(events: &[NoteEvent]) -> Result<Vec<Tone>> {
    build_sequence_transposed(events, 0)
}

/// Pairs each note on with the next note off, shifting keys by `transpose`
/// semitones before they are turned into frequencies.
///
/// Events between the pair are dropped, including their tick deltas.
pub fn build_sequence_transposed(events: &[NoteEvent], transpose: i32) -> Result<Vec<Tone>> {
    let mut cursor = EventCursor {
        events,
        position: 0,
    };
    let mut tones = Vec::new();

    while cursor.remaining() > 1 {
        let Some((on_key, silence)) = cursor.next_note_on() else {
            break;
        };
        let (off_key, duration) = cursor
            .next_note_off()
            .ok_or(Error::UnterminatedNote { key: on_key })?;

        if on_key != off_key {
            return Err(Error::Polyphony {
                note_on: on_key,
                note_off: off_key,
            });
        }

        if silence > 0 {
            tones.push(Tone::silence(silence));
        }
        tones.push(Tone {
            frequency: calc_frequency(i32::from(on_key) + transpose),
            duration,
        });
    }

    Ok(tones)
}

/// Compact JSON with `", "` between array items, as Python's `json.dumps` writes it.
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }
}

pub fn to_json(tones: &[Tone]) -> serde_json::Result<String> {
    let mut out = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, SpacedFormatter);
    tones.serialize(&mut serializer)?;

    String::from_utf8(out).map_err(serde::ser::Error::custom)
}

/// One `frequency,duration` line per tone, frequency rounded to whole Hz.
pub fn to_lines(tones: &[Tone]) -> String {
    let mut out = String::new();
    let mut num_buf = itoa::Buffer::new();

    for tone in tones {
        // saturates outside the i64 range
        let frequency = tone.frequency.round() as i64;

        out.push_str(num_buf.format(frequency));
        out.push(',');
        out.push_str(num_buf.format(tone.duration));
        out.push('\n');
    }

    out
}
