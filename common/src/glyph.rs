//! Run-length glyph tables for the firmware's reversed charset.
//!
//! A glyph sheet is an 8 pixel tall strip. Every non-empty column becomes one
//! byte, and empty columns split the strip into glyphs. `offsets` holds the
//! byte index where each glyph starts, followed by the total byte count.

use crate::{
    bitmap::Bitmap,
    column::{COLUMN_HEIGHT, pack_column},
    error::{Axis, Error, Result},
};
use itertools::Itertools;

pub const CHARMAP_LEN: usize = 256;

// The lowest row is cleared on every emitted column.
const COLUMN_MASK: u8 = 0xFE;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlyphTable {
    pub bytes: Vec<u8>,
    pub offsets: Vec<usize>,
    pub charmap: [i32; CHARMAP_LEN],
    charset_len: usize,
}

impl GlyphTable {
    pub fn glyph_count(&self) -> usize {
        self.offsets.len().saturating_sub(1)
    }

    /// Whether the charset has exactly one byte per glyph run.
    pub fn glyph_count_matches(&self) -> bool {
        self.charset_len == self.glyph_count()
    }

    /// Formats the three tables as brace-delimited C array initializers,
    /// one per line: packed bytes (hex), offsets, charmap.
    pub fn render_literals(&self) -> String {
        let bytes = self
            .bytes
            .iter()
            .format_with(", ", |byte, f| f(&format_args!("0x{byte:x}")));
        let offsets = self.offsets.iter().format(", ");
        let charmap = self.charmap.iter().format(", ");

        format!("{{ {bytes} }}\n{{ {offsets} }}\n{{ {charmap} }}\n")
    }
}

/// Position of `code` in the already reversed charset, or -1.
pub fn find_in_reversed(reversed: &[u8], code: u8) -> i32 {
    reversed
        .iter()
        .position(|candidate| *candidate == code)
        .and_then(|index| i32::try_from(index).ok())
        .unwrap_or(-1)
}

/// Builds the byte → glyph index table. Indices count from the *end* of
/// `charset`, because the firmware stores the glyphs of the rotated sheet.
///
/// The firmware looks strings up one byte at a time, so a multi-byte UTF-8
/// character takes one table slot per byte.
pub fn build_charmap(charset: &[u8]) -> [i32; CHARMAP_LEN] {
    let reversed: Vec<u8> = charset.iter().rev().copied().collect();

    std::array::from_fn(|code| find_in_reversed(&reversed, code as u8))
}

/// Encodes a glyph sheet that is already thresholded and rotated into place.
pub fn encode(bitmap: &Bitmap, charset: &[u8]) -> Result<GlyphTable> {
    if bitmap.height() != COLUMN_HEIGHT {
        return Err(Error::Dimension {
            axis: Axis::Height,
            expected: COLUMN_HEIGHT,
            actual: bitmap.height(),
        });
    }

    let mut bytes = Vec::new();
    let mut offsets = vec![0];

    for x in 0..bitmap.width() {
        let byte = pack_column(bitmap.column(x, 0));

        if byte == 0 {
            if offsets.last() != Some(&bytes.len()) {
                offsets.push(bytes.len());
            }
        } else {
            bytes.push(byte & COLUMN_MASK);
        }
    }

    if offsets.last() != Some(&bytes.len()) {
        offsets.push(bytes.len());
    }

    Ok(GlyphTable {
        bytes,
        offsets,
        charmap: build_charmap(charset),
        charset_len: charset.len(),
    })
}
