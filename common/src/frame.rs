//! Full-screen frames for the 128×64 display.
//!
//! A frame is 8 row-bands of 128 packed bytes each, bands top to bottom and
//! columns left to right. There is no header.

use crate::{
    bitmap::{Bitmap, Grayscale},
    column::{COLUMN_HEIGHT, pack_column, unpack_column},
    error::{Axis, Error, Result},
};

pub const FRAME_WIDTH: usize = 128;
pub const FRAME_HEIGHT: usize = 64;
pub const FRAME_BYTES: usize = FRAME_WIDTH * FRAME_HEIGHT / COLUMN_HEIGHT;

pub fn decode(bytes: &[u8]) -> Result<Grayscale> {
    if bytes.len() != FRAME_BYTES {
        return Err(Error::SizeMismatch {
            expected: FRAME_BYTES,
            actual: bytes.len(),
        });
    }

    let mut data = vec![0; FRAME_WIDTH * FRAME_HEIGHT];
    for (band, band_bytes) in bytes.chunks_exact(FRAME_WIDTH).enumerate() {
        for (x, byte) in band_bytes.iter().enumerate() {
            for (i, value) in unpack_column(*byte).into_iter().enumerate() {
                data[(band * COLUMN_HEIGHT + i) * FRAME_WIDTH + x] = value;
            }
        }
    }

    Ok(Grayscale {
        width: FRAME_WIDTH,
        height: FRAME_HEIGHT,
        data,
    })
}

pub fn encode(bitmap: &Bitmap) -> Result<Vec<u8>> {
    // The old converter raised when the size was *right*. Reject mismatches instead.
    if bitmap.width() != FRAME_WIDTH {
        return Err(Error::Dimension {
            axis: Axis::Width,
            expected: FRAME_WIDTH,
            actual: bitmap.width(),
        });
    }
    if bitmap.height() != FRAME_HEIGHT {
        return Err(Error::Dimension {
            axis: Axis::Height,
            expected: FRAME_HEIGHT,
            actual: bitmap.height(),
        });
    }

    let mut bytes = Vec::with_capacity(FRAME_BYTES);
    for band in 0..FRAME_HEIGHT / COLUMN_HEIGHT {
        for x in 0..FRAME_WIDTH {
            bytes.push(pack_column(bitmap.column(x, band)));
        }
    }

    Ok(bytes)
}
