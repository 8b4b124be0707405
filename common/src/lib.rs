pub mod bitmap;
pub mod column;
pub mod error;
pub mod frame;
pub mod glyph;
pub mod tone;

pub use self::{
    bitmap::{Bitmap, Grayscale},
    error::{Axis, Error, Result},
    glyph::GlyphTable,
    tone::{NoteEvent, Tone},
};
