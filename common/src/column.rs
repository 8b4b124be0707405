pub const COLUMN_HEIGHT: usize = 8;

/// Packs 8 vertically stacked pixels, bit `i` set when row `i` is dark.
#[inline]
pub fn pack_column(pixels: [bool; COLUMN_HEIGHT]) -> u8 {
    pixels
        .iter()
        .enumerate()
        .fold(0, |byte, (i, &dark)| byte | (u8::from(dark) << i))
}

/// Expands a packed byte into 8 luma values, top to bottom.
///
/// NOTE: a set bit becomes 0xFF (light), the opposite of what `pack_column`
/// means by it. Frames do not survive an encode/decode round trip without an
/// inversion; nobody has confirmed which side the display agrees with.
#[inline]
pub fn unpack_column(byte: u8) -> [u8; COLUMN_HEIGHT] {
    std::array::from_fn(|i| if byte & (1 << i) != 0 { 0xFF } else { 0x00 })
}
