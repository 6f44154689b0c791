//! Packed RGBA2222 pixel format.
//!
//! One byte per pixel, four 2-bit channels:
//!
//! ```text
//! bit  7 6 | 5 4 | 3 2 | 1 0
//!      a   | b   | g   | r
//! ```
//!
//! Each 2-bit value expands to 8 bits through [`CHANNEL_LEVELS`].

/// 8-bit intensity for each 2-bit channel value.
pub const CHANNEL_LEVELS: [u8; 4] = [0, 85, 170, 255];

/// Clear color of the color plane: every channel zero, fully transparent.
pub const TRANSPARENT: u8 = 0x00;

/// Packs four 2-bit channel values. Higher bits of each argument are ignored.
#[inline]
pub const fn pack(r: u8, g: u8, b: u8, a: u8) -> u8 {
    (r & 0b11) | (g & 0b11) << 2 | (b & 0b11) << 4 | (a & 0b11) << 6
}

/// Splits a packed pixel into its 2-bit `[r, g, b, a]` values.
#[inline]
pub const fn channels(pixel: u8) -> [u8; 4] {
    [
        pixel & 0b11,
        (pixel >> 2) & 0b11,
        (pixel >> 4) & 0b11,
        (pixel >> 6) & 0b11,
    ]
}

/// Decodes a packed pixel to 8-bit `[r, g, b, a]`.
#[inline]
pub fn decode(pixel: u8) -> [u8; 4] {
    channels(pixel).map(|c| CHANNEL_LEVELS[c as usize])
}

/// Decodes a packed pixel to a `0xAARRGGBB` value for display surfaces.
#[inline]
pub fn to_argb8888(pixel: u8) -> u32 {
    let [r, g, b, a] = decode(pixel);
    (a as u32) << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32
}
