//! Byte <-> map color remapping.
//!
//! Map color indices are signed bytes. A raw byte `v` is stored as `v` when
//! `v < 128` and as `v - 256` otherwise, which is exactly the two's
//! complement reinterpretation of the same bits.

#[inline]
pub fn byte_to_color(b: u8) -> i8 {
    b as i8
}

#[inline]
pub fn color_to_byte(c: i8) -> u8 {
    c as u8
}

/// Zero-pad `bytes` to `chunk_size`, drop anything past it, and remap.
pub fn encode_chunk(bytes: &[u8], chunk_size: usize) -> Vec<i8> {
    let mut colors = Vec::with_capacity(chunk_size);
    colors.extend(bytes.iter().take(chunk_size).map(|&b| byte_to_color(b)));
    colors.resize(chunk_size, 0);
    colors
}

pub fn decode_chunk(colors: &[i8]) -> Vec<u8> {
    colors.iter().map(|&c| color_to_byte(c)).collect()
}
