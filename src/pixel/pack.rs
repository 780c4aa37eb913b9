//! Conversions between packed words and expanded lanes, including RGB565.

use crate::pixel::constants::K;
use crate::pixel::lanes::{U16Lanes, U16x4, U16x16};

#[inline(always)]
pub fn unpack(p: u32) -> U16x4 {
    let b = p.to_le_bytes();
    U16Lanes([
        u16::from(b[0]),
        u16::from(b[1]),
        u16::from(b[2]),
        u16::from(b[3]),
    ])
}

/// Saturate every lane to 8 bits and repack.
#[inline(always)]
pub fn pack(e: U16x4) -> u32 {
    let sat = |v: u16| v.min(K.channel_max) as u8;
    u32::from_le_bytes([sat(e.0[0]), sat(e.0[1]), sat(e.0[2]), sat(e.0[3])])
}

#[inline(always)]
pub fn unpack4(p: [u32; 4]) -> U16x16 {
    let mut out = [0u16; 16];
    for (i, px) in p.iter().enumerate() {
        let lanes = unpack(*px);
        out[i * 4..i * 4 + 4].copy_from_slice(&lanes.0);
    }
    U16Lanes(out)
}

#[inline(always)]
pub fn pack4(e: U16x16) -> [u32; 4] {
    [
        pack(e.pixel(0)),
        pack(e.pixel(1)),
        pack(e.pixel(2)),
        pack(e.pixel(3)),
    ]
}

/// Widen a 565 word to `0xffRRGGBB` by replicating the high bits of each field.
#[inline(always)]
pub fn expand565(p: u16) -> u32 {
    let p = u32::from(p);
    let r = (p >> 11) & 0x1f;
    let g = (p >> 5) & 0x3f;
    let b = p & 0x1f;
    let r = (r << 3) | (r >> 2);
    let g = (g << 2) | (g >> 4);
    let b = (b << 3) | (b >> 2);
    K.alpha_mask | (r << 16) | (g << 8) | b
}

/// Truncate `0x??RRGGBB` to 565; alpha is dropped.
#[inline(always)]
pub fn pack565_32(p: u32) -> u16 {
    (((p >> 8) & K.red_565) | ((p >> 5) & K.green_565) | ((p >> 3) & K.blue_565)) as u16
}

/// 565 word to an expanded, opaque pixel.
#[inline(always)]
pub fn unpack565(p: u16) -> U16x4 {
    unpack(expand565(p))
}

/// Expanded pixel to a 565 word, saturating first and then truncating.
#[inline(always)]
pub fn pack565(e: U16x4) -> u16 {
    pack565_32(pack(e))
}

#[inline(always)]
pub fn unpack565x4(p: [u16; 4]) -> U16x16 {
    unpack4([
        expand565(p[0]),
        expand565(p[1]),
        expand565(p[2]),
        expand565(p[3]),
    ])
}

#[inline(always)]
pub fn pack565x4(e: U16x16) -> [u16; 4] {
    let p = pack4(e);
    [
        pack565_32(p[0]),
        pack565_32(p[1]),
        pack565_32(p[2]),
        pack565_32(p[3]),
    ]
}

/// Swap the red and blue bytes of a 32-bit pixel.
#[inline(always)]
pub fn swap_rb(p: u32) -> u32 {
    (p & 0xff00_ff00) | ((p >> 16) & 0xff) | ((p & 0xff) << 16)
}

/// Swap the red and blue fields of a 565 word.
#[inline(always)]
pub fn swap_rb565(p: u16) -> u16 {
    ((p >> 11) & 0x1f) | (p & 0x07e0) | ((p & 0x1f) << 11)
}

#[cfg(test)]
#[path = "../../tests/unit/pixel/pack.rs"]
mod tests;
