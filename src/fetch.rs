//! Scanline fetchers and stores between stored formats and `A8R8G8B8`.

use crate::foundation::core::PixelFormat;
use crate::image::{Bits, BitsMut};
use crate::pixel::constants::K;
use crate::pixel::pack::{expand565, pack565_32, swap_rb, swap_rb565};

/// Copy `A8R8G8B8` pixels unchanged.
pub fn fetch_8888(dst: &mut [u32], src: &[u32]) {
    dst.copy_from_slice(&src[..dst.len()]);
}

/// Copy with alpha forced to 0xff.
pub fn fetch_x8r8g8b8(dst: &mut [u32], src: &[u32]) {
    for (d, &s) in dst.iter_mut().zip(src) {
        *d = s | K.alpha_mask;
    }
}

pub fn fetch_a8b8g8r8(dst: &mut [u32], src: &[u32]) {
    for (d, &s) in dst.iter_mut().zip(src) {
        *d = swap_rb(s);
    }
}

pub fn fetch_x8b8g8r8(dst: &mut [u32], src: &[u32]) {
    for (d, &s) in dst.iter_mut().zip(src) {
        *d = swap_rb(s) | K.alpha_mask;
    }
}

/// Widen RGB565 to opaque `A8R8G8B8`.
pub fn fetch_r5g6b5(dst: &mut [u32], src: &[u16]) {
    for (d, &s) in dst.iter_mut().zip(src) {
        *d = expand565(s);
    }
}

pub fn fetch_b5g6r5(dst: &mut [u32], src: &[u16]) {
    for (d, &s) in dst.iter_mut().zip(src) {
        *d = expand565(swap_rb565(s));
    }
}

/// Alpha-only pixels land in the alpha byte; colors are zero.
pub fn fetch_a8(dst: &mut [u32], src: &[u8]) {
    for (d, &s) in dst.iter_mut().zip(src) {
        *d = u32::from(s) << 24;
    }
}

/// One stored pixel widened to `A8R8G8B8`.
pub fn to_argb(format: PixelFormat, raw: u32) -> u32 {
    match format {
        PixelFormat::A8R8G8B8 => raw,
        PixelFormat::X8R8G8B8 => raw | K.alpha_mask,
        PixelFormat::A8B8G8R8 => swap_rb(raw),
        PixelFormat::X8B8G8R8 => swap_rb(raw) | K.alpha_mask,
        PixelFormat::R5G6B5 => expand565(raw as u16),
        PixelFormat::B5G6R5 => expand565(swap_rb565(raw as u16)),
        PixelFormat::A8 => raw << 24,
    }
}

/// Fill `out` with the pixels of row `y` starting at column `x`.
pub fn fetch_row(bits: &Bits<'_>, x: u32, y: u32, out: &mut [u32]) {
    let n = out.len();
    match bits.format() {
        PixelFormat::A8R8G8B8 => fetch_8888(out, &bits.line::<u32>(x, y).0[..n]),
        PixelFormat::X8R8G8B8 => fetch_x8r8g8b8(out, &bits.line::<u32>(x, y).0[..n]),
        PixelFormat::A8B8G8R8 => fetch_a8b8g8r8(out, &bits.line::<u32>(x, y).0[..n]),
        PixelFormat::X8B8G8R8 => fetch_x8b8g8r8(out, &bits.line::<u32>(x, y).0[..n]),
        PixelFormat::R5G6B5 => fetch_r5g6b5(out, &bits.line::<u16>(x, y).0[..n]),
        PixelFormat::B5G6R5 => fetch_b5g6r5(out, &bits.line::<u16>(x, y).0[..n]),
        PixelFormat::A8 => fetch_a8(out, &bits.line::<u8>(x, y).0[..n]),
    }
}

/// Write `row` (in `A8R8G8B8`) back to row `y` of `dest` starting at column `x`.
pub fn store_row(dest: &mut BitsMut<'_>, x: u32, y: u32, row: &[u32]) {
    let n = row.len();
    match dest.format() {
        PixelFormat::A8R8G8B8 | PixelFormat::X8R8G8B8 => {
            dest.line_mut::<u32>(x, y).0[..n].copy_from_slice(row);
        }
        PixelFormat::A8B8G8R8 | PixelFormat::X8B8G8R8 => {
            for (d, &s) in dest.line_mut::<u32>(x, y).0.iter_mut().zip(row) {
                *d = swap_rb(s);
            }
        }
        PixelFormat::R5G6B5 => {
            for (d, &s) in dest.line_mut::<u16>(x, y).0.iter_mut().zip(row) {
                *d = pack565_32(s);
            }
        }
        PixelFormat::B5G6R5 => {
            for (d, &s) in dest.line_mut::<u16>(x, y).0.iter_mut().zip(row) {
                *d = swap_rb565(pack565_32(s));
            }
        }
        PixelFormat::A8 => {
            for (d, &s) in dest.line_mut::<u8>(x, y).0.iter_mut().zip(row) {
                *d = (s >> 24) as u8;
            }
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/fetch.rs"]
mod tests;
