//! Format-agnostic composite: fetch rows into `A8R8G8B8` scratch, combine,
//! store back.

use crate::combine::CombineFn;
use crate::composite::CompositeInfo;
use crate::fetch::{fetch_row, store_row};
use crate::foundation::core::PixelFormat;
use crate::foundation::math::mul_un8x4_un8;
use crate::image::{BitsMut, Image};
use crate::pixel::constants::K;

/// Pixels processed per scratch chunk.
pub const CHUNK: usize = 128;

/// Load `n` source pixels of row `y` starting at column `x` into `out`.
fn load(image: &Image<'_>, x: u32, y: u32, out: &mut [u32]) {
    if let Some(c) = image.solid_pixel(PixelFormat::A8R8G8B8) {
        out.fill(c);
        return;
    }
    let Some(bits) = image.bits() else {
        return;
    };
    fetch_row(bits, x, y, out);
    if !bits.premultiplied() {
        for p in out.iter_mut() {
            *p = premultiply(*p);
        }
    }
}

/// Scale the color channels of a straight-alpha pixel by its alpha.
pub(crate) fn premultiply(p: u32) -> u32 {
    let a = (p >> 24) as u8;
    (mul_un8x4_un8(p, a) & !K.alpha_mask) | (p & K.alpha_mask)
}

/// Composite `info` into `dest` with `combine` doing the per-row work.
pub fn composite_general(info: &CompositeInfo<'_>, dest: &mut BitsMut<'_>, combine: CombineFn) {
    let mut src_buf = [0u32; CHUNK];
    let mut mask_buf = [0u32; CHUNK];
    let mut dst_buf = [0u32; CHUNK];

    for row in 0..info.height {
        let mut x = 0;
        while x < info.width {
            let n = ((info.width - x) as usize).min(CHUNK);
            let src = &mut src_buf[..n];
            load(info.src, info.src_x + x, info.src_y + row, src);

            let mask = match info.mask {
                Some(m) => {
                    let buf = &mut mask_buf[..n];
                    load(m, info.mask_x + x, info.mask_y + row, buf);
                    Some(&*buf)
                }
                None => None,
            };

            let dst = &mut dst_buf[..n];
            fetch_row(&dest.as_bits(), info.dest_x + x, info.dest_y + row, dst);
            combine(dst, src, mask);
            store_row(dest, info.dest_x + x, info.dest_y + row, dst);

            x += n as u32;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composite/general.rs"]
mod tests;
