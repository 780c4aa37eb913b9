//! Constant fill and same-format block copy over raw 32-bit word buffers.
//!
//! Both walk each row as bytes: small writes until the destination reaches a
//! 16-byte boundary, wide chunks, then small writes for the remainder.

use crate::composite::{CompositeInfo, rows, rows_mut};
use crate::foundation::core::Rect;
use crate::image::BitsMut;

fn take_front<'a>(d: &mut &'a mut [u8], n: usize) -> &'a mut [u8] {
    let (front, rest) = std::mem::take(d).split_at_mut(n);
    *d = rest;
    front
}

fn take_front_ref<'a>(s: &mut &'a [u8], n: usize) -> &'a [u8] {
    let (front, rest) = s.split_at(n);
    *s = rest;
    front
}

fn fill_span(mut d: &mut [u8], filler: u32) {
    let b = filler.to_ne_bytes();
    if !d.is_empty() && d.as_ptr().align_offset(2) != 0 {
        take_front(&mut d, 1)[0] = b[0];
    }
    if d.len() >= 2 && d.as_ptr().align_offset(4) != 0 {
        take_front(&mut d, 2).copy_from_slice(&b[..2]);
    }
    while d.len() >= 4 && d.as_ptr().align_offset(16) != 0 {
        take_front(&mut d, 4).copy_from_slice(&b);
    }

    let wide: [u8; 16] = std::array::from_fn(|i| b[i & 3]);
    let (chunks, rest) = d.as_chunks_mut::<16>();
    for c in chunks {
        *c = wide;
    }
    let mut d = rest;

    while d.len() >= 4 {
        take_front(&mut d, 4).copy_from_slice(&b);
    }
    if d.len() >= 2 {
        take_front(&mut d, 2).copy_from_slice(&b[..2]);
    }
    if let Some(last) = d.first_mut() {
        *last = b[0];
    }
}

/// Fill `rect` of a `bpp`-bit surface with `filler`.
///
/// `stride` counts 32-bit words per row. Only the low `bpp` bits of `filler`
/// are used. Returns `false` (and writes nothing) for depths other than 8, 16
/// and 32.
pub fn fill(bits: &mut [u32], stride: usize, bpp: u32, rect: Rect, filler: u32) -> bool {
    let filler = match bpp {
        8 => (filler & 0xff) * 0x0101_0101,
        16 => (filler & 0xffff) * 0x0001_0001,
        32 => filler,
        _ => return false,
    };
    let bytes: &mut [u8] = bytemuck::cast_slice_mut(bits);
    let byte_stride = stride * 4;
    let pixel_bytes = bpp as usize / 8;
    let row_bytes = rect.width as usize * pixel_bytes;
    for y in 0..rect.height as usize {
        let start = (rect.y as usize + y) * byte_stride + rect.x as usize * pixel_bytes;
        fill_span(&mut bytes[start..start + row_bytes], filler);
    }
    true
}

fn copy_span(mut d: &mut [u8], mut s: &[u8]) {
    while d.len() >= 2 && d.as_ptr().align_offset(4) != 0 {
        take_front(&mut d, 2).copy_from_slice(take_front_ref(&mut s, 2));
    }
    while d.len() >= 4 && d.as_ptr().align_offset(16) != 0 {
        take_front(&mut d, 4).copy_from_slice(take_front_ref(&mut s, 4));
    }

    let (big, rest) = d.as_chunks_mut::<64>();
    for c in big {
        c.copy_from_slice(take_front_ref(&mut s, 64));
    }
    let (small, rest) = rest.as_chunks_mut::<16>();
    for c in small {
        c.copy_from_slice(take_front_ref(&mut s, 16));
    }
    let mut d = rest;

    while d.len() >= 4 {
        take_front(&mut d, 4).copy_from_slice(take_front_ref(&mut s, 4));
    }
    if d.len() >= 2 {
        take_front(&mut d, 2).copy_from_slice(take_front_ref(&mut s, 2));
    }
}

/// Geometry of a block copy; strides count 32-bit words.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BltParams {
    pub src_stride: usize,
    pub dst_stride: usize,
    pub src_bpp: u32,
    pub dst_bpp: u32,
    pub src_x: u32,
    pub src_y: u32,
    pub dest_x: u32,
    pub dest_y: u32,
    pub width: u32,
    pub height: u32,
}

/// Raw copy between two surfaces of the same depth.
///
/// Returns `false` without touching `dst` when the depths differ or are not
/// 16 or 32 bits; callers fall back to a general path.
pub fn blt(src: &[u32], dst: &mut [u32], p: &BltParams) -> bool {
    if p.src_bpp != p.dst_bpp || !matches!(p.src_bpp, 16 | 32) {
        return false;
    }
    let pixel_bytes = p.src_bpp as usize / 8;
    let row_bytes = p.width as usize * pixel_bytes;
    let src: &[u8] = bytemuck::cast_slice(src);
    let dst: &mut [u8] = bytemuck::cast_slice_mut(dst);
    for y in 0..p.height as usize {
        let s = (p.src_y as usize + y) * p.src_stride * 4 + p.src_x as usize * pixel_bytes;
        let d = (p.dest_y as usize + y) * p.dst_stride * 4 + p.dest_x as usize * pixel_bytes;
        copy_span(&mut dst[d..d + row_bytes], &src[s..s + row_bytes]);
    }
    true
}

/// SRC between surfaces with identical formats.
pub fn copy_area(info: &CompositeInfo<'_>, dest: &mut BitsMut<'_>) {
    let Some(src) = info.src.bits() else {
        return;
    };
    let params = BltParams {
        src_stride: src.rowstride(),
        dst_stride: dest.rowstride(),
        src_bpp: src.format().bpp(),
        dst_bpp: dest.format().bpp(),
        src_x: info.src_x,
        src_y: info.src_y,
        dest_x: info.dest_x,
        dest_y: info.dest_y,
        width: info.width,
        height: info.height,
    };
    if blt(src.data(), dest.words_mut(), &params) {
        return;
    }
    tracing::trace!(bpp = params.src_bpp, "blt declined, copying rows bytewise");
    let pixel_bytes = params.src_bpp as usize / 8;
    let (w, h) = info.size();
    let Some((src_line, src_stride)) = info.src_line::<u8>() else {
        return;
    };
    let (line, stride) = dest.line_mut::<u8>(info.dest_x, info.dest_y);
    let row_bytes = w * pixel_bytes;
    for (d, s) in rows_mut(line, stride, row_bytes, h).zip(rows(src_line, src_stride, row_bytes, h)) {
        d.copy_from_slice(s);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composite/fill.rs"]
mod tests;
