//! Routines with a solid source color, unpacked once per call.

use crate::composite::{
    CompositeInfo, drive_dest, gather, mask_word, pack565x8, rows, rows_mut, unpack565x8,
};
use crate::image::BitsMut;
use crate::pixel::blend::{expand_alpha, in_over, is_zero, over, pix_multiply};
use crate::pixel::lanes::{U16x4, U16x16};
use crate::pixel::pack::{pack, pack4, pack565, unpack, unpack4, unpack565};

/// Solid source color and its alpha, expanded for single pixels and batches.
#[derive(Clone, Copy)]
struct SolidLanes {
    one: U16x4,
    alpha: U16x4,
    many: U16x16,
    alpha_many: U16x16,
}

impl SolidLanes {
    fn new(src: u32) -> Self {
        let one = unpack(src);
        let alpha = expand_alpha(one);
        Self {
            one,
            alpha,
            many: U16x16::broadcast(one),
            alpha_many: U16x16::broadcast(alpha),
        }
    }
}

/// Solid OVER a 32-bit destination.
pub fn over_n_8888(info: &CompositeInfo<'_>, dest: &mut BitsMut<'_>) {
    let src = info.solid_src(dest.format());
    if src == 0 {
        return;
    }
    let s = SolidLanes::new(src);
    let (w, h) = info.size();
    let (line, stride) = dest.line_mut::<u32>(info.dest_x, info.dest_y);
    for d in rows_mut(line, stride, w, h) {
        drive_dest::<u32, 4>(
            d,
            |_, d| *d = pack(over(s.one, s.alpha, unpack(*d))),
            |_, d| *d = pack4(over(s.many, s.alpha_many, unpack4(*d))),
        );
    }
}

/// Solid OVER an RGB565 destination.
pub fn over_n_0565(info: &CompositeInfo<'_>, dest: &mut BitsMut<'_>) {
    let src = info.solid_src(dest.format());
    if src == 0 {
        return;
    }
    let s = SolidLanes::new(src);
    let (w, h) = info.size();
    let (line, stride) = dest.line_mut::<u16>(info.dest_x, info.dest_y);
    for d in rows_mut(line, stride, w, h) {
        drive_dest::<u16, 8>(
            d,
            |_, d| *d = pack565(over(s.one, s.alpha, unpack565(*d))),
            |_, d| {
                let [lo, hi] = unpack565x8(d);
                *d = pack565x8([
                    over(s.many, s.alpha_many, lo),
                    over(s.many, s.alpha_many, hi),
                ]);
            },
        );
    }
}

/// Solid OVER_REVERSE a 32-bit destination.
pub fn over_reverse_n_8888(info: &CompositeInfo<'_>, dest: &mut BitsMut<'_>) {
    let src = info.solid_src(dest.format());
    if src == 0 {
        return;
    }
    let s = SolidLanes::new(src);
    let (w, h) = info.size();
    let (line, stride) = dest.line_mut::<u32>(info.dest_x, info.dest_y);
    for d in rows_mut(line, stride, w, h) {
        drive_dest::<u32, 4>(
            d,
            |_, d| {
                let dd = unpack(*d);
                *d = pack(over(dd, expand_alpha(dd), s.one));
            },
            |_, d| {
                let dd = unpack4(*d);
                *d = pack4(over(dd, expand_alpha(dd), s.many));
            },
        );
    }
}

/// Solid ADD a 32-bit destination; an opaque white source fills.
pub fn add_n_8888(info: &CompositeInfo<'_>, dest: &mut BitsMut<'_>) {
    let src = info.solid_src(dest.format());
    if src == 0 {
        return;
    }
    let (w, h) = info.size();
    if src == 0xffff_ffff {
        dest.fill(info.dest_rect(), src);
        return;
    }
    let s = SolidLanes::new(src);
    let (line, stride) = dest.line_mut::<u32>(info.dest_x, info.dest_y);
    for d in rows_mut(line, stride, w, h) {
        drive_dest::<u32, 4>(
            d,
            |_, d| *d = pack(s.one.adds(unpack(*d))),
            |_, d| *d = pack4(s.many.adds(unpack4(*d))),
        );
    }
}

/// Solid source through a component-alpha `A8R8G8B8` mask.
pub fn over_n_8888_8888_ca(info: &CompositeInfo<'_>, dest: &mut BitsMut<'_>) {
    let src = info.solid_src(dest.format());
    if src == 0 {
        return;
    }
    let Some((mask_line, mask_stride)) = info.mask_line::<u32>() else {
        return;
    };
    let s = SolidLanes::new(src);
    let (w, h) = info.size();
    let (line, stride) = dest.line_mut::<u32>(info.dest_x, info.dest_y);
    for (d, m) in rows_mut(line, stride, w, h).zip(rows(mask_line, mask_stride, w, h)) {
        drive_dest::<u32, 4>(
            d,
            |i, d| {
                if m[i] != 0 {
                    *d = pack(in_over(s.one, s.alpha, unpack(m[i]), unpack(*d)));
                }
            },
            |i, d| {
                let m: [u32; 4] = gather(m, i);
                if !is_zero(&m) {
                    *d = pack4(in_over(s.many, s.alpha_many, unpack4(m), unpack4(*d)));
                }
            },
        );
    }
}

/// Solid OVER RGB565 through a component-alpha mask.
pub fn over_n_8888_0565_ca(info: &CompositeInfo<'_>, dest: &mut BitsMut<'_>) {
    let src = info.solid_src(dest.format());
    if src == 0 {
        return;
    }
    let Some((mask_line, mask_stride)) = info.mask_line::<u32>() else {
        return;
    };
    let s = SolidLanes::new(src);
    let (w, h) = info.size();
    let (line, stride) = dest.line_mut::<u16>(info.dest_x, info.dest_y);
    for (d, m) in rows_mut(line, stride, w, h).zip(rows(mask_line, mask_stride, w, h)) {
        drive_dest::<u16, 8>(
            d,
            |i, d| {
                if m[i] != 0 {
                    *d = pack565(in_over(s.one, s.alpha, unpack(m[i]), unpack565(*d)));
                }
            },
            |i, d| {
                let m: [u32; 8] = gather(m, i);
                if m.iter().all(|&v| v == 0) {
                    return;
                }
                let [lo, hi] = unpack565x8(d);
                let m_lo = unpack4([m[0], m[1], m[2], m[3]]);
                let m_hi = unpack4([m[4], m[5], m[6], m[7]]);
                *d = pack565x8([
                    in_over(s.many, s.alpha_many, m_lo, lo),
                    in_over(s.many, s.alpha_many, m_hi, hi),
                ]);
            },
        );
    }
}

/// Solid ADD through a component-alpha mask.
pub fn add_n_8888_8888_ca(info: &CompositeInfo<'_>, dest: &mut BitsMut<'_>) {
    let src = info.solid_src(dest.format());
    if src == 0 {
        return;
    }
    let Some((mask_line, mask_stride)) = info.mask_line::<u32>() else {
        return;
    };
    let s = SolidLanes::new(src);
    let (w, h) = info.size();
    let (line, stride) = dest.line_mut::<u32>(info.dest_x, info.dest_y);
    for (d, m) in rows_mut(line, stride, w, h).zip(rows(mask_line, mask_stride, w, h)) {
        drive_dest::<u32, 4>(
            d,
            |i, d| {
                if m[i] != 0 {
                    *d = pack(pix_multiply(s.one, unpack(m[i])).adds(unpack(*d)));
                }
            },
            |i, d| {
                let m: [u32; 4] = gather(m, i);
                if !is_zero(&m) {
                    *d = pack4(pix_multiply(s.many, unpack4(m)).adds(unpack4(*d)));
                }
            },
        );
    }
}

/// Solid source through an `A8` mask.
pub fn over_n_8_8888(info: &CompositeInfo<'_>, dest: &mut BitsMut<'_>) {
    let src = info.solid_src(dest.format());
    if src == 0 {
        return;
    }
    let Some((mask_line, mask_stride)) = info.mask_line::<u8>() else {
        return;
    };
    let opaque = src >> 24 == 0xff;
    let s = SolidLanes::new(src);
    let (w, h) = info.size();
    let (line, stride) = dest.line_mut::<u32>(info.dest_x, info.dest_y);
    for (d, m) in rows_mut(line, stride, w, h).zip(rows(mask_line, mask_stride, w, h)) {
        drive_dest::<u32, 4>(
            d,
            |i, d| match m[i] {
                0 => {}
                0xff if opaque => *d = src,
                a => *d = pack(in_over(s.one, s.alpha, U16x4::from_alpha(a), unpack(*d))),
            },
            |i, d| {
                let m: [u8; 4] = gather(m, i);
                match mask_word(m) {
                    0 => {}
                    0xffff_ffff if opaque => *d = [src; 4],
                    _ => {
                        *d = pack4(in_over(
                            s.many,
                            s.alpha_many,
                            U16x16::from_alphas(m),
                            unpack4(*d),
                        ));
                    }
                }
            },
        );
    }
}

/// Solid OVER RGB565 through an `A8` mask.
pub fn over_n_8_0565(info: &CompositeInfo<'_>, dest: &mut BitsMut<'_>) {
    let src = info.solid_src(dest.format());
    if src == 0 {
        return;
    }
    let Some((mask_line, mask_stride)) = info.mask_line::<u8>() else {
        return;
    };
    let s = SolidLanes::new(src);
    let (w, h) = info.size();
    let (line, stride) = dest.line_mut::<u16>(info.dest_x, info.dest_y);
    for (d, m) in rows_mut(line, stride, w, h).zip(rows(mask_line, mask_stride, w, h)) {
        drive_dest::<u16, 8>(
            d,
            |i, d| {
                if m[i] != 0 {
                    let mm = U16x4::from_alpha(m[i]);
                    *d = pack565(in_over(s.one, s.alpha, mm, unpack565(*d)));
                }
            },
            |i, d| {
                let m: [u8; 8] = gather(m, i);
                if m == [0; 8] {
                    return;
                }
                let [lo, hi] = unpack565x8(d);
                let m_lo = U16x16::from_alphas([m[0], m[1], m[2], m[3]]);
                let m_hi = U16x16::from_alphas([m[4], m[5], m[6], m[7]]);
                *d = pack565x8([
                    in_over(s.many, s.alpha_many, m_lo, lo),
                    in_over(s.many, s.alpha_many, m_hi, hi),
                ]);
            },
        );
    }
}

/// SRC of a solid color through an `A8` mask; a zero color clears the rectangle.
pub fn src_n_8_8888(info: &CompositeInfo<'_>, dest: &mut BitsMut<'_>) {
    let src = info.solid_src(dest.format());
    if src == 0 {
        dest.fill(info.dest_rect(), 0);
        return;
    }
    let Some((mask_line, mask_stride)) = info.mask_line::<u8>() else {
        return;
    };
    let opaque = src >> 24 == 0xff;
    let s = SolidLanes::new(src);
    let (w, h) = info.size();
    let (line, stride) = dest.line_mut::<u32>(info.dest_x, info.dest_y);
    for (d, m) in rows_mut(line, stride, w, h).zip(rows(mask_line, mask_stride, w, h)) {
        drive_dest::<u32, 4>(
            d,
            |i, d| {
                *d = match m[i] {
                    0 => 0,
                    a => pack(pix_multiply(s.one, U16x4::from_alpha(a))),
                }
            },
            |i, d| {
                let m: [u8; 4] = gather(m, i);
                *d = match mask_word(m) {
                    0 => [0; 4],
                    0xffff_ffff if opaque => [src; 4],
                    _ => pack4(pix_multiply(s.many, U16x16::from_alphas(m))),
                };
            },
        );
    }
}

/// Solid ADD through an `A8` mask.
pub fn add_n_8_8888(info: &CompositeInfo<'_>, dest: &mut BitsMut<'_>) {
    let src = info.solid_src(dest.format());
    if src == 0 {
        return;
    }
    let Some((mask_line, mask_stride)) = info.mask_line::<u8>() else {
        return;
    };
    let s = SolidLanes::new(src);
    let (w, h) = info.size();
    let (line, stride) = dest.line_mut::<u32>(info.dest_x, info.dest_y);
    for (d, m) in rows_mut(line, stride, w, h).zip(rows(mask_line, mask_stride, w, h)) {
        drive_dest::<u32, 4>(
            d,
            |i, d| {
                if m[i] != 0 {
                    let sm = pix_multiply(s.one, U16x4::from_alpha(m[i]));
                    *d = pack(sm.adds(unpack(*d)));
                }
            },
            |i, d| {
                let m: [u8; 4] = gather(m, i);
                if mask_word(m) != 0 {
                    let sm = pix_multiply(s.many, U16x16::from_alphas(m));
                    *d = pack4(sm.adds(unpack4(*d)));
                }
            },
        );
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composite/solid.rs"]
mod tests;
