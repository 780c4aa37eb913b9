//! Routines whose source is a surface.

use crate::combine::unified::{add_u, over_u};
use crate::composite::{
    CompositeInfo, drive_dest, gather, mask_word, pack565x8, rows, rows_mut, unpack565x8,
};
use crate::image::BitsMut;
use crate::pixel::blend::{
    expand_alpha, in_over, invert_colors, is_opaque, is_zero, over, over_rev_non_pre,
};
use crate::pixel::constants::K;
use crate::pixel::lanes::{U16x4, U16x16};
use crate::pixel::pack::{pack, pack4, pack565, pack565_32, swap_rb, unpack, unpack4, unpack565};

/// Premultiplied 32-bit source OVER a 32-bit destination.
pub fn over_8888_8888(info: &CompositeInfo<'_>, dest: &mut BitsMut<'_>) {
    let Some((src_line, src_stride)) = info.src_line::<u32>() else {
        return;
    };
    let (w, h) = info.size();
    let (line, stride) = dest.line_mut::<u32>(info.dest_x, info.dest_y);
    for (d, s) in rows_mut(line, stride, w, h).zip(rows(src_line, src_stride, w, h)) {
        over_u(d, s, None);
    }
}

/// Saturating per-channel sum of two 32-bit surfaces.
pub fn add_8888_8888(info: &CompositeInfo<'_>, dest: &mut BitsMut<'_>) {
    let Some((src_line, src_stride)) = info.src_line::<u32>() else {
        return;
    };
    let (w, h) = info.size();
    let (line, stride) = dest.line_mut::<u32>(info.dest_x, info.dest_y);
    for (d, s) in rows_mut(line, stride, w, h).zip(rows(src_line, src_stride, w, h)) {
        add_u(d, s, None);
    }
}

/// 32-bit source OVER RGB565, fusing unpack and pack.
pub fn over_8888_0565(info: &CompositeInfo<'_>, dest: &mut BitsMut<'_>) {
    let Some((src_line, src_stride)) = info.src_line::<u32>() else {
        return;
    };
    let (w, h) = info.size();
    let (line, stride) = dest.line_mut::<u16>(info.dest_x, info.dest_y);
    for (d, s) in rows_mut(line, stride, w, h).zip(rows(src_line, src_stride, w, h)) {
        drive_dest::<u16, 8>(
            d,
            |i, d| match s[i] {
                0 => {}
                p if p >> 24 == 0xff => *d = pack565_32(p),
                p => {
                    let p = unpack(p);
                    *d = pack565(over(p, expand_alpha(p), unpack565(*d)));
                }
            },
            |i, d| {
                let s: [u32; 8] = gather(s, i);
                let [lo, hi] = unpack565x8(d);
                let s_lo = unpack4([s[0], s[1], s[2], s[3]]);
                let s_hi = unpack4([s[4], s[5], s[6], s[7]]);
                *d = pack565x8([
                    over(s_lo, expand_alpha(s_lo), lo),
                    over(s_hi, expand_alpha(s_hi), hi),
                ]);
            },
        );
    }
}

/// `A8R8G8B8` source scaled by a solid mask's alpha.
pub fn over_8888_n_8888(info: &CompositeInfo<'_>, dest: &mut BitsMut<'_>) {
    let Some((src_line, src_stride)) = info.src_line::<u32>() else {
        return;
    };
    let m = info.solid_mask_alpha();
    let mask_one = U16x4::from_alpha(m);
    let mask_many = U16x16::broadcast(mask_one);
    let (w, h) = info.size();
    let (line, stride) = dest.line_mut::<u32>(info.dest_x, info.dest_y);
    for (d, s) in rows_mut(line, stride, w, h).zip(rows(src_line, src_stride, w, h)) {
        drive_dest::<u32, 4>(
            d,
            |i, d| {
                if s[i] != 0 {
                    let p = unpack(s[i]);
                    *d = pack(in_over(p, expand_alpha(p), mask_one, unpack(*d)));
                }
            },
            |i, d| {
                let s: [u32; 4] = gather(s, i);
                if !is_zero(&s) {
                    let p = unpack4(s);
                    *d = pack4(in_over(p, expand_alpha(p), mask_many, unpack4(*d)));
                }
            },
        );
    }
}

/// Opaque-forced `X8R8G8B8` source scaled by a solid mask's alpha.
pub fn over_x888_n_8888(info: &CompositeInfo<'_>, dest: &mut BitsMut<'_>) {
    let Some((src_line, src_stride)) = info.src_line::<u32>() else {
        return;
    };
    let m = info.solid_mask_alpha();
    let mask_one = U16x4::from_alpha(m);
    let mask_many = U16x16::broadcast(mask_one);
    let opaque_one = U16x4::from_alpha(0xff);
    let opaque_many = U16x16::broadcast(opaque_one);
    let (w, h) = info.size();
    let (line, stride) = dest.line_mut::<u32>(info.dest_x, info.dest_y);
    for (d, s) in rows_mut(line, stride, w, h).zip(rows(src_line, src_stride, w, h)) {
        drive_dest::<u32, 4>(
            d,
            |i, d| {
                let p = unpack(s[i] | K.alpha_mask);
                *d = pack(in_over(p, opaque_one, mask_one, unpack(*d)));
            },
            |i, d| {
                let s: [u32; 4] = gather(s, i);
                let p = unpack4(s.map(|v| v | K.alpha_mask));
                *d = pack4(in_over(p, opaque_many, mask_many, unpack4(*d)));
            },
        );
    }
}

/// Opaque-forced `X8R8G8B8` source through an `A8` mask.
pub fn over_x888_8_8888(info: &CompositeInfo<'_>, dest: &mut BitsMut<'_>) {
    let Some((src_line, src_stride)) = info.src_line::<u32>() else {
        return;
    };
    let Some((mask_line, mask_stride)) = info.mask_line::<u8>() else {
        return;
    };
    let opaque_one = U16x4::from_alpha(0xff);
    let opaque_many = U16x16::broadcast(opaque_one);
    let (w, h) = info.size();
    let (line, stride) = dest.line_mut::<u32>(info.dest_x, info.dest_y);
    let src_rows = rows(src_line, src_stride, w, h);
    let mask_rows = rows(mask_line, mask_stride, w, h);
    for ((d, s), m) in rows_mut(line, stride, w, h).zip(src_rows).zip(mask_rows) {
        drive_dest::<u32, 4>(
            d,
            |i, d| {
                let p = s[i] | K.alpha_mask;
                match m[i] {
                    0 => {}
                    0xff => *d = p,
                    a => {
                        let mm = U16x4::from_alpha(a);
                        *d = pack(in_over(unpack(p), opaque_one, mm, unpack(*d)));
                    }
                }
            },
            |i, d| {
                let p: [u32; 4] = gather::<u32, 4>(s, i).map(|v| v | K.alpha_mask);
                let m: [u8; 4] = gather(m, i);
                match mask_word(m) {
                    0 => {}
                    0xffff_ffff => *d = p,
                    _ => {
                        let mm = U16x16::from_alphas(m);
                        *d = pack4(in_over(unpack4(p), opaque_many, mm, unpack4(*d)));
                    }
                }
            },
        );
    }
}

/// `A8R8G8B8` source through an `A8` mask.
pub fn over_8888_8_8888(info: &CompositeInfo<'_>, dest: &mut BitsMut<'_>) {
    let Some((mask_line, mask_stride)) = info.mask_line::<u8>() else {
        return;
    };
    let (w, h) = info.size();
    over_8888_alpha_mask(info, dest, |row, i| mask_line[row * mask_stride + i], w, h);
}

/// `A8R8G8B8` source through the alpha channel of an `A8R8G8B8` mask.
pub fn over_8888_8888_8888(info: &CompositeInfo<'_>, dest: &mut BitsMut<'_>) {
    let Some((mask_line, mask_stride)) = info.mask_line::<u32>() else {
        return;
    };
    let (w, h) = info.size();
    over_8888_alpha_mask(
        info,
        dest,
        |row, i| (mask_line[row * mask_stride + i] >> 24) as u8,
        w,
        h,
    );
}

fn over_8888_alpha_mask(
    info: &CompositeInfo<'_>,
    dest: &mut BitsMut<'_>,
    mask_at: impl Fn(usize, usize) -> u8,
    w: usize,
    h: usize,
) {
    let Some((src_line, src_stride)) = info.src_line::<u32>() else {
        return;
    };
    let (line, stride) = dest.line_mut::<u32>(info.dest_x, info.dest_y);
    for (row, (d, s)) in rows_mut(line, stride, w, h)
        .zip(rows(src_line, src_stride, w, h))
        .enumerate()
    {
        drive_dest::<u32, 4>(
            d,
            |i, d| match (mask_at(row, i), s[i]) {
                (0, _) => {}
                (0xff, p) if p >> 24 == 0xff => *d = p,
                (a, p) => {
                    let p = unpack(p);
                    let mm = U16x4::from_alpha(a);
                    *d = pack(in_over(p, expand_alpha(p), mm, unpack(*d)));
                }
            },
            |i, d| {
                let m: [u8; 4] = std::array::from_fn(|k| mask_at(row, i + k));
                let s: [u32; 4] = gather(s, i);
                match mask_word(m) {
                    0 => {}
                    0xffff_ffff if is_opaque(&s) => *d = s,
                    _ => {
                        let p = unpack4(s);
                        let mm = U16x16::from_alphas(m);
                        *d = pack4(in_over(p, expand_alpha(p), mm, unpack4(*d)));
                    }
                }
            },
        );
    }
}

/// Copy an x888 source with alpha forced to 0xff.
pub fn src_x888_8888(info: &CompositeInfo<'_>, dest: &mut BitsMut<'_>) {
    let Some((src_line, src_stride)) = info.src_line::<u32>() else {
        return;
    };
    let (w, h) = info.size();
    let (line, stride) = dest.line_mut::<u32>(info.dest_x, info.dest_y);
    for (d, s) in rows_mut(line, stride, w, h).zip(rows(src_line, src_stride, w, h)) {
        for (d, &s) in d.iter_mut().zip(s) {
            *d = s | K.alpha_mask;
        }
    }
}

/// Convert an x888 source to RGB565 by truncation.
pub fn src_x888_0565(info: &CompositeInfo<'_>, dest: &mut BitsMut<'_>) {
    let Some((src_line, src_stride)) = info.src_line::<u32>() else {
        return;
    };
    let (w, h) = info.size();
    let (line, stride) = dest.line_mut::<u16>(info.dest_x, info.dest_y);
    for (d, s) in rows_mut(line, stride, w, h).zip(rows(src_line, src_stride, w, h)) {
        for (d, &s) in d.iter_mut().zip(s) {
            *d = pack565_32(s);
        }
    }
}

/// Non-premultiplied source in the opposite channel order, OVER a 32-bit destination.
pub fn over_pixbuf_8888(info: &CompositeInfo<'_>, dest: &mut BitsMut<'_>) {
    let Some((src_line, src_stride)) = info.src_line::<u32>() else {
        return;
    };
    let (w, h) = info.size();
    let (line, stride) = dest.line_mut::<u32>(info.dest_x, info.dest_y);
    for (d, s) in rows_mut(line, stride, w, h).zip(rows(src_line, src_stride, w, h)) {
        drive_dest::<u32, 4>(
            d,
            |i, d| *d = pack(over_rev_non_pre(unpack(s[i]), unpack(*d))),
            |i, d| {
                let s: [u32; 4] = gather(s, i);
                if is_opaque(&s) {
                    *d = s.map(swap_rb);
                } else if !is_zero(&s) {
                    *d = pack4(over_rev_non_pre(unpack4(s), unpack4(*d)));
                }
            },
        );
    }
}

/// Straight-alpha source OVER RGB565, premultiplying inline.
pub fn over_pixbuf_0565(info: &CompositeInfo<'_>, dest: &mut BitsMut<'_>) {
    let Some((src_line, src_stride)) = info.src_line::<u32>() else {
        return;
    };
    let (w, h) = info.size();
    let (line, stride) = dest.line_mut::<u16>(info.dest_x, info.dest_y);
    for (d, s) in rows_mut(line, stride, w, h).zip(rows(src_line, src_stride, w, h)) {
        drive_dest::<u16, 8>(
            d,
            |i, d| *d = pack565(over_rev_non_pre(unpack(s[i]), unpack565(*d))),
            |i, d| {
                let s: [u32; 8] = gather(s, i);
                if s.iter().all(|&v| v == 0) {
                    return;
                }
                let [lo, hi] = unpack565x8(d);
                let s_lo = unpack4([s[0], s[1], s[2], s[3]]);
                let s_hi = unpack4([s[4], s[5], s[6], s[7]]);
                if is_opaque(&[s[0], s[1], s[2], s[3]]) && is_opaque(&[s[4], s[5], s[6], s[7]]) {
                    *d = pack565x8([invert_colors(s_lo), invert_colors(s_hi)]);
                } else {
                    *d = pack565x8([over_rev_non_pre(s_lo, lo), over_rev_non_pre(s_hi, hi)]);
                }
            },
        );
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composite/source.rs"]
mod tests;
