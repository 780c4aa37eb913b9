//! Routines with an `A8` destination. Batches are 16 alpha bytes, one per lane.

use crate::composite::{CompositeInfo, drive_dest, gather, rows, rows_mut};
use crate::foundation::math::{clamped_add, premultiply_round};
use crate::image::BitsMut;
use crate::pixel::lanes::U16Lanes;

const N: usize = 16;

type Alphas = U16Lanes<N>;

#[inline(always)]
fn widen(b: [u8; N]) -> Alphas {
    U16Lanes(b.map(u16::from))
}

#[inline(always)]
fn narrow(e: Alphas) -> [u8; N] {
    e.0.map(|v| v.min(0xff) as u8)
}

fn src_alpha(info: &CompositeInfo<'_>, dest: &BitsMut<'_>) -> u8 {
    (info.solid_src(dest.format()) >> 24) as u8
}

/// `d *= a_s * m` for an `A8` mask and destination.
pub fn in_n_8_8(info: &CompositeInfo<'_>, dest: &mut BitsMut<'_>) {
    let Some((mask_line, mask_stride)) = info.mask_line::<u8>() else {
        return;
    };
    let sa = src_alpha(info, dest);
    let alpha = Alphas::splat(u16::from(sa));
    let (w, h) = info.size();
    let (line, stride) = dest.line_mut::<u8>(info.dest_x, info.dest_y);
    for (d, m) in rows_mut(line, stride, w, h).zip(rows(mask_line, mask_stride, w, h)) {
        drive_dest::<u8, N>(
            d,
            |i, d| *d = premultiply_round(premultiply_round(sa, m[i]), *d),
            |i, d| {
                let m = widen(gather(m, i));
                *d = narrow(alpha.mul_round(m).mul_round(widen(*d)));
            },
        );
    }
}

/// `d *= a_s`; alpha 0xff is a no-op and 0 clears.
pub fn in_n_8(info: &CompositeInfo<'_>, dest: &mut BitsMut<'_>) {
    let sa = src_alpha(info, dest);
    match sa {
        0xff => return,
        0 => {
            dest.fill(info.dest_rect(), 0);
            return;
        }
        _ => {}
    }
    let alpha = Alphas::splat(u16::from(sa));
    let (w, h) = info.size();
    let (line, stride) = dest.line_mut::<u8>(info.dest_x, info.dest_y);
    for d in rows_mut(line, stride, w, h) {
        drive_dest::<u8, N>(
            d,
            |_, d| *d = premultiply_round(sa, *d),
            |_, d| *d = narrow(alpha.mul_round(widen(*d))),
        );
    }
}

/// `d *= s` for two `A8` surfaces.
pub fn in_8_8(info: &CompositeInfo<'_>, dest: &mut BitsMut<'_>) {
    let Some((src_line, src_stride)) = info.src_line::<u8>() else {
        return;
    };
    let (w, h) = info.size();
    let (line, stride) = dest.line_mut::<u8>(info.dest_x, info.dest_y);
    for (d, s) in rows_mut(line, stride, w, h).zip(rows(src_line, src_stride, w, h)) {
        drive_dest::<u8, N>(
            d,
            |i, d| *d = premultiply_round(s[i], *d),
            |i, d| *d = narrow(widen(gather(s, i)).mul_round(widen(*d))),
        );
    }
}

/// `d += a_s * m`, saturating.
pub fn add_n_8_8(info: &CompositeInfo<'_>, dest: &mut BitsMut<'_>) {
    let Some((mask_line, mask_stride)) = info.mask_line::<u8>() else {
        return;
    };
    let sa = src_alpha(info, dest);
    let alpha = Alphas::splat(u16::from(sa));
    let (w, h) = info.size();
    let (line, stride) = dest.line_mut::<u8>(info.dest_x, info.dest_y);
    for (d, m) in rows_mut(line, stride, w, h).zip(rows(mask_line, mask_stride, w, h)) {
        drive_dest::<u8, N>(
            d,
            |i, d| *d = clamped_add(premultiply_round(sa, m[i]), *d),
            |i, d| {
                let m = widen(gather(m, i));
                *d = narrow(alpha.mul_round(m).adds(widen(*d)));
            },
        );
    }
}

/// `d += a_s`, saturating; alpha 0xff fills.
pub fn add_n_8(info: &CompositeInfo<'_>, dest: &mut BitsMut<'_>) {
    let sa = src_alpha(info, dest);
    match sa {
        0 => return,
        0xff => {
            dest.fill(info.dest_rect(), 0xff);
            return;
        }
        _ => {}
    }
    let alpha = Alphas::splat(u16::from(sa));
    let (w, h) = info.size();
    let (line, stride) = dest.line_mut::<u8>(info.dest_x, info.dest_y);
    for d in rows_mut(line, stride, w, h) {
        drive_dest::<u8, N>(
            d,
            |_, d| *d = clamped_add(sa, *d),
            |_, d| *d = narrow(alpha.adds(widen(*d))),
        );
    }
}

/// `d += s`, saturating.
pub fn add_8_8(info: &CompositeInfo<'_>, dest: &mut BitsMut<'_>) {
    let Some((src_line, src_stride)) = info.src_line::<u8>() else {
        return;
    };
    let (w, h) = info.size();
    let (line, stride) = dest.line_mut::<u8>(info.dest_x, info.dest_y);
    for (d, s) in rows_mut(line, stride, w, h).zip(rows(src_line, src_stride, w, h)) {
        drive_dest::<u8, N>(
            d,
            |i, d| *d = clamped_add(s[i], *d),
            |i, d| *d = narrow(widen(gather(s, i)).adds(widen(*d))),
        );
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composite/a8.rs"]
mod tests;
