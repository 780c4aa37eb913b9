//! Bilinear scaled SRC and OVER.
//!
//! Weights carry [`Constants::bilinear_bits`](crate::pixel::constants::Constants)
//! fractional bits. Each output channel is
//! `((tl*wt + bl*wb) * (R - dx) + (tr*wt + br*wb) * dx) >> 2*bits`
//! with `R` the weight range and `wt + wb == R`.

use crate::composite::{CompositeRect, drive_dest, mask_word, rows_mut};
use crate::foundation::core::{Fixed, Repeat};
use crate::image::{Bits, BitsMut};
use crate::pixel::blend::{expand_alpha, in_over, is_opaque, is_zero, over};
use crate::pixel::constants::K;
use crate::pixel::lanes::{U16x4, U16x16};
use crate::pixel::pack::{pack, pack4, unpack, unpack4};
use crate::scale::{ScaleParams, ScanlineBounds, pad_repeat_bounds};

/// Blend four neighbours with vertical weights `wt`/`wb` and horizontal weight `dx`.
#[inline(always)]
pub fn interpolate(tl: u32, tr: u32, bl: u32, br: u32, wt: u32, wb: u32, dx: u32) -> u32 {
    let range = K.bilinear_range();
    let shift = 2 * K.bilinear_bits;
    let mut out = 0;
    for s in [0, 8, 16, 24] {
        let c = |p: u32| (p >> s) & 0xff;
        let left = c(tl) * wt + c(bl) * wb;
        let right = c(tr) * wt + c(br) * wb;
        out |= (((left * (range - dx) + right * dx) >> shift) & 0xff) << s;
    }
    out
}

/// Weight of the right/lower neighbour for a 16.16 position.
#[inline(always)]
pub fn weight(pos: i64) -> u32 {
    ((pos >> (16 - K.bilinear_bits)) as u32) & (K.bilinear_range() - 1)
}

/// The two source rows blended for one destination row.
#[derive(Clone, Copy, Debug)]
pub struct BilinearRows<'a> {
    pub top: &'a [u32],
    pub bottom: &'a [u32],
    pub wt: u32,
    pub wb: u32,
}

impl BilinearRows<'_> {
    /// Interpolated pixel at 16.16 position `pos`; columns `pos >> 16` and the
    /// one after it must exist.
    #[inline(always)]
    pub fn sample(&self, pos: i64) -> u32 {
        let x = (pos >> 16) as usize;
        interpolate(
            self.top[x],
            self.top[x + 1],
            self.bottom[x],
            self.bottom[x + 1],
            self.wt,
            self.wb,
            weight(pos),
        )
    }

    #[inline(always)]
    fn sample4(&self, vx: i64, unit_x: i64, i: usize) -> [u32; 4] {
        std::array::from_fn(|k| self.sample(vx + (i + k) as i64 * unit_x))
    }
}

/// Write interpolated pixels.
pub fn scanline_src_8888_8888(dst: &mut [u32], rows: &BilinearRows<'_>, vx: i64, unit_x: i64) {
    drive_dest::<u32, 4>(
        dst,
        |i, d| *d = rows.sample(vx + i as i64 * unit_x),
        |i, d| *d = rows.sample4(vx, unit_x, i),
    );
}

/// Write interpolated pixels with alpha forced to 0xff.
pub fn scanline_src_x888_8888(dst: &mut [u32], rows: &BilinearRows<'_>, vx: i64, unit_x: i64) {
    drive_dest::<u32, 4>(
        dst,
        |i, d| *d = rows.sample(vx + i as i64 * unit_x) | K.alpha_mask,
        |i, d| *d = rows.sample4(vx, unit_x, i).map(|p| p | K.alpha_mask),
    );
}

/// Composite interpolated pixels OVER `dst`.
pub fn scanline_over_8888_8888(dst: &mut [u32], rows: &BilinearRows<'_>, vx: i64, unit_x: i64) {
    drive_dest::<u32, 4>(
        dst,
        |i, d| {
            let s = rows.sample(vx + i as i64 * unit_x);
            if s >> 24 == 0xff {
                *d = s;
            } else if s != 0 {
                let p = unpack(s);
                *d = pack(over(p, expand_alpha(p), unpack(*d)));
            }
        },
        |i, d| {
            let s = rows.sample4(vx, unit_x, i);
            if is_opaque(&s) {
                *d = s;
            } else if !is_zero(&s) {
                let p = unpack4(s);
                *d = pack4(over(p, expand_alpha(p), unpack4(*d)));
            }
        },
    );
}

/// OVER through an `A8` mask aligned with `dst`.
pub fn scanline_over_8888_8_8888(
    dst: &mut [u32],
    mask: &[u8],
    rows: &BilinearRows<'_>,
    vx: i64,
    unit_x: i64,
) {
    drive_dest::<u32, 4>(
        dst,
        |i, d| {
            let m = mask[i];
            if m == 0 {
                return;
            }
            let s = rows.sample(vx + i as i64 * unit_x);
            if m == 0xff && s >> 24 == 0xff {
                *d = s;
            } else if s != 0 {
                let p = unpack(s);
                *d = pack(in_over(p, expand_alpha(p), U16x4::from_alpha(m), unpack(*d)));
            }
        },
        |i, d| {
            let m: [u8; 4] = std::array::from_fn(|k| mask[i + k]);
            if mask_word(m) == 0 {
                return;
            }
            let s = rows.sample4(vx, unit_x, i);
            if mask_word(m) == u32::MAX && is_opaque(&s) {
                *d = s;
            } else if !is_zero(&s) {
                let p = unpack4(s);
                *d = pack4(in_over(p, expand_alpha(p), U16x16::from_alphas(m), unpack4(*d)));
            }
        },
    );
}

/// OVER scaled by a constant mask alpha.
pub fn scanline_over_8888_n_8888(
    dst: &mut [u32],
    mask: u8,
    rows: &BilinearRows<'_>,
    vx: i64,
    unit_x: i64,
) {
    if mask == 0 {
        return;
    }
    let m_one = U16x4::from_alpha(mask);
    let m_many = U16x16::broadcast(m_one);
    drive_dest::<u32, 4>(
        dst,
        |i, d| {
            let s = rows.sample(vx + i as i64 * unit_x);
            if s != 0 {
                let p = unpack(s);
                *d = pack(in_over(p, expand_alpha(p), m_one, unpack(*d)));
            }
        },
        |i, d| {
            let s = rows.sample4(vx, unit_x, i);
            if !is_zero(&s) {
                let p = unpack4(s);
                *d = pack4(in_over(p, expand_alpha(p), m_many, unpack4(*d)));
            }
        },
    );
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum BilinearKind {
    Src,
    SrcX888,
    Over,
    OverMask8,
    OverSolidMask(u8),
}

fn span(kind: BilinearKind, dst: &mut [u32], mask: &[u8], rows: &BilinearRows<'_>, vx: i64, unit_x: i64) {
    if dst.is_empty() {
        return;
    }
    match kind {
        BilinearKind::Src => scanline_src_8888_8888(dst, rows, vx, unit_x),
        BilinearKind::SrcX888 => scanline_src_x888_8888(dst, rows, vx, unit_x),
        BilinearKind::Over => scanline_over_8888_8888(dst, rows, vx, unit_x),
        BilinearKind::OverMask8 => scanline_over_8888_8_8888(dst, mask, rows, vx, unit_x),
        BilinearKind::OverSolidMask(m) => scanline_over_8888_n_8888(dst, m, rows, vx, unit_x),
    }
}

/// Span split for a pair of neighbouring columns: both left of the row,
/// straddling the left edge, inside, straddling the right edge, both right.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BilinearBounds {
    pub left_pad: usize,
    pub left_tz: usize,
    pub width: usize,
    pub right_tz: usize,
    pub right_pad: usize,
}

/// Split `width` pixels against a source row for the column pair at each position.
pub fn bilinear_bounds(source_width: u32, vx: i64, unit_x: i64, width: usize) -> BilinearBounds {
    let first: ScanlineBounds = pad_repeat_bounds(source_width, vx, unit_x, width);
    let second = pad_repeat_bounds(source_width, vx + i64::from(Fixed::ONE.0), unit_x, width);
    let left_pad = second.left_pad;
    let left_tz = first.left_pad - second.left_pad;
    let right_tz = second.right_pad - first.right_pad;
    let right_pad = first.right_pad;
    BilinearBounds {
        left_pad,
        left_tz,
        width: width - left_pad - left_tz - right_tz - right_pad,
        right_tz,
        right_pad,
    }
}

fn source_row(line: &[u32], stride: usize, width: usize, y: i64) -> &[u32] {
    &line[y as usize * stride..][..width]
}

/// Row loop shared by the bilinear variants.
///
/// `mask` is an `A8` line starting at the mask origin plus its stride.
pub(crate) fn composite(
    kind: BilinearKind,
    src: &Bits<'_>,
    mask: Option<(&[u8], usize)>,
    dest: &mut BitsMut<'_>,
    rect: &CompositeRect,
    params: &ScaleParams,
) {
    let (ox, oy) = params.origin(rect.src_x, rect.src_y);
    let vx = ox - i64::from(Fixed::HALF.0);
    let mut vy = oy - i64::from(Fixed::HALF.0);
    let unit_x = i64::from(params.unit_x.0);
    let unit_y = i64::from(params.unit_y.0);
    let range = K.bilinear_range();
    let (sw, sh) = (src.width() as usize, src.height() as i64);
    let (src_line, src_stride) = src.line::<u32>(0, 0);
    let (w, h) = (rect.width as usize, rect.height as usize);
    let bounds = bilinear_bounds(sw as u32, vx, unit_x, w);
    let wrap_width = (sw as i64) << 16;

    let (line, stride) = dest.line_mut::<u32>(rect.dest_x, rect.dest_y);
    for (row, d) in rows_mut(line, stride, w, h).enumerate() {
        let mask_row: &[u8] = match mask {
            Some((m, m_stride)) => &m[row * m_stride..][..w],
            None => &[],
        };
        // Edge and clear runs read two-pixel buffers and pass a zero step.
        let mut run = |start: usize, len: usize, rows: &BilinearRows<'_>, vx: i64, step: i64| {
            if len == 0 {
                return;
            }
            let m = if mask_row.is_empty() {
                mask_row
            } else {
                &mask_row[start..start + len]
            };
            span(kind, &mut d[start..start + len], m, rows, vx, step);
        };

        let mut y1 = vy >> 16;
        let wb = weight(vy);
        let (mut y2, mut wt, mut wb) = if wb != 0 {
            (y1 + 1, range - wb, wb)
        } else {
            (y1, range / 2, range / 2)
        };
        vy += unit_y;
        match params.repeat {
            Repeat::Pad => {
                y1 = y1.clamp(0, sh - 1);
                y2 = y2.clamp(0, sh - 1);
            }
            Repeat::Normal => {
                y1 = y1.rem_euclid(sh);
                y2 = y2.rem_euclid(sh);
            }
            Repeat::None => {
                if !(0..sh).contains(&y1) {
                    y1 = 0;
                    wt = 0;
                }
                if !(0..sh).contains(&y2) {
                    y2 = 0;
                    wb = 0;
                }
            }
        }
        let top = source_row(src_line, src_stride, sw, y1);
        let bottom = source_row(src_line, src_stride, sw, y2);
        let rows = BilinearRows {
            top,
            bottom,
            wt,
            wb,
        };
        match params.repeat {
            Repeat::Pad => {
                let left = bounds.left_pad + bounds.left_tz;
                let right = bounds.right_tz + bounds.right_pad;
                let lt = [top[0]; 2];
                let lb = [bottom[0]; 2];
                let rt = [top[sw - 1]; 2];
                let rb = [bottom[sw - 1]; 2];
                run(0, left, &BilinearRows { top: &lt, bottom: &lb, wt, wb }, 0, 0);
                run(left, bounds.width, &rows, vx + left as i64 * unit_x, unit_x);
                let edge = BilinearRows { top: &rt, bottom: &rb, wt, wb };
                run(left + bounds.width, right, &edge, 0, 0);
            }
            Repeat::None => {
                let zero = [0u32; 2];
                let clear = BilinearRows { top: &zero, bottom: &zero, wt, wb };
                let mut at = 0;
                run(at, bounds.left_pad, &clear, 0, 0);
                at += bounds.left_pad;

                let lt = [0, top[0]];
                let lb = [0, bottom[0]];
                let vx_at = vx + at as i64 * unit_x;
                let edge = BilinearRows { top: &lt, bottom: &lb, wt, wb };
                run(at, bounds.left_tz, &edge, vx_at & 0xffff, unit_x);
                at += bounds.left_tz;

                run(at, bounds.width, &rows, vx + at as i64 * unit_x, unit_x);
                at += bounds.width;

                let rt = [top[sw - 1], 0];
                let rb = [bottom[sw - 1], 0];
                let vx_at = vx + at as i64 * unit_x;
                let edge = BilinearRows { top: &rt, bottom: &rb, wt, wb };
                run(at, bounds.right_tz, &edge, vx_at & 0xffff, unit_x);
                at += bounds.right_tz;

                run(at, bounds.right_pad, &clear, 0, 0);
            }
            Repeat::Normal => {
                let et = [top[sw - 1], top[0]];
                let eb = [bottom[sw - 1], bottom[0]];
                let seam = BilinearRows { top: &et, bottom: &eb, wt, wb };
                let mut pos = vx;
                let mut at = 0;
                while at < w {
                    pos = pos.rem_euclid(wrap_width);
                    let remain = w - at;
                    let on_seam = (pos >> 16) as usize == sw - 1;
                    // Pixels until the left column of the pair leaves the current run.
                    let limit = if on_seam {
                        wrap_width
                    } else {
                        wrap_width - i64::from(Fixed::ONE.0)
                    };
                    let n = if unit_x == 0 {
                        remain
                    } else {
                        (((limit - pos - 1) / unit_x + 1) as usize).min(remain)
                    };
                    if on_seam {
                        run(at, n, &seam, pos & 0xffff, unit_x);
                    } else {
                        run(at, n, &rows, pos, unit_x);
                    }
                    at += n;
                    pos += n as i64 * unit_x;
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scale/bilinear.rs"]
mod tests;
