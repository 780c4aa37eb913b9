//! Nearest-neighbour scaled OVER.

use crate::combine::unified::over_pixel;
use crate::composite::{CompositeRect, drive_dest, rows_mut};
use crate::foundation::core::{Fixed, Repeat};
use crate::image::{Bits, BitsMut};
use crate::pixel::blend::{expand_alpha, in_over, is_opaque, is_zero, over};
use crate::pixel::lanes::{U16x4, U16x16};
use crate::pixel::pack::{pack, pack4, unpack, unpack4};
use crate::scale::{ScaleParams, pad_repeat_bounds};

/// Horizontal walk through one source row, in 16.16 units.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NearestStep {
    pub vx: i64,
    pub unit_x: i64,
    /// Row width to wrap positions at; `None` when every position is in range.
    pub wrap: Option<u32>,
}

impl NearestStep {
    /// Every pixel reads column `x`.
    pub fn fixed(x: u32) -> Self {
        Self {
            vx: i64::from(x) << 16,
            unit_x: 0,
            wrap: None,
        }
    }

    /// Source column read by pixel `i` of the span.
    #[inline(always)]
    pub fn index(&self, i: usize) -> usize {
        let pos = self.vx + i as i64 * self.unit_x;
        let pos = match self.wrap {
            Some(w) => pos.rem_euclid(i64::from(w) << 16),
            None => pos,
        };
        (pos >> 16) as usize
    }
}

/// OVER the sampled source pixels onto `dst`.
pub fn scanline_over_8888_8888(dst: &mut [u32], src: &[u32], step: NearestStep) {
    drive_dest::<u32, 4>(
        dst,
        |i, d| *d = over_pixel(src[step.index(i)], *d),
        |i, d| {
            let s: [u32; 4] = std::array::from_fn(|k| src[step.index(i + k)]);
            if is_zero(&s) {
                return;
            }
            if is_opaque(&s) {
                *d = s;
                return;
            }
            let p = unpack4(s);
            *d = pack4(over(p, expand_alpha(p), unpack4(*d)));
        },
    );
}

/// OVER the sampled pixels scaled by a constant mask alpha.
pub fn scanline_over_8888_n_8888(dst: &mut [u32], src: &[u32], step: NearestStep, mask: u8) {
    if mask == 0 {
        return;
    }
    let m_one = U16x4::from_alpha(mask);
    let m_many = U16x16::broadcast(m_one);
    drive_dest::<u32, 4>(
        dst,
        |i, d| {
            let s = src[step.index(i)];
            if s != 0 {
                let p = unpack(s);
                *d = pack(in_over(p, expand_alpha(p), m_one, unpack(*d)));
            }
        },
        |i, d| {
            let s: [u32; 4] = std::array::from_fn(|k| src[step.index(i + k)]);
            if !is_zero(&s) {
                let p = unpack4(s);
                *d = pack4(in_over(p, expand_alpha(p), m_many, unpack4(*d)));
            }
        },
    );
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum NearestKind {
    Over,
    OverSolidMask(u8),
}

fn span(kind: NearestKind, dst: &mut [u32], src: &[u32], step: NearestStep) {
    if dst.is_empty() {
        return;
    }
    match kind {
        NearestKind::Over => scanline_over_8888_8888(dst, src, step),
        NearestKind::OverSolidMask(m) => scanline_over_8888_n_8888(dst, src, step, m),
    }
}

/// Row loop shared by the nearest variants. Transparent samples outside the
/// source under [`Repeat::None`] leave the destination untouched.
pub(crate) fn composite(
    kind: NearestKind,
    src: &Bits<'_>,
    dest: &mut BitsMut<'_>,
    rect: &CompositeRect,
    params: &ScaleParams,
) {
    let (ox, oy) = params.origin(rect.src_x, rect.src_y);
    let vx = ox - i64::from(Fixed::EPSILON.0);
    let mut vy = oy - i64::from(Fixed::EPSILON.0);
    let unit_x = i64::from(params.unit_x.0);
    let unit_y = i64::from(params.unit_y.0);
    let (sw, sh) = (src.width(), src.height());
    let (src_line, src_stride) = src.line::<u32>(0, 0);
    let (w, h) = (rect.width as usize, rect.height as usize);
    let bounds = pad_repeat_bounds(sw, vx, unit_x, w);

    let (line, stride) = dest.line_mut::<u32>(rect.dest_x, rect.dest_y);
    for d in rows_mut(line, stride, w, h) {
        let y = vy >> 16;
        vy += unit_y;
        let y = match params.repeat {
            Repeat::Normal => y.rem_euclid(i64::from(sh)),
            Repeat::Pad => y.clamp(0, i64::from(sh) - 1),
            Repeat::None if (0..i64::from(sh)).contains(&y) => y,
            Repeat::None => continue,
        };
        let row = &src_line[y as usize * src_stride..][..sw as usize];

        if params.repeat == Repeat::Normal {
            let step = NearestStep {
                vx: vx.rem_euclid(i64::from(sw) << 16),
                unit_x,
                wrap: Some(sw),
            };
            span(kind, d, row, step);
            continue;
        }

        let (left, rest) = d.split_at_mut(bounds.left_pad);
        let (middle, right) = rest.split_at_mut(bounds.width);
        if params.repeat == Repeat::Pad {
            span(kind, left, row, NearestStep::fixed(0));
            span(kind, right, row, NearestStep::fixed(sw - 1));
        }
        let step = NearestStep {
            vx: vx + bounds.left_pad as i64 * unit_x,
            unit_x,
            wrap: None,
        };
        span(kind, middle, row, step);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scale/nearest.rs"]
mod tests;
