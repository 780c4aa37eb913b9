//! Composite routines: whole-rectangle loops specialized per operator and
//! source/mask/destination formats.
//!
//! Every routine has the [`CompositeFn`] shape so it can sit in the
//! [`fast_path`] table. Routines trust the table: the source and mask kinds
//! match their names and the rectangle lies inside every surface.

pub mod a8;
pub mod fast_path;
pub mod fill;
pub mod general;
pub mod solid;
pub mod source;

use crate::combine::split_aligned;
use crate::foundation::core::{Operator, PixelFormat, Rect};
use crate::image::{BitsMut, Image};
use crate::pixel::lanes::U16x16;
use crate::pixel::pack::{pack565x4, unpack565x4};

/// Placement of a composite: where the source and mask are read and which
/// destination rectangle is written.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct CompositeRect {
    pub src_x: u32,
    pub src_y: u32,
    pub mask_x: u32,
    pub mask_y: u32,
    pub dest_x: u32,
    pub dest_y: u32,
    pub width: u32,
    pub height: u32,
}

impl CompositeRect {
    /// `width` x `height` at the origin of every surface.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn src_at(mut self, x: u32, y: u32) -> Self {
        self.src_x = x;
        self.src_y = y;
        self
    }

    pub fn mask_at(mut self, x: u32, y: u32) -> Self {
        self.mask_x = x;
        self.mask_y = y;
        self
    }

    pub fn dest_at(mut self, x: u32, y: u32) -> Self {
        self.dest_x = x;
        self.dest_y = y;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn src_rect(&self) -> Rect {
        Rect::new(self.src_x, self.src_y, self.width, self.height)
    }

    pub fn mask_rect(&self) -> Rect {
        Rect::new(self.mask_x, self.mask_y, self.width, self.height)
    }

    pub fn dest_rect(&self) -> Rect {
        Rect::new(self.dest_x, self.dest_y, self.width, self.height)
    }
}

/// Resolved operands of one composite call.
#[derive(Clone, Copy, Debug)]
pub struct CompositeInfo<'a> {
    pub op: Operator,
    pub src: &'a Image<'a>,
    pub mask: Option<&'a Image<'a>>,
    pub src_x: u32,
    pub src_y: u32,
    pub mask_x: u32,
    pub mask_y: u32,
    pub dest_x: u32,
    pub dest_y: u32,
    pub width: u32,
    pub height: u32,
}

pub type CompositeFn = fn(&CompositeInfo<'_>, &mut BitsMut<'_>);

impl<'a> CompositeInfo<'a> {
    pub fn new(
        op: Operator,
        src: &'a Image<'a>,
        mask: Option<&'a Image<'a>>,
        rect: &CompositeRect,
    ) -> Self {
        Self {
            op,
            src,
            mask,
            src_x: rect.src_x,
            src_y: rect.src_y,
            mask_x: rect.mask_x,
            mask_y: rect.mask_y,
            dest_x: rect.dest_x,
            dest_y: rect.dest_y,
            width: rect.width,
            height: rect.height,
        }
    }

    /// Solid source color in `format`'s channel order; 0 when the source varies.
    pub(crate) fn solid_src(&self, format: PixelFormat) -> u32 {
        self.src.solid_pixel(format).unwrap_or(0)
    }

    /// Alpha of a solid mask; 0xff when there is no mask.
    pub(crate) fn solid_mask_alpha(&self) -> u8 {
        match self.mask {
            Some(mask) => (mask.solid_pixel(PixelFormat::A8R8G8B8).unwrap_or(0) >> 24) as u8,
            None => 0xff,
        }
    }

    pub(crate) fn src_line<P: bytemuck::Pod>(&self) -> Option<(&'a [P], usize)> {
        self.src.bits().map(|b| b.line(self.src_x, self.src_y))
    }

    pub(crate) fn mask_line<P: bytemuck::Pod>(&self) -> Option<(&'a [P], usize)> {
        self.mask
            .and_then(Image::bits)
            .map(|b| b.line(self.mask_x, self.mask_y))
    }

    pub(crate) fn dest_rect(&self) -> Rect {
        Rect::new(self.dest_x, self.dest_y, self.width, self.height)
    }

    pub(crate) fn size(&self) -> (usize, usize) {
        (self.width as usize, self.height as usize)
    }
}

/// `h` rows of `w` pixels out of a line returned by `line`/`line_mut`.
pub(crate) fn rows<P>(line: &[P], stride: usize, w: usize, h: usize) -> impl Iterator<Item = &[P]> {
    line.chunks(stride.max(1)).take(h).map(move |r| &r[..w])
}

pub(crate) fn rows_mut<P>(
    line: &mut [P],
    stride: usize,
    w: usize,
    h: usize,
) -> impl Iterator<Item = &mut [P]> {
    line.chunks_mut(stride.max(1)).take(h).map(move |r| &mut r[..w])
}

/// Walk `dst` as aligned head, `N`-pixel batches, tail. Callbacks receive the
/// index of the first pixel they cover.
#[inline(always)]
pub(crate) fn drive_dest<T, const N: usize>(
    dst: &mut [T],
    mut one: impl FnMut(usize, &mut T),
    mut many: impl FnMut(usize, &mut [T; N]),
) {
    let (head, body, tail) = split_aligned::<T, N>(dst);
    let body_start = head.len();
    let tail_start = body_start + body.len() * N;
    for (i, d) in head.iter_mut().enumerate() {
        one(i, d);
    }
    for (k, d) in body.iter_mut().enumerate() {
        many(body_start + k * N, d);
    }
    for (i, d) in tail.iter_mut().enumerate() {
        one(tail_start + i, d);
    }
}

/// `N` consecutive values of `s` starting at `at`.
#[inline(always)]
pub(crate) fn gather<T: Copy, const N: usize>(s: &[T], at: usize) -> [T; N] {
    std::array::from_fn(|k| s[at + k])
}

/// Four 8-bit values packed little-endian, for whole-batch mask tests.
#[inline(always)]
pub(crate) fn mask_word(m: [u8; 4]) -> u32 {
    u32::from_le_bytes(m)
}

#[inline(always)]
pub(crate) fn unpack565x8(p: &[u16; 8]) -> [U16x16; 2] {
    [
        unpack565x4([p[0], p[1], p[2], p[3]]),
        unpack565x4([p[4], p[5], p[6], p[7]]),
    ]
}

#[inline(always)]
pub(crate) fn pack565x8(e: [U16x16; 2]) -> [u16; 8] {
    let lo = pack565x4(e[0]);
    let hi = pack565x4(e[1]);
    [lo[0], lo[1], lo[2], lo[3], hi[0], hi[1], hi[2], hi[3]]
}

#[cfg(test)]
#[path = "../../tests/unit/composite/mod.rs"]
mod tests;
