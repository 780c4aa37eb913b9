//! Row combiners: one function per (operator, coverage mode).
//!
//! Every combiner walks a destination row in three segments: single pixels up
//! to the first 16-byte boundary of the destination, whole vector batches, then
//! single pixels for the remainder. The per-pixel result depends only on that
//! pixel's source, mask and destination values, so the split never changes the
//! output. [`reference`] holds the one-pixel-at-a-time loops every vector
//! combiner is checked against.

pub mod component;
pub mod reference;
pub mod unified;

use crate::foundation::core::{CoverageMode, Operator};
use crate::pixel::lanes::VECTOR_BYTES;

/// Combine `src` (and optionally `mask`) into `dst` in place.
///
/// `src` and `mask` must hold at least `dst.len()` pixels.
pub type CombineFn = fn(dst: &mut [u32], src: &[u32], mask: Option<&[u32]>);

/// Split `row` into an unaligned head, `N`-element batches starting on a
/// [`VECTOR_BYTES`] boundary, and a short tail.
#[inline(always)]
pub(crate) fn split_aligned<T, const N: usize>(row: &mut [T]) -> (&mut [T], &mut [[T; N]], &mut [T]) {
    let head = row.as_ptr().align_offset(VECTOR_BYTES).min(row.len());
    let (head, rest) = row.split_at_mut(head);
    let (body, tail) = rest.as_chunks_mut::<N>();
    (head, body, tail)
}

/// Row driver shared by all 32 bpp combiners.
///
/// `one` maps `(dst, src, mask)` of a single pixel to the new destination value;
/// `many` updates one batch in place.
#[inline(always)]
pub(crate) fn drive_row<const N: usize>(
    dst: &mut [u32],
    src: &[u32],
    mask: Option<&[u32]>,
    one: impl Fn(u32, u32, Option<u32>) -> u32,
    many: impl Fn(&mut [u32; N], &[u32; N], Option<&[u32; N]>),
) {
    let w = dst.len();
    let src = &src[..w];
    let mask = mask.map(|m| &m[..w]);

    let (head, body, tail) = split_aligned::<u32, N>(dst);
    let body_start = head.len();
    let tail_start = body_start + body.len() * N;

    scalar_span(head, &src[..body_start], mask.map(|m| &m[..body_start]), &one);

    let (src_body, _) = src[body_start..tail_start].as_chunks::<N>();
    match mask {
        Some(m) => {
            let (mask_body, _) = m[body_start..tail_start].as_chunks::<N>();
            for ((d, s), m) in body.iter_mut().zip(src_body).zip(mask_body) {
                many(d, s, Some(m));
            }
        }
        None => {
            for (d, s) in body.iter_mut().zip(src_body) {
                many(d, s, None);
            }
        }
    }

    scalar_span(tail, &src[tail_start..], mask.map(|m| &m[tail_start..]), &one);
}

#[inline(always)]
pub(crate) fn scalar_span(
    dst: &mut [u32],
    src: &[u32],
    mask: Option<&[u32]>,
    one: &impl Fn(u32, u32, Option<u32>) -> u32,
) {
    match mask {
        Some(m) => {
            for ((d, &s), &m) in dst.iter_mut().zip(src).zip(m) {
                *d = one(*d, s, Some(m));
            }
        }
        None => {
            for (d, &s) in dst.iter_mut().zip(src) {
                *d = one(*d, s, None);
            }
        }
    }
}

/// Vectorized combiner for `op` in `mode`.
pub fn combiner(op: Operator, mode: CoverageMode) -> CombineFn {
    match mode {
        CoverageMode::Uniform => unified::lookup(op),
        CoverageMode::Component => component::lookup(op),
    }
}

/// One-pixel-at-a-time combiner for `op` in `mode`.
pub fn reference_combiner(op: Operator, mode: CoverageMode) -> CombineFn {
    match mode {
        CoverageMode::Uniform => reference::lookup_unified(op),
        CoverageMode::Component => reference::lookup_component(op),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/combine/mod.rs"]
mod tests;
