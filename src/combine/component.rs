//! Component-alpha combiners: the mask carries one coverage value per channel.
//!
//! A missing mask row means full coverage on every channel.

use crate::combine::{CombineFn, drive_row};
use crate::combine::reference::saturate_ca_pixel;
use crate::foundation::core::Operator;
use crate::pixel::blend::{expand_alpha, in_over, negate, over, pix_add_multiply, pix_multiply};
use crate::pixel::lanes::{PIXELS_PER_VECTOR as N, U16Lanes};
use crate::pixel::pack::{pack, pack4, unpack, unpack4};

const FULL: u32 = 0xffff_ffff;

type Kernel<const L: usize> = fn(U16Lanes<L>, U16Lanes<L>, U16Lanes<L>) -> U16Lanes<L>;

/// Apply `(src, mask, dst) -> dst` kernels across a row.
#[inline(always)]
fn ca_row(
    dst: &mut [u32],
    src: &[u32],
    mask: Option<&[u32]>,
    one: Kernel<4>,
    many: Kernel<16>,
) {
    drive_row::<N>(
        dst,
        src,
        mask,
        |d, s, m| pack(one(unpack(s), unpack(m.unwrap_or(FULL)), unpack(d))),
        |d, s, m| {
            let m = m.copied().unwrap_or([FULL; N]);
            *d = pack4(many(unpack4(*s), unpack4(m), unpack4(*d)));
        },
    );
}

#[inline(always)]
fn src_kernel<const L: usize>(s: U16Lanes<L>, m: U16Lanes<L>, _d: U16Lanes<L>) -> U16Lanes<L> {
    pix_multiply(s, m)
}

#[inline(always)]
fn over_kernel<const L: usize>(s: U16Lanes<L>, m: U16Lanes<L>, d: U16Lanes<L>) -> U16Lanes<L> {
    in_over(s, expand_alpha(s), m, d)
}

#[inline(always)]
fn over_reverse_kernel<const L: usize>(
    s: U16Lanes<L>,
    m: U16Lanes<L>,
    d: U16Lanes<L>,
) -> U16Lanes<L> {
    over(d, expand_alpha(d), pix_multiply(s, m))
}

#[inline(always)]
fn in_kernel<const L: usize>(s: U16Lanes<L>, m: U16Lanes<L>, d: U16Lanes<L>) -> U16Lanes<L> {
    pix_multiply(pix_multiply(s, m), expand_alpha(d))
}

#[inline(always)]
fn in_reverse_kernel<const L: usize>(
    s: U16Lanes<L>,
    m: U16Lanes<L>,
    d: U16Lanes<L>,
) -> U16Lanes<L> {
    pix_multiply(d, pix_multiply(m, expand_alpha(s)))
}

#[inline(always)]
fn out_kernel<const L: usize>(s: U16Lanes<L>, m: U16Lanes<L>, d: U16Lanes<L>) -> U16Lanes<L> {
    pix_multiply(pix_multiply(s, m), negate(expand_alpha(d)))
}

#[inline(always)]
fn out_reverse_kernel<const L: usize>(
    s: U16Lanes<L>,
    m: U16Lanes<L>,
    d: U16Lanes<L>,
) -> U16Lanes<L> {
    pix_multiply(d, negate(pix_multiply(m, expand_alpha(s))))
}

#[inline(always)]
fn atop_kernel<const L: usize>(s: U16Lanes<L>, m: U16Lanes<L>, d: U16Lanes<L>) -> U16Lanes<L> {
    let sm = pix_multiply(s, m);
    let ma = negate(pix_multiply(m, expand_alpha(s)));
    pix_add_multiply(d, ma, sm, expand_alpha(d))
}

#[inline(always)]
fn atop_reverse_kernel<const L: usize>(
    s: U16Lanes<L>,
    m: U16Lanes<L>,
    d: U16Lanes<L>,
) -> U16Lanes<L> {
    let sm = pix_multiply(s, m);
    let ma = pix_multiply(m, expand_alpha(s));
    pix_add_multiply(d, ma, sm, negate(expand_alpha(d)))
}

#[inline(always)]
fn xor_kernel<const L: usize>(s: U16Lanes<L>, m: U16Lanes<L>, d: U16Lanes<L>) -> U16Lanes<L> {
    let sm = pix_multiply(s, m);
    let ma = negate(pix_multiply(m, expand_alpha(s)));
    pix_add_multiply(d, ma, sm, negate(expand_alpha(d)))
}

#[inline(always)]
fn add_kernel<const L: usize>(s: U16Lanes<L>, m: U16Lanes<L>, d: U16Lanes<L>) -> U16Lanes<L> {
    pix_multiply(s, m).adds(d)
}

/// `s*m` per channel.
pub fn src_ca(dst: &mut [u32], src: &[u32], mask: Option<&[u32]>) {
    ca_row(dst, src, mask, src_kernel::<4>, src_kernel::<16>);
}

/// OVER with a per-channel mask.
pub fn over_ca(dst: &mut [u32], src: &[u32], mask: Option<&[u32]>) {
    ca_row(dst, src, mask, over_kernel::<4>, over_kernel::<16>);
}

/// OVER_REVERSE with a per-channel mask.
pub fn over_reverse_ca(dst: &mut [u32], src: &[u32], mask: Option<&[u32]>) {
    ca_row(
        dst,
        src,
        mask,
        over_reverse_kernel::<4>,
        over_reverse_kernel::<16>,
    );
}

/// IN with a per-channel mask.
pub fn in_ca(dst: &mut [u32], src: &[u32], mask: Option<&[u32]>) {
    ca_row(dst, src, mask, in_kernel::<4>, in_kernel::<16>);
}

/// IN_REVERSE: `d` scaled per channel by `a_s*m`.
pub fn in_reverse_ca(dst: &mut [u32], src: &[u32], mask: Option<&[u32]>) {
    ca_row(dst, src, mask, in_reverse_kernel::<4>, in_reverse_kernel::<16>);
}

/// OUT with a per-channel mask.
pub fn out_ca(dst: &mut [u32], src: &[u32], mask: Option<&[u32]>) {
    ca_row(dst, src, mask, out_kernel::<4>, out_kernel::<16>);
}

/// OUT_REVERSE: `d` scaled per channel by `1 - a_s*m`.
pub fn out_reverse_ca(dst: &mut [u32], src: &[u32], mask: Option<&[u32]>) {
    ca_row(
        dst,
        src,
        mask,
        out_reverse_kernel::<4>,
        out_reverse_kernel::<16>,
    );
}

/// ATOP with a per-channel mask.
pub fn atop_ca(dst: &mut [u32], src: &[u32], mask: Option<&[u32]>) {
    ca_row(dst, src, mask, atop_kernel::<4>, atop_kernel::<16>);
}

/// ATOP_REVERSE with a per-channel mask.
pub fn atop_reverse_ca(dst: &mut [u32], src: &[u32], mask: Option<&[u32]>) {
    ca_row(
        dst,
        src,
        mask,
        atop_reverse_kernel::<4>,
        atop_reverse_kernel::<16>,
    );
}

/// XOR with a per-channel mask.
pub fn xor_ca(dst: &mut [u32], src: &[u32], mask: Option<&[u32]>) {
    ca_row(dst, src, mask, xor_kernel::<4>, xor_kernel::<16>);
}

/// Saturating `s*m + d`.
pub fn add_ca(dst: &mut [u32], src: &[u32], mask: Option<&[u32]>) {
    ca_row(dst, src, mask, add_kernel::<4>, add_kernel::<16>);
}

/// Per-channel saturate has no batch formulation; batches run the pixel rule.
pub fn saturate_ca(dst: &mut [u32], src: &[u32], mask: Option<&[u32]>) {
    drive_row::<N>(
        dst,
        src,
        mask,
        |d, s, m| saturate_ca_pixel(s, m.unwrap_or(FULL), d),
        |d, s, m| {
            let m = m.copied().unwrap_or([FULL; N]);
            for ((d, &s), &m) in d.iter_mut().zip(s).zip(&m) {
                *d = saturate_ca_pixel(s, m, *d);
            }
        },
    );
}

pub(crate) fn lookup(op: Operator) -> CombineFn {
    match op {
        Operator::Src => src_ca,
        Operator::Over => over_ca,
        Operator::OverReverse => over_reverse_ca,
        Operator::In => in_ca,
        Operator::InReverse => in_reverse_ca,
        Operator::Out => out_ca,
        Operator::OutReverse => out_reverse_ca,
        Operator::Atop => atop_ca,
        Operator::AtopReverse => atop_reverse_ca,
        Operator::Xor => xor_ca,
        Operator::Add => add_ca,
        Operator::Saturate => saturate_ca,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/combine/component.rs"]
mod tests;
