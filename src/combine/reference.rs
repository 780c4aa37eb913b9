//! One-pixel-at-a-time combiners built directly on the 8-bit channel math.
//!
//! These loops define the expected output of every vectorized combiner.

use crate::combine::{CombineFn, scalar_span};
use crate::foundation::core::Operator;
use crate::foundation::math::{
    add_mul_un8x4, add_un8x4, alpha_of, channel, divide_and_round, mul_un8x4, mul_un8x4_un8,
    premultiply_round,
};

const FULL: u32 = 0xffff_ffff;

#[inline(always)]
fn masked(s: u32, m: Option<u32>) -> u32 {
    match m {
        Some(m) => mul_un8x4_un8(s, alpha_of(m)),
        None => s,
    }
}

/// Uniform-coverage result for one pixel.
pub fn unified_pixel(op: Operator, s: u32, m: Option<u32>, d: u32) -> u32 {
    let s = masked(s, m);
    let sa = alpha_of(s);
    let da = alpha_of(d);
    match op {
        Operator::Src => s,
        Operator::Over => add_un8x4(s, mul_un8x4_un8(d, !sa)),
        Operator::OverReverse => add_un8x4(d, mul_un8x4_un8(s, !da)),
        Operator::In => mul_un8x4_un8(s, da),
        Operator::InReverse => mul_un8x4_un8(d, sa),
        Operator::Out => mul_un8x4_un8(s, !da),
        Operator::OutReverse => mul_un8x4_un8(d, !sa),
        Operator::Atop => add_un8x4(mul_un8x4_un8(s, da), mul_un8x4_un8(d, !sa)),
        Operator::AtopReverse => add_un8x4(mul_un8x4_un8(s, !da), mul_un8x4_un8(d, sa)),
        Operator::Xor => add_un8x4(mul_un8x4_un8(s, !da), mul_un8x4_un8(d, !sa)),
        Operator::Add => add_un8x4(s, d),
        Operator::Saturate => {
            let headroom = !da;
            let s = if sa > headroom {
                mul_un8x4_un8(s, divide_and_round(headroom, sa))
            } else {
                s
            };
            add_un8x4(d, s)
        }
    }
}

/// Component-alpha result for one pixel; `m` is the per-channel coverage.
pub fn component_pixel(op: Operator, s: u32, m: u32, d: u32) -> u32 {
    let sa = alpha_of(s);
    let da = alpha_of(d);
    let sm = mul_un8x4(s, m);
    let ma = mul_un8x4_un8(m, sa);
    match op {
        Operator::Src => sm,
        Operator::Over => add_un8x4(sm, mul_un8x4(d, !ma)),
        Operator::OverReverse => add_un8x4(d, mul_un8x4_un8(sm, !da)),
        Operator::In => mul_un8x4_un8(sm, da),
        Operator::InReverse => mul_un8x4(d, ma),
        Operator::Out => mul_un8x4_un8(sm, !da),
        Operator::OutReverse => mul_un8x4(d, !ma),
        Operator::Atop => add_mul_un8x4(d, !ma, sm, splat(da)),
        Operator::AtopReverse => add_mul_un8x4(d, ma, sm, splat(!da)),
        Operator::Xor => add_mul_un8x4(d, !ma, sm, splat(!da)),
        Operator::Add => add_un8x4(sm, d),
        Operator::Saturate => saturate_ca_pixel(s, m, d),
    }
}

fn splat(a: u8) -> u32 {
    u32::from(a) * 0x0101_0101
}

/// Per channel: add while the scaled coverage fits the destination's alpha
/// headroom, otherwise scale the source channel by `headroom / coverage`.
pub(crate) fn saturate_ca_pixel(s: u32, m: u32, d: u32) -> u32 {
    let (s, m) = match m {
        0 => (0, 0),
        FULL => (s, splat(alpha_of(s))),
        m => (mul_un8x4(s, m), mul_un8x4_un8(m, alpha_of(s))),
    };
    let headroom = u32::from(!alpha_of(d));
    let mut out = 0u32;
    for shift in [0, 8, 16, 24] {
        let sc = channel(s, shift);
        let mc = u32::from(channel(m, shift));
        let dc = channel(d, shift);
        let v = if mc <= headroom {
            dc.saturating_add(sc)
        } else {
            let scale = ((headroom << 8) / mc) as u8;
            let t = u32::from(premultiply_round(dc, 0xff)) + u32::from(premultiply_round(sc, scale));
            t.min(0xff) as u8
        };
        out |= u32::from(v) << shift;
    }
    out
}

macro_rules! reference_rows {
    ($($name:ident => $op:expr, $kind:ident;)*) => {
        $(
            fn $name(dst: &mut [u32], src: &[u32], mask: Option<&[u32]>) {
                reference_rows!(@row $kind, $op, dst, src, mask);
            }
        )*
    };
    (@row unified, $op:expr, $dst:ident, $src:ident, $mask:ident) => {
        let w = $dst.len();
        scalar_span(
            $dst,
            &$src[..w],
            $mask.map(|m| &m[..w]),
            &|d: u32, s: u32, m: Option<u32>| unified_pixel($op, s, m, d),
        );
    };
    (@row component, $op:expr, $dst:ident, $src:ident, $mask:ident) => {
        let w = $dst.len();
        scalar_span(
            $dst,
            &$src[..w],
            $mask.map(|m| &m[..w]),
            &|d: u32, s: u32, m: Option<u32>| {
                component_pixel($op, s, m.unwrap_or(FULL), d)
            },
        );
    };
}

reference_rows! {
    src_u => Operator::Src, unified;
    over_u => Operator::Over, unified;
    over_reverse_u => Operator::OverReverse, unified;
    in_u => Operator::In, unified;
    in_reverse_u => Operator::InReverse, unified;
    out_u => Operator::Out, unified;
    out_reverse_u => Operator::OutReverse, unified;
    atop_u => Operator::Atop, unified;
    atop_reverse_u => Operator::AtopReverse, unified;
    xor_u => Operator::Xor, unified;
    add_u => Operator::Add, unified;
    saturate_u => Operator::Saturate, unified;
    src_ca => Operator::Src, component;
    over_ca => Operator::Over, component;
    over_reverse_ca => Operator::OverReverse, component;
    in_ca => Operator::In, component;
    in_reverse_ca => Operator::InReverse, component;
    out_ca => Operator::Out, component;
    out_reverse_ca => Operator::OutReverse, component;
    atop_ca => Operator::Atop, component;
    atop_reverse_ca => Operator::AtopReverse, component;
    xor_ca => Operator::Xor, component;
    add_ca => Operator::Add, component;
    saturate_ca => Operator::Saturate, component;
}

pub(crate) fn lookup_unified(op: Operator) -> CombineFn {
    match op {
        Operator::Src => src_u,
        Operator::Over => over_u,
        Operator::OverReverse => over_reverse_u,
        Operator::In => in_u,
        Operator::InReverse => in_reverse_u,
        Operator::Out => out_u,
        Operator::OutReverse => out_reverse_u,
        Operator::Atop => atop_u,
        Operator::AtopReverse => atop_reverse_u,
        Operator::Xor => xor_u,
        Operator::Add => add_u,
        Operator::Saturate => saturate_u,
    }
}

pub(crate) fn lookup_component(op: Operator) -> CombineFn {
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
#[path = "../../tests/unit/combine/reference.rs"]
mod tests;
