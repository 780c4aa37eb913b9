//! Combiners whose mask contributes a single alpha per pixel.

use crate::combine::{CombineFn, drive_row};
use crate::foundation::core::Operator;
use crate::foundation::math::divide_and_round;
use crate::pixel::blend::{
    expand_alpha, is_opaque, is_transparent, is_zero, negate, over, pix_add_multiply,
    pix_multiply,
};
use crate::pixel::lanes::{PIXELS_PER_VECTOR as N, U16x4, U16x16};
use crate::pixel::pack::{pack, pack4, unpack, unpack4};

type Batch = [u32; N];

/// Source scaled by the mask's alpha.
#[inline(always)]
pub(crate) fn combine1(s: u32, m: Option<u32>) -> U16x4 {
    let s = unpack(s);
    match m {
        Some(m) => pix_multiply(s, expand_alpha(unpack(m))),
        None => s,
    }
}

#[inline(always)]
pub(crate) fn combine4(s: &Batch, m: Option<&Batch>) -> U16x16 {
    match m {
        Some(m) if is_transparent(m) => U16x16::ZERO,
        Some(m) => pix_multiply(unpack4(*s), expand_alpha(unpack4(*m))),
        None => unpack4(*s),
    }
}

/// Opaque sources replace, zero sources leave the destination alone.
#[inline(always)]
pub(crate) fn over_pixel(s: u32, d: u32) -> u32 {
    match s >> 24 {
        0xff => s,
        _ if s != 0 => {
            let s = unpack(s);
            pack(over(s, expand_alpha(s), unpack(d)))
        }
        _ => d,
    }
}

/// `y * alpha(x)` with the alpha 0 and 255 cases short-circuited.
#[inline(always)]
fn in_pixel(x: u32, y: u32) -> u32 {
    match x >> 24 {
        0 => 0,
        0xff => y,
        a => pack(pix_multiply(unpack(y), U16x4::from_alpha(a as u8))),
    }
}

#[inline(always)]
fn store(d: &mut Batch, v: U16x16) {
    *d = pack4(v);
}

/// `s*a_m`, or a plain copy without a mask.
pub fn src_u(dst: &mut [u32], src: &[u32], mask: Option<&[u32]>) {
    drive_row::<N>(
        dst,
        src,
        mask,
        |_, s, m| pack(combine1(s, m)),
        |d, s, m| match m {
            Some(_) => store(d, combine4(s, m)),
            None => *d = *s,
        },
    );
}

/// `s + d*(1-a_s)` with `s` scaled by the mask alpha.
pub fn over_u(dst: &mut [u32], src: &[u32], mask: Option<&[u32]>) {
    drive_row::<N>(
        dst,
        src,
        mask,
        |d, s, m| over_pixel(pack(combine1(s, m)), d),
        |d, s, m| match m {
            Some(m) => {
                if is_zero(m) {
                    return;
                }
                let both = [s[0] & m[0], s[1] & m[1], s[2] & m[2], s[3] & m[3]];
                if is_opaque(&both) {
                    *d = *s;
                    return;
                }
                let s = pix_multiply(unpack4(*s), expand_alpha(unpack4(*m)));
                store(d, over(s, expand_alpha(s), unpack4(*d)));
            }
            None => {
                if is_zero(s) {
                    return;
                }
                if is_opaque(s) {
                    *d = *s;
                    return;
                }
                let s = unpack4(*s);
                store(d, over(s, expand_alpha(s), unpack4(*d)));
            }
        },
    );
}

/// `d + s*(1-a_d)`.
pub fn over_reverse_u(dst: &mut [u32], src: &[u32], mask: Option<&[u32]>) {
    drive_row::<N>(
        dst,
        src,
        mask,
        |d, s, m| over_pixel(d, pack(combine1(s, m))),
        |d, s, m| {
            let s = combine4(s, m);
            let dd = unpack4(*d);
            store(d, over(dd, expand_alpha(dd), s));
        },
    );
}

/// `s*a_d`.
pub fn in_u(dst: &mut [u32], src: &[u32], mask: Option<&[u32]>) {
    drive_row::<N>(
        dst,
        src,
        mask,
        |d, s, m| in_pixel(d, pack(combine1(s, m))),
        |d, s, m| {
            let s = combine4(s, m);
            store(d, pix_multiply(s, expand_alpha(unpack4(*d))));
        },
    );
}

/// `d*a_s`.
pub fn in_reverse_u(dst: &mut [u32], src: &[u32], mask: Option<&[u32]>) {
    drive_row::<N>(
        dst,
        src,
        mask,
        |d, s, m| in_pixel(pack(combine1(s, m)), d),
        |d, s, m| {
            let s = combine4(s, m);
            store(d, pix_multiply(unpack4(*d), expand_alpha(s)));
        },
    );
}

/// `s*(1-a_d)`.
pub fn out_u(dst: &mut [u32], src: &[u32], mask: Option<&[u32]>) {
    drive_row::<N>(
        dst,
        src,
        mask,
        |d, s, m| {
            let s = combine1(s, m);
            pack(pix_multiply(s, negate(expand_alpha(unpack(d)))))
        },
        |d, s, m| {
            let s = combine4(s, m);
            store(d, pix_multiply(s, negate(expand_alpha(unpack4(*d)))));
        },
    );
}

/// `d*(1-a_s)`.
pub fn out_reverse_u(dst: &mut [u32], src: &[u32], mask: Option<&[u32]>) {
    drive_row::<N>(
        dst,
        src,
        mask,
        |d, s, m| {
            let s = combine1(s, m);
            pack(pix_multiply(unpack(d), negate(expand_alpha(s))))
        },
        |d, s, m| {
            let s = combine4(s, m);
            store(d, pix_multiply(unpack4(*d), negate(expand_alpha(s))));
        },
    );
}

/// `s*a_d + d*(1-a_s)`.
pub fn atop_u(dst: &mut [u32], src: &[u32], mask: Option<&[u32]>) {
    drive_row::<N>(
        dst,
        src,
        mask,
        |d, s, m| {
            let s = combine1(s, m);
            let d = unpack(d);
            pack(pix_add_multiply(s, expand_alpha(d), d, negate(expand_alpha(s))))
        },
        |d, s, m| {
            let s = combine4(s, m);
            let dd = unpack4(*d);
            store(
                d,
                pix_add_multiply(s, expand_alpha(dd), dd, negate(expand_alpha(s))),
            );
        },
    );
}

/// `d*a_s + s*(1-a_d)`.
pub fn atop_reverse_u(dst: &mut [u32], src: &[u32], mask: Option<&[u32]>) {
    drive_row::<N>(
        dst,
        src,
        mask,
        |d, s, m| {
            let s = combine1(s, m);
            let d = unpack(d);
            pack(pix_add_multiply(s, negate(expand_alpha(d)), d, expand_alpha(s)))
        },
        |d, s, m| {
            let s = combine4(s, m);
            let dd = unpack4(*d);
            store(
                d,
                pix_add_multiply(s, negate(expand_alpha(dd)), dd, expand_alpha(s)),
            );
        },
    );
}

/// `s*(1-a_d) + d*(1-a_s)`.
pub fn xor_u(dst: &mut [u32], src: &[u32], mask: Option<&[u32]>) {
    drive_row::<N>(
        dst,
        src,
        mask,
        |d, s, m| {
            let s = combine1(s, m);
            let d = unpack(d);
            pack(pix_add_multiply(
                s,
                negate(expand_alpha(d)),
                d,
                negate(expand_alpha(s)),
            ))
        },
        |d, s, m| {
            let s = combine4(s, m);
            let dd = unpack4(*d);
            store(
                d,
                pix_add_multiply(s, negate(expand_alpha(dd)), dd, negate(expand_alpha(s))),
            );
        },
    );
}

/// Saturating `s + d`.
pub fn add_u(dst: &mut [u32], src: &[u32], mask: Option<&[u32]>) {
    drive_row::<N>(
        dst,
        src,
        mask,
        |d, s, m| pack(combine1(s, m).adds(unpack(d))),
        |d, s, m| {
            let s = combine4(s, m);
            store(d, s.adds(unpack4(*d)));
        },
    );
}

/// Adds the source, scaled down first when its alpha exceeds the
/// destination's remaining headroom.
#[inline(always)]
pub(crate) fn saturate_pixel(s: u32, d: u32) -> u32 {
    let sa = (s >> 24) as u8;
    let da = (!d >> 24) as u8;
    let s = unpack(s);
    let s = if sa > da {
        pix_multiply(s, U16x4::from_alpha(divide_and_round(da, sa)))
    } else {
        s
    };
    pack(s.adds(unpack(d)))
}

/// `d + s*min(1, (1-a_d)/a_s)`; a batch in which any source needs scaling
/// runs one pixel at a time.
pub fn saturate_u(dst: &mut [u32], src: &[u32], mask: Option<&[u32]>) {
    drive_row::<N>(
        dst,
        src,
        mask,
        |d, s, m| saturate_pixel(pack(combine1(s, m)), d),
        |d, s, m| {
            let s = pack4(combine4(s, m));
            let needs_scale = s
                .iter()
                .zip(d.iter())
                .any(|(&s, &d)| (s >> 24) > (!d >> 24));
            if needs_scale {
                for (d, s) in d.iter_mut().zip(s) {
                    *d = saturate_pixel(s, *d);
                }
            } else {
                store(d, unpack4(s).adds(unpack4(*d)));
            }
        },
    );
}

pub(crate) fn lookup(op: Operator) -> CombineFn {
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

#[cfg(test)]
#[path = "../../tests/unit/combine/unified.rs"]
mod tests;
