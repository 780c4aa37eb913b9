//! Unsigned 8-bit channel arithmetic shared by the scalar reference loops and the lane code.

/// `round(channel * alpha / 255)` using the `+0x80` bias and `* 0x0101 >> 16` trick.
///
/// The result differs from a naive `channel * alpha / 255` at boundary values; every
/// combiner relies on this exact rounding.
#[inline(always)]
pub fn premultiply_round(channel: u8, alpha: u8) -> u8 {
    let t = u32::from(channel) * u32::from(alpha) + 0x80;
    ((t * 0x0101) >> 16) as u8
}

/// `round(a * 255 / b)` with round-half-up, clamped to 255. `b == 0` yields 255.
#[inline(always)]
pub fn divide_and_round(a: u8, b: u8) -> u8 {
    if b == 0 {
        return 0xff;
    }
    let b = u32::from(b);
    let q = (u32::from(a) * 0xff + b / 2) / b;
    q.min(0xff) as u8
}

#[inline(always)]
pub fn clamped_add(a: u8, b: u8) -> u8 {
    a.saturating_add(b)
}

#[inline(always)]
pub(crate) fn alpha_of(p: u32) -> u8 {
    (p >> 24) as u8
}

#[inline(always)]
pub(crate) fn channel(p: u32, shift: u32) -> u8 {
    (p >> shift) as u8
}

/// Apply `f` to each of the four 8-bit channels of `x` and `y`.
#[inline(always)]
pub(crate) fn map_channels2(x: u32, y: u32, mut f: impl FnMut(u8, u8) -> u8) -> u32 {
    let mut out = 0u32;
    for shift in [0, 8, 16, 24] {
        out |= u32::from(f(channel(x, shift), channel(y, shift))) << shift;
    }
    out
}

/// Every channel of `x` multiplied by the scalar `a`.
#[inline(always)]
pub(crate) fn mul_un8x4_un8(x: u32, a: u8) -> u32 {
    map_channels2(x, 0, |c, _| premultiply_round(c, a))
}

/// Channel-wise product of `x` and `a`.
#[inline(always)]
pub(crate) fn mul_un8x4(x: u32, a: u32) -> u32 {
    map_channels2(x, a, premultiply_round)
}

/// Channel-wise saturating sum.
#[inline(always)]
pub(crate) fn add_un8x4(x: u32, y: u32) -> u32 {
    map_channels2(x, y, clamped_add)
}

/// `x * a + y * b` per channel, each product rounded, sum saturated.
#[inline(always)]
pub(crate) fn add_mul_un8x4(x: u32, a: u32, y: u32, b: u32) -> u32 {
    add_un8x4(mul_un8x4(x, a), mul_un8x4(y, b))
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
