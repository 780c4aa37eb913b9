//! Blend kernels shared by every combiner and composite routine.
//!
//! All kernels are generic over the number of lanes so the same formula serves
//! one pixel (`U16x4`) and a vector batch (`U16x16`).

use crate::pixel::constants::K;
use crate::pixel::lanes::U16Lanes;

#[inline(always)]
pub fn expand_alpha<const N: usize>(p: U16Lanes<N>) -> U16Lanes<N> {
    p.expand_alpha()
}

#[inline(always)]
pub fn negate<const N: usize>(p: U16Lanes<N>) -> U16Lanes<N> {
    p.negate()
}

#[inline(always)]
pub fn invert_colors<const N: usize>(p: U16Lanes<N>) -> U16Lanes<N> {
    p.invert_colors()
}

#[inline(always)]
pub fn pix_multiply<const N: usize>(a: U16Lanes<N>, b: U16Lanes<N>) -> U16Lanes<N> {
    a.mul_round(b)
}

/// `s * a_d + d * a_s`, sum saturated.
#[inline(always)]
pub fn pix_add_multiply<const N: usize>(
    s: U16Lanes<N>,
    a_d: U16Lanes<N>,
    d: U16Lanes<N>,
    a_s: U16Lanes<N>,
) -> U16Lanes<N> {
    pix_multiply(s, a_d).adds(pix_multiply(d, a_s))
}

/// `src + dst * (1 - src_alpha)`.
#[inline(always)]
pub fn over<const N: usize>(
    src: U16Lanes<N>,
    src_alpha: U16Lanes<N>,
    dst: U16Lanes<N>,
) -> U16Lanes<N> {
    src.adds(pix_multiply(dst, negate(src_alpha)))
}

/// [`over`] after scaling both source and source alpha by `mask`.
#[inline(always)]
pub fn in_over<const N: usize>(
    src: U16Lanes<N>,
    src_alpha: U16Lanes<N>,
    mask: U16Lanes<N>,
    dst: U16Lanes<N>,
) -> U16Lanes<N> {
    over(pix_multiply(src, mask), pix_multiply(src_alpha, mask), dst)
}

/// OVER for a non-premultiplied source stored in the opposite channel order.
///
/// Colors are swapped into destination order and premultiplied by the source's
/// own alpha; the alpha lane itself is left unscaled.
#[inline(always)]
pub fn over_rev_non_pre<const N: usize>(src: U16Lanes<N>, dst: U16Lanes<N>) -> U16Lanes<N> {
    let alpha = expand_alpha(src);
    over(
        pix_multiply(invert_colors(src), alpha.with_opaque_alpha()),
        alpha,
        dst,
    )
}

/// Swapped and premultiplied form of a non-premultiplied pixel.
#[inline(always)]
pub fn premultiply_rev<const N: usize>(src: U16Lanes<N>) -> U16Lanes<N> {
    pix_multiply(invert_colors(src), expand_alpha(src).with_opaque_alpha())
}

#[inline(always)]
pub fn is_opaque(p: &[u32; 4]) -> bool {
    p.iter().all(|&v| v & K.alpha_mask == K.alpha_mask)
}

#[inline(always)]
pub fn is_zero(p: &[u32; 4]) -> bool {
    p.iter().all(|&v| v == 0)
}

#[inline(always)]
pub fn is_transparent(p: &[u32; 4]) -> bool {
    p.iter().all(|&v| v & K.alpha_mask == 0)
}

#[cfg(test)]
#[path = "../../tests/unit/pixel/blend.rs"]
mod tests;
