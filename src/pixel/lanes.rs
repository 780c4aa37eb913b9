//! Expanded pixels: one zero-extended 16-bit lane per channel.
//!
//! Lane order inside a pixel follows the little-endian bytes of the packed word:
//! lane 0 is the low byte (blue for ARGB), lane 3 is alpha. A `U16Lanes<N>` holds
//! `N / 4` pixels; `U16x16` is one vector batch of [`PIXELS_PER_VECTOR`] pixels.
//! The per-lane loops have fixed trip counts so the optimizer turns them into
//! vector instructions without intrinsics.

use crate::pixel::constants::K;

/// 32 bpp pixels handled per vector iteration.
pub const PIXELS_PER_VECTOR: usize = 4;
/// Destination alignment the row drivers reach before switching to vector batches.
pub const VECTOR_BYTES: usize = 16;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct U16Lanes<const N: usize>(pub [u16; N]);

/// One expanded pixel.
pub type U16x4 = U16Lanes<4>;
/// Four expanded pixels.
pub type U16x16 = U16Lanes<16>;

impl<const N: usize> U16Lanes<N> {
    pub const ZERO: Self = Self([0; N]);

    #[inline(always)]
    pub fn splat(v: u16) -> Self {
        Self([v; N])
    }

    #[inline(always)]
    fn map(self, f: impl Fn(usize, u16) -> u16) -> Self {
        let mut out = [0u16; N];
        for (i, o) in out.iter_mut().enumerate() {
            *o = f(i, self.0[i]);
        }
        Self(out)
    }

    #[inline(always)]
    fn zip(self, rhs: Self, f: impl Fn(u16, u16) -> u16) -> Self {
        let mut out = [0u16; N];
        for (i, o) in out.iter_mut().enumerate() {
            *o = f(self.0[i], rhs.0[i]);
        }
        Self(out)
    }

    /// Per-lane `round(a * b / 255)`.
    #[inline(always)]
    pub fn mul_round(self, rhs: Self) -> Self {
        self.zip(rhs, |a, b| {
            let t = u32::from(a) * u32::from(b) + u32::from(K.bias);
            ((t * u32::from(K.unit)) >> 16) as u16
        })
    }

    /// Per-lane add clamped to the channel range.
    #[inline(always)]
    pub fn adds(self, rhs: Self) -> Self {
        self.zip(rhs, |a, b| a.saturating_add(b).min(K.channel_max))
    }

    /// Per-lane `255 - x`.
    #[inline(always)]
    pub fn negate(self) -> Self {
        self.map(|_, v| v ^ K.channel_max)
    }

    /// Broadcast each pixel's alpha lane over that pixel.
    #[inline(always)]
    pub fn expand_alpha(self) -> Self {
        let src = self.0;
        self.map(|i, _| src[(i & !3) + 3])
    }

    /// Swap lanes 0 and 2 of every pixel; alpha stays in lane 3.
    #[inline(always)]
    pub fn invert_colors(self) -> Self {
        let src = self.0;
        self.map(|i, _| match i & 3 {
            0 => src[i + 2],
            2 => src[i - 2],
            _ => src[i],
        })
    }

    /// Force the alpha lane of every pixel to 255.
    #[inline(always)]
    pub fn with_opaque_alpha(self) -> Self {
        self.map(|i, v| if i & 3 == 3 { K.channel_max } else { v })
    }
}

impl<const N: usize> From<[u16; N]> for U16Lanes<N> {
    fn from(lanes: [u16; N]) -> Self {
        Self(lanes)
    }
}

impl U16x4 {
    /// Every lane set to the 8-bit value `v`.
    #[inline(always)]
    pub fn from_alpha(v: u8) -> Self {
        Self::splat(u16::from(v))
    }
}

impl U16x16 {
    /// Pixel `i` of the batch.
    #[inline(always)]
    pub fn pixel(self, i: usize) -> U16x4 {
        let base = i * 4;
        U16Lanes([
            self.0[base],
            self.0[base + 1],
            self.0[base + 2],
            self.0[base + 3],
        ])
    }

    /// Each pixel's lanes set to the matching 8-bit value of `v`.
    #[inline(always)]
    pub fn from_alphas(v: [u8; 4]) -> Self {
        let mut out = [0u16; 16];
        for (i, o) in out.iter_mut().enumerate() {
            *o = u16::from(v[i / 4]);
        }
        Self(out)
    }

    #[inline(always)]
    pub fn broadcast(p: U16x4) -> Self {
        let mut out = [0u16; 16];
        for (i, o) in out.iter_mut().enumerate() {
            *o = p.0[i & 3];
        }
        Self(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pixel/lanes.rs"]
mod tests;
