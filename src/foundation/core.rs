use crate::foundation::error::{BlendError, BlendResult};

/// Compositing operator.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    /// `s`
    Src,
    /// `s + d*(1-a_s)`
    Over,
    /// `d + s*(1-a_d)`
    OverReverse,
    /// `s*a_d`
    In,
    /// `d*a_s`
    InReverse,
    /// `s*(1-a_d)`
    Out,
    /// `d*(1-a_s)`
    OutReverse,
    /// `s*a_d + d*(1-a_s)`
    Atop,
    /// `d*a_s + s*(1-a_d)`
    AtopReverse,
    /// `s*(1-a_d) + d*(1-a_s)`
    Xor,
    /// `s + d`, saturating per channel.
    Add,
    /// `d + s*min(1, (1-a_d)/a_s)`
    Saturate,
}

impl Operator {
    /// Every operator, in declaration order.
    pub const ALL: [Operator; 12] = [
        Operator::Src,
        Operator::Over,
        Operator::OverReverse,
        Operator::In,
        Operator::InReverse,
        Operator::Out,
        Operator::OutReverse,
        Operator::Atop,
        Operator::AtopReverse,
        Operator::Xor,
        Operator::Add,
        Operator::Saturate,
    ];

    /// Lowercase snake-case name, as used in routine names and serde.
    pub fn name(self) -> &'static str {
        match self {
            Operator::Src => "src",
            Operator::Over => "over",
            Operator::OverReverse => "over_reverse",
            Operator::In => "in",
            Operator::InReverse => "in_reverse",
            Operator::Out => "out",
            Operator::OutReverse => "out_reverse",
            Operator::Atop => "atop",
            Operator::AtopReverse => "atop_reverse",
            Operator::Xor => "xor",
            Operator::Add => "add",
            Operator::Saturate => "saturate",
        }
    }
}

/// Whether a mask contributes one alpha per pixel or one coverage per channel.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum CoverageMode {
    #[default]
    Uniform,
    Component,
}

/// Memory layout of one pixel.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PixelFormat {
    /// 32-bit premultiplied ARGB.
    A8R8G8B8,
    /// 32-bit RGB; the top byte is ignored and reads as opaque.
    X8R8G8B8,
    /// 32-bit premultiplied ABGR.
    A8B8G8R8,
    /// 32-bit BGR; the top byte is ignored and reads as opaque.
    X8B8G8R8,
    /// 16-bit 5/6/5 RGB, opaque.
    R5G6B5,
    /// 16-bit 5/6/5 BGR, opaque.
    B5G6R5,
    /// 8-bit alpha only.
    A8,
}

impl PixelFormat {
    /// Bits per pixel.
    pub fn bpp(self) -> u32 {
        match self {
            PixelFormat::A8R8G8B8
            | PixelFormat::X8R8G8B8
            | PixelFormat::A8B8G8R8
            | PixelFormat::X8B8G8R8 => 32,
            PixelFormat::R5G6B5 | PixelFormat::B5G6R5 => 16,
            PixelFormat::A8 => 8,
        }
    }

    /// Red and blue live in swapped positions relative to `A8R8G8B8`.
    pub fn is_abgr(self) -> bool {
        matches!(
            self,
            PixelFormat::A8B8G8R8 | PixelFormat::X8B8G8R8 | PixelFormat::B5G6R5
        )
    }

    /// Whether the format stores an alpha channel.
    pub fn has_alpha(self) -> bool {
        matches!(
            self,
            PixelFormat::A8R8G8B8 | PixelFormat::A8B8G8R8 | PixelFormat::A8
        )
    }
}

/// 16.16 signed fixed-point value.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize,
    serde::Deserialize,
)]
pub struct Fixed(pub i32);

impl Fixed {
    pub const ONE: Fixed = Fixed(1 << 16);
    pub const HALF: Fixed = Fixed(1 << 15);
    /// Smallest representable step.
    pub const EPSILON: Fixed = Fixed(1);

    pub fn from_int(v: i32) -> Self {
        Self(v << 16)
    }

    /// Nearest representable value to `v`.
    pub fn from_f64(v: f64) -> Self {
        Self((v * 65536.0).round() as i32)
    }

    /// `floor(self)`.
    pub fn to_int(self) -> i32 {
        self.0 >> 16
    }

    pub fn frac(self) -> i32 {
        self.0 & 0xffff
    }
}

impl std::ops::Add for Fixed {
    type Output = Fixed;

    fn add(self, rhs: Fixed) -> Fixed {
        Fixed(self.0.wrapping_add(rhs.0))
    }
}

impl std::ops::Sub for Fixed {
    type Output = Fixed;

    fn sub(self, rhs: Fixed) -> Fixed {
        Fixed(self.0.wrapping_sub(rhs.0))
    }
}

impl std::ops::AddAssign for Fixed {
    fn add_assign(&mut self, rhs: Fixed) {
        *self = *self + rhs;
    }
}

/// How samples outside the source bounds are resolved.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Repeat {
    /// Outside samples are transparent.
    #[default]
    None,
    /// Outside samples take the nearest edge pixel.
    Pad,
    /// The source tiles the plane.
    Normal,
}

/// Pixel rectangle with a top-left origin.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Fails unless the rectangle lies within a `width` x `height` surface.
    pub fn check_within(self, width: u32, height: u32, what: &str) -> BlendResult<()> {
        let right = u64::from(self.x) + u64::from(self.width);
        let bottom = u64::from(self.y) + u64::from(self.height);
        if right > u64::from(width) || bottom > u64::from(height) {
            return Err(BlendError::validation(format!(
                "{what} rectangle {}x{}+{}+{} exceeds {width}x{height}",
                self.width, self.height, self.x, self.y
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
