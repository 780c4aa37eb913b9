//! Scaled compositing of 32 bpp sources under a scale-and-translate transform.
//!
//! Positions are 16.16 fixed point. Destination pixel `(x, y)` of a composite
//! samples the source at `((src_x + x + 0.5) * unit_x + offset_x, ...)`; the
//! nearest filter then takes the pixel containing that point and the bilinear
//! filter blends the four pixels around it.

pub mod bilinear;
pub mod nearest;

use crate::composite::CompositeRect;
use crate::foundation::core::{Fixed, Operator, PixelFormat, Repeat};
use crate::foundation::error::{BlendError, BlendResult};
use crate::image::{Bits, BitsMut, Image};

use bilinear::BilinearKind;
use nearest::NearestKind;

/// Sampling filter.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Filter {
    #[default]
    Nearest,
    Bilinear,
}

/// Source transform and edge handling of one scaled composite.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ScaleParams {
    /// Source distance covered by one destination pixel.
    pub unit_x: Fixed,
    pub unit_y: Fixed,
    /// Translation applied after scaling.
    pub offset_x: Fixed,
    pub offset_y: Fixed,
    pub repeat: Repeat,
}

impl Default for ScaleParams {
    fn default() -> Self {
        Self::new(Fixed::ONE, Fixed::ONE)
    }
}

impl ScaleParams {
    pub fn new(unit_x: Fixed, unit_y: Fixed) -> Self {
        Self {
            unit_x,
            unit_y,
            offset_x: Fixed(0),
            offset_y: Fixed(0),
            repeat: Repeat::None,
        }
    }

    pub fn with_offset(mut self, x: Fixed, y: Fixed) -> Self {
        self.offset_x = x;
        self.offset_y = y;
        self
    }

    pub fn with_repeat(mut self, repeat: Repeat) -> Self {
        self.repeat = repeat;
        self
    }

    /// Source position of the centre of pixel `(x, y)`, widened to 64 bits.
    pub fn origin(&self, x: u32, y: u32) -> (i64, i64) {
        let along = |p: u32, unit: Fixed, offset: Fixed| {
            ((2 * i64::from(p) + 1) * i64::from(unit.0) >> 1) + i64::from(offset.0)
        };
        (
            along(x, self.unit_x, self.offset_x),
            along(y, self.unit_y, self.offset_y),
        )
    }
}

/// How a span of destination pixels splits against one source row.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScanlineBounds {
    /// Pixels sampling left of column 0.
    pub left_pad: usize,
    /// Pixels sampling inside the row.
    pub width: usize,
    /// Pixels sampling at or right of column `source_width`.
    pub right_pad: usize,
}

/// Split `width` pixels stepping from `vx` by `unit_x` against a row of
/// `source_width` pixels. `unit_x` must not be negative.
pub fn pad_repeat_bounds(source_width: u32, vx: i64, unit_x: i64, width: usize) -> ScanlineBounds {
    let max_vx = i64::from(source_width) << 16;
    let all = width as i64;
    if unit_x <= 0 {
        return match vx {
            v if v < 0 => ScanlineBounds {
                left_pad: width,
                ..ScanlineBounds::default()
            },
            v if v >= max_vx => ScanlineBounds {
                right_pad: width,
                ..ScanlineBounds::default()
            },
            _ => ScanlineBounds {
                width,
                ..ScanlineBounds::default()
            },
        };
    }
    let left = if vx < 0 {
        ((unit_x - 1 - vx) / unit_x).min(all)
    } else {
        0
    };
    let rest = all - left;
    let inside = (unit_x - 1 - vx + max_vx) / unit_x - left;
    let (inside, right) = if inside < 0 {
        (0, rest)
    } else if inside >= rest {
        (rest, 0)
    } else {
        (inside, rest - inside)
    };
    ScanlineBounds {
        left_pad: left as usize,
        width: inside as usize,
        right_pad: right as usize,
    }
}

/// Validate operands and run the matching scaled routine.
///
/// Supported combinations: nearest OVER with no mask or a solid mask; bilinear
/// SRC with no mask; bilinear OVER with no mask, a solid mask or an `A8` mask.
/// Sources are premultiplied `A8R8G8B8` (or `X8R8G8B8` for SRC) and the
/// destination is `A8R8G8B8` or `X8R8G8B8`.
pub fn composite_scaled(
    op: Operator,
    filter: Filter,
    src: &Bits<'_>,
    mask: Option<&Image<'_>>,
    dest: &mut BitsMut<'_>,
    rect: &CompositeRect,
    params: &ScaleParams,
) -> BlendResult<()> {
    if params.unit_x.0 < 0 || params.unit_y.0 < 0 {
        return Err(BlendError::unsupported(
            "scaled composite with a mirroring transform",
        ));
    }
    if !matches!(
        dest.format(),
        PixelFormat::A8R8G8B8 | PixelFormat::X8R8G8B8
    ) {
        return Err(BlendError::unsupported(format!(
            "scaled composite onto {:?}",
            dest.format()
        )));
    }
    if !src.premultiplied() {
        return Err(BlendError::unsupported(
            "scaled composite from a non-premultiplied source",
        ));
    }
    rect.dest_rect()
        .check_within(dest.width(), dest.height(), "destination")?;
    if rect.is_empty() || src.width() == 0 || src.height() == 0 {
        return Ok(());
    }

    let solid_mask = mask
        .filter(|m| !m.component_alpha())
        .and_then(|m| m.solid_pixel(PixelFormat::A8R8G8B8))
        .map(|p| (p >> 24) as u8);
    let a8_mask = match mask {
        Some(Image::Bits(b)) if solid_mask.is_none() && b.format() == PixelFormat::A8 => {
            rect.mask_rect()
                .check_within(b.width(), b.height(), "mask")?;
            Some(b.line::<u8>(rect.mask_x, rect.mask_y))
        }
        _ => None,
    };
    let unsupported = || {
        Err(BlendError::unsupported(format!(
            "{filter:?} {} from {:?} with {} mask",
            op.name(),
            src.format(),
            match (mask, solid_mask) {
                (None, _) => "no".to_string(),
                (Some(_), Some(_)) => "a solid".to_string(),
                (Some(m), None) => format!("a {:?}", m.format()),
            }
        )))
    };

    match (filter, op, src.format()) {
        (Filter::Nearest, Operator::Over, PixelFormat::A8R8G8B8) => {
            let kind = match (mask, solid_mask) {
                (None, _) => NearestKind::Over,
                (Some(_), Some(m)) => NearestKind::OverSolidMask(m),
                _ => return unsupported(),
            };
            nearest::composite(kind, src, dest, rect, params);
        }
        (Filter::Bilinear, Operator::Src, format) if mask.is_none() => {
            let kind = match format {
                PixelFormat::A8R8G8B8 => BilinearKind::Src,
                PixelFormat::X8R8G8B8 => BilinearKind::SrcX888,
                _ => return unsupported(),
            };
            bilinear::composite(kind, src, None, dest, rect, params);
        }
        (Filter::Bilinear, Operator::Over, PixelFormat::A8R8G8B8) => {
            let kind = match (mask, solid_mask, a8_mask) {
                (None, _, _) => BilinearKind::Over,
                (Some(_), Some(m), _) => BilinearKind::OverSolidMask(m),
                (Some(_), None, Some(_)) => BilinearKind::OverMask8,
                _ => return unsupported(),
            };
            bilinear::composite(kind, src, a8_mask, dest, rect, params);
        }
        _ => return unsupported(),
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/scale/mod.rs"]
mod tests;
