//! Borrowed views over caller-owned pixel memory.
//!
//! Rows are addressed in 32-bit words, the way the surfaces are allocated;
//! `line::<P>` reinterprets them as 8-, 16- or 32-bit pixels.

use crate::fetch::to_argb;
use crate::foundation::core::{PixelFormat, Rect};
use crate::foundation::error::{BlendError, BlendResult};
use crate::pixel::pack::swap_rb;

fn validate(
    format: PixelFormat,
    width: u32,
    height: u32,
    rowstride: usize,
    words: usize,
) -> BlendResult<()> {
    let row_bytes = (width as usize)
        .checked_mul(format.bpp() as usize / 8)
        .ok_or_else(|| BlendError::validation("row byte size overflow"))?;
    let stride_bytes = rowstride
        .checked_mul(4)
        .ok_or_else(|| BlendError::validation("rowstride overflow"))?;
    if stride_bytes < row_bytes {
        return Err(BlendError::validation(format!(
            "rowstride of {rowstride} words is narrower than {width} {format:?} pixels"
        )));
    }
    let needed = rowstride
        .checked_mul(height as usize)
        .ok_or_else(|| BlendError::validation("image size overflow"))?;
    if words < needed {
        return Err(BlendError::validation(format!(
            "image buffer holds {words} words, {width}x{height} with rowstride {rowstride} needs {needed}"
        )));
    }
    Ok(())
}

fn line_offset<P>(format: PixelFormat, rowstride: usize, x: u32, y: u32) -> (usize, usize) {
    let unit = std::mem::size_of::<P>();
    let stride = rowstride * 4 / unit;
    let offset = y as usize * stride + x as usize * (format.bpp() as usize / 8) / unit;
    (offset, stride)
}

/// Read-only pixel surface.
#[derive(Clone, Copy, Debug)]
pub struct Bits<'a> {
    format: PixelFormat,
    width: u32,
    height: u32,
    rowstride: usize,
    data: &'a [u32],
    component_alpha: bool,
    premultiplied: bool,
}

impl<'a> Bits<'a> {
    /// `rowstride` counts 32-bit words per row.
    pub fn new(
        format: PixelFormat,
        width: u32,
        height: u32,
        rowstride: usize,
        data: &'a [u32],
    ) -> BlendResult<Self> {
        validate(format, width, height, rowstride, data.len())?;
        Ok(Self {
            format,
            width,
            height,
            rowstride,
            data,
            component_alpha: false,
            premultiplied: true,
        })
    }

    /// Use every channel of this image as an independent coverage when it is a mask.
    pub fn with_component_alpha(mut self, on: bool) -> Self {
        self.component_alpha = on;
        self
    }

    /// Mark the colors as not yet multiplied by alpha ("pixbuf" data).
    pub fn with_premultiplied(mut self, on: bool) -> Self {
        self.premultiplied = on;
        self
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn rowstride(&self) -> usize {
        self.rowstride
    }

    pub fn data(&self) -> &'a [u32] {
        self.data
    }

    pub fn component_alpha(&self) -> bool {
        self.component_alpha
    }

    pub fn premultiplied(&self) -> bool {
        self.premultiplied
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    /// Pixels from `(x, y)` to the end of the surface, plus the row stride in `P` units.
    pub fn line<P: bytemuck::Pod>(&self, x: u32, y: u32) -> (&'a [P], usize) {
        let (offset, stride) = line_offset::<P>(self.format, self.rowstride, x, y);
        let all: &'a [P] = bytemuck::cast_slice(self.data);
        (&all[offset..], stride)
    }

    /// Stored value of one pixel, zero-extended.
    pub fn raw_pixel(&self, x: u32, y: u32) -> u32 {
        match self.format.bpp() {
            32 => self.line::<u32>(x, y).0[0],
            16 => u32::from(self.line::<u16>(x, y).0[0]),
            _ => u32::from(self.line::<u8>(x, y).0[0]),
        }
    }
}

/// Writable pixel surface.
#[derive(Debug)]
pub struct BitsMut<'a> {
    format: PixelFormat,
    width: u32,
    height: u32,
    rowstride: usize,
    data: &'a mut [u32],
}

impl<'a> BitsMut<'a> {
    pub fn new(
        format: PixelFormat,
        width: u32,
        height: u32,
        rowstride: usize,
        data: &'a mut [u32],
    ) -> BlendResult<Self> {
        validate(format, width, height, rowstride, data.len())?;
        Ok(Self {
            format,
            width,
            height,
            rowstride,
            data,
        })
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn rowstride(&self) -> usize {
        self.rowstride
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    pub fn words_mut(&mut self) -> &mut [u32] {
        &mut *self.data
    }

    pub fn as_bits(&self) -> Bits<'_> {
        Bits {
            format: self.format,
            width: self.width,
            height: self.height,
            rowstride: self.rowstride,
            data: &*self.data,
            component_alpha: false,
            premultiplied: true,
        }
    }

    /// Fill `rect` with `filler`; see [`fill`](crate::composite::fill::fill).
    pub fn fill(&mut self, rect: Rect, filler: u32) -> bool {
        let bpp = self.format.bpp();
        crate::composite::fill::fill(self.data, self.rowstride, bpp, rect, filler)
    }

    pub fn line_mut<P: bytemuck::Pod>(&mut self, x: u32, y: u32) -> (&mut [P], usize) {
        let (offset, stride) = line_offset::<P>(self.format, self.rowstride, x, y);
        let all: &mut [P] = bytemuck::cast_slice_mut(&mut *self.data);
        (&mut all[offset..], stride)
    }
}

/// A single premultiplied `A8R8G8B8` color covering the whole plane.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Solid(pub u32);

#[derive(Clone, Copy, Debug)]
pub enum Image<'a> {
    Solid(Solid),
    Bits(Bits<'a>),
}

impl<'a> Image<'a> {
    pub fn solid(argb: u32) -> Self {
        Image::Solid(Solid(argb))
    }

    pub fn bits(&self) -> Option<&Bits<'a>> {
        match self {
            Image::Bits(bits) => Some(bits),
            Image::Solid(_) => None,
        }
    }

    pub fn format(&self) -> Option<PixelFormat> {
        self.bits().map(Bits::format)
    }

    pub fn component_alpha(&self) -> bool {
        self.bits().is_some_and(Bits::component_alpha)
    }

    /// Color of a solid image (or a 1x1 surface) as a 32-bit pixel in `target`'s
    /// channel order; 16-bit targets still receive 8 bits per channel.
    ///
    /// Returns `None` for images that vary per pixel. A result of 0 means the
    /// source is fully transparent.
    pub fn solid_pixel(&self, target: PixelFormat) -> Option<u32> {
        let argb = match self {
            Image::Solid(Solid(argb)) => *argb,
            Image::Bits(bits) if bits.width == 1 && bits.height == 1 && bits.premultiplied => {
                to_argb(bits.format, bits.raw_pixel(0, 0))
            }
            Image::Bits(_) => return None,
        };
        Some(if target.is_abgr() { swap_rb(argb) } else { argb })
    }
}

#[cfg(test)]
#[path = "../tests/unit/image.rs"]
mod tests;
