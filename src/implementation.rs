//! The compositing entry point: combiner selection, fast path dispatch with a
//! general fallback, fill, blt and scaled composites.

use crate::combine::{CombineFn, combiner, reference_combiner};
use crate::composite::fast_path::{FAST_PATHS, FastPath, lookup};
use crate::composite::fill::{BltParams, blt, fill};
use crate::composite::general::composite_general;
use crate::composite::{CompositeInfo, CompositeRect};
use crate::foundation::core::{CoverageMode, Operator, Rect};
use crate::foundation::error::{BlendError, BlendResult};
use crate::image::{Bits, BitsMut, Image};
use crate::pixel::constants::Constants;
use crate::scale::{Filter, ScaleParams, composite_scaled};

/// Options selecting which code paths an [`Implementation`] uses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ImplementationOpts {
    /// Use the one-pixel-at-a-time reference combiners instead of the vector ones.
    pub force_scalar: bool,
    /// Skip the fast path table and always take the general path.
    pub disable_fast_paths: bool,
}

impl ImplementationOpts {
    pub fn with_force_scalar(mut self, on: bool) -> Self {
        self.force_scalar = on;
        self
    }

    pub fn with_fast_paths(mut self, on: bool) -> Self {
        self.disable_fast_paths = !on;
        self
    }

    /// Options from `PIXBLEND_FORCE_SCALAR` and `PIXBLEND_DISABLE_FAST_PATHS`;
    /// `1`, `true` and `yes` switch a flag on.
    pub fn from_env() -> Self {
        Self {
            force_scalar: env_flag("PIXBLEND_FORCE_SCALAR"),
            disable_fast_paths: env_flag("PIXBLEND_DISABLE_FAST_PATHS"),
        }
    }
}

fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .ok()
        .is_some_and(|v| parse_flag(&v))
}

pub(crate) fn parse_flag(v: &str) -> bool {
    matches!(
        v.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes"
    )
}

/// A configured set of compositing routines.
///
/// Holds no mutable state; one value can be shared freely across threads.
#[derive(Clone, Copy, Debug)]
pub struct Implementation {
    opts: ImplementationOpts,
    fast_paths: &'static [FastPath],
}

impl Default for Implementation {
    fn default() -> Self {
        Self::new(ImplementationOpts::default())
    }
}

impl Implementation {
    pub fn new(opts: ImplementationOpts) -> Self {
        let fast_paths: &'static [FastPath] = if opts.disable_fast_paths {
            &[]
        } else {
            FAST_PATHS
        };
        tracing::debug!(
            force_scalar = opts.force_scalar,
            fast_paths = fast_paths.len(),
            "compositing implementation ready"
        );
        Self { opts, fast_paths }
    }

    pub fn opts(&self) -> ImplementationOpts {
        self.opts
    }

    pub fn constants(&self) -> &'static Constants {
        &Constants::STANDARD
    }

    pub fn fast_paths(&self) -> &'static [FastPath] {
        self.fast_paths
    }

    /// Row combiner for `op` in `mode`.
    pub fn combiner(&self, op: Operator, mode: CoverageMode) -> CombineFn {
        if self.opts.force_scalar {
            reference_combiner(op, mode)
        } else {
            combiner(op, mode)
        }
    }

    /// Combine one row in place after checking that `src` and `mask` cover `dst`.
    pub fn combine(
        &self,
        op: Operator,
        mode: CoverageMode,
        dst: &mut [u32],
        src: &[u32],
        mask: Option<&[u32]>,
    ) -> BlendResult<()> {
        if src.len() < dst.len() {
            return Err(BlendError::validation(format!(
                "source row has {} pixels, destination {}",
                src.len(),
                dst.len()
            )));
        }
        if let Some(m) = mask
            && m.len() < dst.len()
        {
            return Err(BlendError::validation(format!(
                "mask row has {} pixels, destination {}",
                m.len(),
                dst.len()
            )));
        }
        (self.combiner(op, mode))(dst, src, mask);
        Ok(())
    }

    /// Fill `rect` of `dest` with the raw value `filler`.
    ///
    /// `Ok(false)` means the depth has no fill routine and nothing was written.
    pub fn fill(&self, dest: &mut BitsMut<'_>, rect: Rect, filler: u32) -> BlendResult<bool> {
        rect.check_within(dest.width(), dest.height(), "fill")?;
        let (stride, bpp) = (dest.rowstride(), dest.format().bpp());
        Ok(fill(dest.words_mut(), stride, bpp, rect, filler))
    }

    /// Copy `src_rect` of `src` to `(dest_x, dest_y)` of `dest` without conversion.
    ///
    /// `Ok(false)` means the surfaces differ in depth or the depth is not 16 or
    /// 32 bits; nothing was written.
    pub fn blt(
        &self,
        src: &Bits<'_>,
        dest: &mut BitsMut<'_>,
        src_rect: Rect,
        dest_x: u32,
        dest_y: u32,
    ) -> BlendResult<bool> {
        src_rect.check_within(src.width(), src.height(), "blt source")?;
        Rect::new(dest_x, dest_y, src_rect.width, src_rect.height).check_within(
            dest.width(),
            dest.height(),
            "blt destination",
        )?;
        let params = BltParams {
            src_stride: src.rowstride(),
            dst_stride: dest.rowstride(),
            src_bpp: src.format().bpp(),
            dst_bpp: dest.format().bpp(),
            src_x: src_rect.x,
            src_y: src_rect.y,
            dest_x,
            dest_y,
            width: src_rect.width,
            height: src_rect.height,
        };
        Ok(blt(src.data(), dest.words_mut(), &params))
    }

    /// Composite `src` (through `mask`, if any) onto `dest` with `op`.
    ///
    /// Solid images and 1x1 surfaces cover the whole plane; other images must
    /// contain the rectangle `rect` places on them.
    #[tracing::instrument(
        level = "trace",
        skip_all,
        fields(op = op.name(), width = rect.width, height = rect.height)
    )]
    pub fn composite(
        &self,
        op: Operator,
        src: &Image<'_>,
        mask: Option<&Image<'_>>,
        dest: &mut BitsMut<'_>,
        rect: &CompositeRect,
    ) -> BlendResult<()> {
        rect.dest_rect()
            .check_within(dest.width(), dest.height(), "destination")?;
        check_operand(src, rect.src_rect(), "source")?;
        if let Some(m) = mask {
            check_operand(m, rect.mask_rect(), "mask")?;
        }
        if rect.is_empty() {
            return Ok(());
        }

        let info = CompositeInfo::new(op, src, mask, rect);
        if let Some(fp) = lookup(self.fast_paths, op, src, mask, dest.format()) {
            tracing::trace!(fast_path = fp.name, "dispatch");
            (fp.routine)(&info, dest);
            return Ok(());
        }

        let mode = if mask.is_some_and(Image::component_alpha) {
            CoverageMode::Component
        } else {
            CoverageMode::Uniform
        };
        tracing::trace!(?mode, "general path");
        composite_general(&info, dest, self.combiner(op, mode));
        Ok(())
    }

    /// Composite a scaled `src`; see [`composite_scaled`] for the supported
    /// operator, filter and mask combinations.
    #[tracing::instrument(
        level = "trace",
        skip_all,
        fields(op = op.name(), filter = ?filter, width = rect.width, height = rect.height)
    )]
    #[allow(clippy::too_many_arguments)]
    pub fn composite_scaled(
        &self,
        op: Operator,
        filter: Filter,
        src: &Bits<'_>,
        mask: Option<&Image<'_>>,
        dest: &mut BitsMut<'_>,
        rect: &CompositeRect,
        params: &ScaleParams,
    ) -> BlendResult<()> {
        composite_scaled(op, filter, src, mask, dest, rect, params)
    }
}

fn check_operand(image: &Image<'_>, rect: Rect, what: &str) -> BlendResult<()> {
    match image {
        Image::Bits(b) if image.solid_pixel(b.format()).is_none() => {
            rect.check_within(b.width(), b.height(), what)
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
#[path = "../tests/unit/implementation.rs"]
mod tests;
