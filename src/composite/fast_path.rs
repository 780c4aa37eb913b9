//! Table of specialized composite routines keyed by operator and formats.

use crate::composite::{CompositeFn, a8, fill, solid, source};
use crate::foundation::core::{Operator, PixelFormat};
use crate::image::Image;

/// What a source or mask must look like for an entry to apply.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormatClass {
    /// No image at all (only meaningful for masks).
    Null,
    /// A solid color or a 1x1 surface.
    Solid,
    /// A premultiplied surface of this format used per pixel.
    Format(PixelFormat),
    /// A mask surface of this format whose channels are separate coverages.
    ComponentAlpha(PixelFormat),
    /// A non-premultiplied surface of this format.
    Pixbuf(PixelFormat),
}

impl FormatClass {
    /// Whether `image` (or its absence) belongs to this class.
    ///
    /// A 1x1 surface is solid and never matches a per-pixel class: its line
    /// holds one pixel however wide the composite is.
    pub fn matches(self, image: Option<&Image<'_>>) -> bool {
        let solid = image.is_some_and(|img| img.solid_pixel(PixelFormat::A8R8G8B8).is_some());
        match (self, image) {
            (FormatClass::Null, None) => true,
            (FormatClass::Solid, Some(img)) => solid && !img.component_alpha(),
            (FormatClass::Format(f), Some(Image::Bits(b))) => {
                !solid && b.format() == f && !b.component_alpha() && b.premultiplied()
            }
            (FormatClass::ComponentAlpha(f), Some(Image::Bits(b))) => {
                !solid && b.format() == f && b.component_alpha() && b.premultiplied()
            }
            (FormatClass::Pixbuf(f), Some(Image::Bits(b))) => {
                !solid && b.format() == f && !b.premultiplied()
            }
            _ => false,
        }
    }
}

#[derive(Clone, Copy)]
pub struct FastPath {
    pub op: Operator,
    pub src: FormatClass,
    pub mask: FormatClass,
    pub dest: PixelFormat,
    pub name: &'static str,
    pub routine: CompositeFn,
}

impl std::fmt::Debug for FastPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FastPath")
            .field("op", &self.op)
            .field("src", &self.src)
            .field("mask", &self.mask)
            .field("dest", &self.dest)
            .field("name", &self.name)
            .finish()
    }
}

impl FastPath {
    pub fn matches(
        &self,
        op: Operator,
        src: &Image<'_>,
        mask: Option<&Image<'_>>,
        dest: PixelFormat,
    ) -> bool {
        self.op == op && self.dest == dest && self.src.matches(Some(src)) && self.mask.matches(mask)
    }
}

/// First entry of `table` that accepts the operands.
pub fn lookup<'t>(
    table: &'t [FastPath],
    op: Operator,
    src: &Image<'_>,
    mask: Option<&Image<'_>>,
    dest: PixelFormat,
) -> Option<&'t FastPath> {
    table.iter().find(|fp| fp.matches(op, src, mask, dest))
}

macro_rules! fast_path {
    ($op:ident, $src:expr, $mask:expr, $dest:ident, $routine:path) => {
        FastPath {
            op: Operator::$op,
            src: $src,
            mask: $mask,
            dest: PixelFormat::$dest,
            name: stringify!($routine),
            routine: $routine,
        }
    };
}

use FormatClass::{ComponentAlpha as Ca, Format as F, Null, Pixbuf, Solid};
use PixelFormat::*;

pub static FAST_PATHS: &[FastPath] = &[
    fast_path!(Over, Solid, F(A8), R5G6B5, solid::over_n_8_0565),
    fast_path!(Over, Solid, F(A8), B5G6R5, solid::over_n_8_0565),
    fast_path!(Over, Solid, Null, A8R8G8B8, solid::over_n_8888),
    fast_path!(Over, Solid, Null, X8R8G8B8, solid::over_n_8888),
    fast_path!(Over, Solid, Null, A8B8G8R8, solid::over_n_8888),
    fast_path!(Over, Solid, Null, X8B8G8R8, solid::over_n_8888),
    fast_path!(Over, Solid, Null, R5G6B5, solid::over_n_0565),
    fast_path!(Over, Solid, Null, B5G6R5, solid::over_n_0565),
    fast_path!(Over, F(A8R8G8B8), Null, A8R8G8B8, source::over_8888_8888),
    fast_path!(Over, F(A8R8G8B8), Null, X8R8G8B8, source::over_8888_8888),
    fast_path!(Over, F(A8B8G8R8), Null, A8B8G8R8, source::over_8888_8888),
    fast_path!(Over, F(A8B8G8R8), Null, X8B8G8R8, source::over_8888_8888),
    fast_path!(Over, F(A8R8G8B8), Null, R5G6B5, source::over_8888_0565),
    fast_path!(Over, F(A8B8G8R8), Null, B5G6R5, source::over_8888_0565),
    fast_path!(Over, Solid, F(A8), A8R8G8B8, solid::over_n_8_8888),
    fast_path!(Over, Solid, F(A8), X8R8G8B8, solid::over_n_8_8888),
    fast_path!(Over, Solid, F(A8), A8B8G8R8, solid::over_n_8_8888),
    fast_path!(Over, Solid, F(A8), X8B8G8R8, solid::over_n_8_8888),
    fast_path!(Over, F(A8R8G8B8), F(A8R8G8B8), A8R8G8B8, source::over_8888_8888_8888),
    fast_path!(Over, F(A8R8G8B8), F(A8), X8R8G8B8, source::over_8888_8_8888),
    fast_path!(Over, F(A8R8G8B8), F(A8), A8R8G8B8, source::over_8888_8_8888),
    fast_path!(Over, F(A8B8G8R8), F(A8), X8B8G8R8, source::over_8888_8_8888),
    fast_path!(Over, F(A8B8G8R8), F(A8), A8B8G8R8, source::over_8888_8_8888),
    fast_path!(Over, F(X8R8G8B8), F(A8), X8R8G8B8, source::over_x888_8_8888),
    fast_path!(Over, F(X8R8G8B8), F(A8), A8R8G8B8, source::over_x888_8_8888),
    fast_path!(Over, F(X8B8G8R8), F(A8), X8B8G8R8, source::over_x888_8_8888),
    fast_path!(Over, F(X8B8G8R8), F(A8), A8B8G8R8, source::over_x888_8_8888),
    fast_path!(Over, F(X8R8G8B8), Solid, A8R8G8B8, source::over_x888_n_8888),
    fast_path!(Over, F(X8R8G8B8), Solid, X8R8G8B8, source::over_x888_n_8888),
    fast_path!(Over, F(X8B8G8R8), Solid, A8B8G8R8, source::over_x888_n_8888),
    fast_path!(Over, F(X8B8G8R8), Solid, X8B8G8R8, source::over_x888_n_8888),
    fast_path!(Over, F(A8R8G8B8), Solid, A8R8G8B8, source::over_8888_n_8888),
    fast_path!(Over, F(A8R8G8B8), Solid, X8R8G8B8, source::over_8888_n_8888),
    fast_path!(Over, F(A8B8G8R8), Solid, A8B8G8R8, source::over_8888_n_8888),
    fast_path!(Over, F(A8B8G8R8), Solid, X8B8G8R8, source::over_8888_n_8888),
    fast_path!(Over, Solid, Ca(A8R8G8B8), A8R8G8B8, solid::over_n_8888_8888_ca),
    fast_path!(Over, Solid, Ca(A8R8G8B8), X8R8G8B8, solid::over_n_8888_8888_ca),
    fast_path!(Over, Solid, Ca(A8B8G8R8), A8B8G8R8, solid::over_n_8888_8888_ca),
    fast_path!(Over, Solid, Ca(A8B8G8R8), X8B8G8R8, solid::over_n_8888_8888_ca),
    fast_path!(Over, Solid, Ca(A8R8G8B8), R5G6B5, solid::over_n_8888_0565_ca),
    fast_path!(Over, Solid, Ca(A8B8G8R8), B5G6R5, solid::over_n_8888_0565_ca),
    fast_path!(Over, Pixbuf(A8B8G8R8), Null, A8R8G8B8, source::over_pixbuf_8888),
    fast_path!(Over, Pixbuf(A8B8G8R8), Null, X8R8G8B8, source::over_pixbuf_8888),
    fast_path!(Over, Pixbuf(A8R8G8B8), Null, A8B8G8R8, source::over_pixbuf_8888),
    fast_path!(Over, Pixbuf(A8R8G8B8), Null, X8B8G8R8, source::over_pixbuf_8888),
    fast_path!(Over, Pixbuf(A8B8G8R8), Null, R5G6B5, source::over_pixbuf_0565),
    fast_path!(Over, Pixbuf(A8R8G8B8), Null, B5G6R5, source::over_pixbuf_0565),
    fast_path!(Over, F(X8R8G8B8), Null, X8R8G8B8, fill::copy_area),
    fast_path!(Over, F(X8B8G8R8), Null, X8B8G8R8, fill::copy_area),
    fast_path!(OverReverse, Solid, Null, A8R8G8B8, solid::over_reverse_n_8888),
    fast_path!(OverReverse, Solid, Null, A8B8G8R8, solid::over_reverse_n_8888),
    fast_path!(Add, Solid, Ca(A8R8G8B8), A8R8G8B8, solid::add_n_8888_8888_ca),
    fast_path!(Add, Solid, Ca(A8R8G8B8), X8R8G8B8, solid::add_n_8888_8888_ca),
    fast_path!(Add, Solid, Ca(A8B8G8R8), A8B8G8R8, solid::add_n_8888_8888_ca),
    fast_path!(Add, Solid, Ca(A8B8G8R8), X8B8G8R8, solid::add_n_8888_8888_ca),
    fast_path!(Add, F(A8), Null, A8, a8::add_8_8),
    fast_path!(Add, F(A8R8G8B8), Null, A8R8G8B8, source::add_8888_8888),
    fast_path!(Add, F(A8B8G8R8), Null, A8B8G8R8, source::add_8888_8888),
    fast_path!(Add, Solid, F(A8), A8, a8::add_n_8_8),
    fast_path!(Add, Solid, Null, A8, a8::add_n_8),
    fast_path!(Add, Solid, Null, X8R8G8B8, solid::add_n_8888),
    fast_path!(Add, Solid, Null, A8R8G8B8, solid::add_n_8888),
    fast_path!(Add, Solid, Null, X8B8G8R8, solid::add_n_8888),
    fast_path!(Add, Solid, Null, A8B8G8R8, solid::add_n_8888),
    fast_path!(Add, Solid, F(A8), X8R8G8B8, solid::add_n_8_8888),
    fast_path!(Add, Solid, F(A8), A8R8G8B8, solid::add_n_8_8888),
    fast_path!(Add, Solid, F(A8), X8B8G8R8, solid::add_n_8_8888),
    fast_path!(Add, Solid, F(A8), A8B8G8R8, solid::add_n_8_8888),
    fast_path!(Src, Solid, F(A8), A8R8G8B8, solid::src_n_8_8888),
    fast_path!(Src, Solid, F(A8), X8R8G8B8, solid::src_n_8_8888),
    fast_path!(Src, Solid, F(A8), A8B8G8R8, solid::src_n_8_8888),
    fast_path!(Src, Solid, F(A8), X8B8G8R8, solid::src_n_8_8888),
    fast_path!(Src, F(X8R8G8B8), Null, R5G6B5, source::src_x888_0565),
    fast_path!(Src, F(A8R8G8B8), Null, R5G6B5, source::src_x888_0565),
    fast_path!(Src, F(X8B8G8R8), Null, B5G6R5, source::src_x888_0565),
    fast_path!(Src, F(A8B8G8R8), Null, B5G6R5, source::src_x888_0565),
    fast_path!(Src, F(X8R8G8B8), Null, A8R8G8B8, source::src_x888_8888),
    fast_path!(Src, F(X8B8G8R8), Null, A8B8G8R8, source::src_x888_8888),
    fast_path!(Src, F(A8R8G8B8), Null, X8R8G8B8, fill::copy_area),
    fast_path!(Src, F(A8B8G8R8), Null, X8B8G8R8, fill::copy_area),
    fast_path!(Src, F(X8R8G8B8), Null, X8R8G8B8, fill::copy_area),
    fast_path!(Src, F(X8B8G8R8), Null, X8B8G8R8, fill::copy_area),
    fast_path!(Src, F(A8R8G8B8), Null, A8R8G8B8, fill::copy_area),
    fast_path!(Src, F(A8B8G8R8), Null, A8B8G8R8, fill::copy_area),
    fast_path!(Src, F(R5G6B5), Null, R5G6B5, fill::copy_area),
    fast_path!(Src, F(B5G6R5), Null, B5G6R5, fill::copy_area),
    fast_path!(Src, F(A8), Null, A8, fill::copy_area),
    fast_path!(In, F(A8), Null, A8, a8::in_8_8),
    fast_path!(In, Solid, F(A8), A8, a8::in_n_8_8),
    fast_path!(In, Solid, Null, A8, a8::in_n_8),
];

#[cfg(test)]
#[path = "../../tests/unit/composite/fast_path.rs"]
mod tests;
