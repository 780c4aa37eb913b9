//! pixblend is a fixed-point pixel compositing engine.
//!
//! It blends premultiplied 8-bit-per-channel pixels with the Porter-Duff
//! operators (plus ADD and SATURATE), in uniform and component-alpha coverage
//! modes, and produces bit-identical results between its one-pixel reference
//! loops and its batched row combiners.
//!
//! - Row combiners: [`Implementation::combiner`] / [`Implementation::combine`]
//! - Whole-rectangle composites: [`Implementation::composite`]
//! - Raw fill and copy: [`Implementation::fill`], [`Implementation::blt`]
//! - Scaled composites: [`Implementation::composite_scaled`]
#![forbid(unsafe_code)]

mod foundation;

pub mod combine;
pub mod composite;
pub mod fetch;
pub mod image;
pub mod implementation;
pub mod pixel;
pub mod scale;

pub use crate::foundation::core::{CoverageMode, Fixed, Operator, PixelFormat, Rect, Repeat};
pub use crate::foundation::error::{BlendError, BlendResult};
pub use crate::foundation::math::{clamped_add, divide_and_round, premultiply_round};

pub use crate::combine::CombineFn;
pub use crate::composite::CompositeRect;
pub use crate::composite::fast_path::{FastPath, FormatClass};
pub use crate::composite::fill::BltParams;
pub use crate::image::{Bits, BitsMut, Image, Solid};
pub use crate::implementation::{Implementation, ImplementationOpts};
pub use crate::pixel::constants::Constants;
pub use crate::pixel::lanes::PIXELS_PER_VECTOR;
pub use crate::scale::{Filter, ScaleParams};
