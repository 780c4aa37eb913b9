//! Packed/expanded pixel representations and the per-pixel blend kernels.

pub mod blend;
pub mod constants;
pub mod lanes;
pub mod pack;
