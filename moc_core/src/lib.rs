//! # moc_core
//!
//! Pure arithmetic and types for per-segment processing in Method-of-Characteristics
//! (MOC) ray tracing.
//!
//! As a track crosses the mesh it is decomposed into segments, one per flat source region
//! (FSR). Long or optically thick segments are split so that no piece exceeds a maximum
//! optical path length. This crate holds that splitting rule and the data it works on; the
//! kernels that apply it live in `moc_rs`, the buffers they fill in `moc_storage`.
//!
//! ## Features
//!
//! - **no_std compatible**: no allocation, `libm` for rounding
//! - **One splitting rule**: [`split_segment`] is shared by every kernel variant
//! - **Capability, not hierarchy**: 2D and 3D tracks are the same [`Track`] type
//!
//! ## Feature Flags
//!
//! - `std` (default): implements `std::error::Error` for [`MocCoreError`]
//!
//! ## Modules
//!
//! - [`types`]: [`Track`], [`Segment`], [`SegmentRecord`], identifiers
//! - [`traits`]: collaborator traits ([`Material`], [`Quadrature`])
//! - [`split`]: optical-length splitting
//! - [`error`]: error types
//!
//! ## Usage
//!
//! ```ignore
//! use moc_core::prelude::*;
//!
//! let split = split_segment(25.0, &[0.3, 1.0], 10.0)?;
//! assert_eq!(split.num_cuts, 3);
//! let lengths: Vec<f64> = split.lengths(25.0).collect(); // [10, 10, 5]
//! ```

#![no_std]
#![warn(missing_docs)]
#![warn(clippy::all)]

#[cfg(feature = "std")]
extern crate std;

pub mod error;
pub mod split;
pub mod traits;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::MocCoreError;
    pub use crate::split::{max_sigma_t, num_cuts, split_material, split_segment, Split};
    pub use crate::traits::{Material, Quadrature};
    pub use crate::types::{MaterialId, RegionId, Segment, SegmentRecord, SurfaceId, Track};
}

pub use error::MocCoreError;
pub use split::{
    max_sigma_t, num_cuts, split_material, split_segment, Split, SubLengths,
    CUT_RATIO_TOLERANCE,
};
pub use traits::{Material, Quadrature};
pub use types::{MaterialId, RegionId, Segment, SegmentRecord, SurfaceId, Track};
