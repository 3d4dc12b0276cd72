//! moc_storage - buffers and tables shared by MOC segment kernels.
//!
//! Kernels never own the data they read or fill. This crate owns it:
//!
//! - [`FsrVolumes`]: per-region volume accumulators, each behind its own lock
//! - [`TemporarySegments`]: per-thread, per-row buffers of materialized sub-segments
//! - [`QuadratureTable`]: azimuthal/polar spacing and weight lookups
//! - [`MacroMaterial`]: multigroup total cross-sections
//! - [`TrackingConfig`]: maximum optical length, thread and region counts
//!
//! # Example
//!
//! ```ignore
//! use moc_storage::{FsrVolumes, TemporarySegments, TrackingConfig};
//!
//! let config = TrackingConfig::default().with_num_regions(64).with_num_threads(4);
//! config.validate()?;
//!
//! let volumes = FsrVolumes::new(config.num_regions);
//! volumes.add(3, 0.125)?;
//!
//! let mut segments = TemporarySegments::new(config.num_threads, 8);
//! segments.resize_row(0, 0, 12)?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod material;
pub mod quadrature;
pub mod segments;
pub mod volumes;

// Re-export core types from moc_core
pub use moc_core::{
    Material, MaterialId, Quadrature, RegionId, Segment, SegmentRecord, SurfaceId, Track,
};

// Re-export main types
pub use config::{TrackingConfig, DEFAULT_MAX_OPTICAL_LENGTH};
pub use error::{Result, StorageError};
pub use material::MacroMaterial;
pub use quadrature::QuadratureTable;
pub use segments::{TemporarySegments, ThreadSegments};
pub use volumes::FsrVolumes;
