//! # moc_rs
//!
//! Per-segment kernels for Method-of-Characteristics (MOC) ray tracing.
//!
//! While the geometry is traced, every track is reported as a sequence of segments, one
//! per flat source region (FSR) it crosses. A kernel is the callback that runs once per
//! segment. Three kernels are provided:
//!
//! - [`VolumeKernel`]: accumulates track-weighted segment lengths into per-FSR volumes
//! - [`CounterKernel`]: counts the sub-segments a track will produce
//! - [`SegmentationKernel`]: writes those sub-segments into pre-sized storage
//!
//! Every kernel splits segments whose optical length exceeds the maximum optical length:
//!
//! ```text
//! num_cuts = max(1, ceil(length · max(sigma_t) / max_optical_length))
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use moc_rs::prelude::*;
//!
//! let quadrature = QuadratureTable::uniform(4, 1, 0.05, 1.0)?;
//! let config = TrackingConfig::default().with_num_regions(2);
//! let generator = InMemoryTrackGenerator::new(config, quadrature)?.with_fsr_volumes();
//!
//! let fuel = MacroMaterial::new(1, "fuel", vec![0.4, 1.2]);
//! let tracks = vec![TrackSegments::new(
//!     Track::new_2d(0),
//!     vec![Segment::new(3.0, &fuel, 0), Segment::new(9.0, &fuel, 1)],
//! )];
//!
//! accumulate_volumes(&generator, &tracks)?;
//! let counts = count_segments(&generator, &tracks)?;
//!
//! let mut storage = generator.temporary_segments(tracks.len());
//! segmentize(&generator, &tracks, storage.thread_mut(0)?)?;
//! ```
//!
//! ## Concurrency
//!
//! Kernels take `&mut self` and are owned by one worker. The FSR volume buffer is the
//! only state shared between workers, and each region is guarded by its own lock.
//! Segment storage is partitioned by thread, so no two workers write the same row.
//!
//! ## Feature Flags
//!
//! - `rayon` (default): parallel tracing passes

#![warn(missing_docs)]
#![warn(clippy::all)]

mod counter;
mod error;
mod generator;
mod kernel;
mod segmentation;
mod trace;
mod volume;

pub use counter::CounterKernel;
pub use error::{KernelError, Result};
pub use generator::{InMemoryTrackGenerator, TrackGenerator};
pub use kernel::MocKernel;
pub use segmentation::SegmentationKernel;
pub use trace::{
    accumulate_volumes, count_segments, segmentize, segmentize_all, segmentize_track,
    trace_track, TrackSegments,
};
pub use volume::VolumeKernel;

// Re-export storage types
pub use moc_storage::{
    FsrVolumes, MacroMaterial, QuadratureTable, StorageError, TemporarySegments,
    ThreadSegments, TrackingConfig, DEFAULT_MAX_OPTICAL_LENGTH,
};

// Re-export moc_core types for convenience
pub use moc_core::{
    Material, MaterialId, MocCoreError, Quadrature, RegionId, Segment, SegmentRecord,
    SurfaceId, Track,
};

/// Prelude module for convenient imports.
///
/// ```ignore
/// use moc_rs::prelude::*;
/// ```
pub mod prelude {
    pub use crate::counter::CounterKernel;
    pub use crate::error::{KernelError, Result};
    pub use crate::generator::{InMemoryTrackGenerator, TrackGenerator};
    pub use crate::kernel::MocKernel;
    pub use crate::segmentation::SegmentationKernel;
    pub use crate::trace::{
        accumulate_volumes, count_segments, segmentize, trace_track, TrackSegments,
    };
    pub use crate::volume::VolumeKernel;

    pub use moc_storage::{MacroMaterial, QuadratureTable, TrackingConfig};

    pub use moc_core::{Material, Segment, SegmentRecord, SurfaceId, Track};
}
