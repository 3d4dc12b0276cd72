//! The track generator as seen by segment kernels.
//!
//! Kernels are created per worker and pull their shared resources from the generator: the
//! maximum optical length, the FSR lock/volume table, and the quadrature. The generator
//! owns these; kernels only borrow them.

use moc_core::Quadrature;
use moc_storage::{FsrVolumes, QuadratureTable, TemporarySegments, TrackingConfig};

use crate::error::Result;

/// Resources a track generator exposes to segment kernels.
pub trait TrackGenerator {
    /// Maximum optical path length of one segment.
    fn max_optical_length(&self) -> f64;

    /// The FSR volume buffer with its per-region locks, or `None` if the locks were never
    /// created.
    fn fsr_volumes(&self) -> Option<&FsrVolumes>;

    /// Angular quadrature used to weight tracks.
    fn quadrature(&self) -> &(dyn Quadrature + Sync);

    /// Number of flat source regions.
    fn num_regions(&self) -> usize;
}

/// A track generator holding its resources in memory.
///
/// # Example
///
/// ```ignore
/// let quadrature = QuadratureTable::uniform(4, 1, 0.05, 1.0)?;
/// let config = TrackingConfig::default().with_num_regions(100);
/// let generator = InMemoryTrackGenerator::new(config, quadrature)?.with_fsr_volumes();
///
/// let kernel = VolumeKernel::new(&generator)?;
/// ```
#[derive(Debug)]
pub struct InMemoryTrackGenerator {
    config: TrackingConfig,
    quadrature: QuadratureTable,
    volumes: Option<FsrVolumes>,
}

impl InMemoryTrackGenerator {
    /// Create a generator without an FSR lock table.
    ///
    /// # Errors
    /// Returns a storage error if the configuration does not validate.
    pub fn new(config: TrackingConfig, quadrature: QuadratureTable) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            quadrature,
            volumes: None,
        })
    }

    /// Allocate the FSR volume buffer and its locks, one per region.
    pub fn with_fsr_volumes(mut self) -> Self {
        self.create_fsr_volumes();
        self
    }

    /// Allocate (or reallocate, zeroed) the FSR volume buffer and its locks.
    pub fn create_fsr_volumes(&mut self) {
        log::debug!(
            "Allocating FSR volumes and locks for {} regions",
            self.config.num_regions
        );
        self.volumes = Some(FsrVolumes::new(self.config.num_regions));
    }

    /// Zero the accumulated volumes, if allocated.
    pub fn reset_fsr_volumes(&self) {
        if let Some(volumes) = &self.volumes {
            volumes.clear();
        }
    }

    /// Copy of the accumulated volumes, if allocated.
    pub fn fsr_volumes_snapshot(&self) -> Option<Vec<f64>> {
        self.volumes.as_ref().map(FsrVolumes::snapshot)
    }

    /// Change the maximum optical length handed to newly created kernels.
    ///
    /// # Errors
    /// Returns a storage error if the value is not positive and finite.
    pub fn set_max_optical_length(&mut self, max_optical_length: f64) -> Result<()> {
        let config = self.config.with_max_optical_length(max_optical_length);
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Allocate temporary segment storage with `rows_per_thread` rows for each thread.
    pub fn temporary_segments(&self, rows_per_thread: usize) -> TemporarySegments {
        TemporarySegments::new(self.config.num_threads, rows_per_thread)
    }

    /// The tracking configuration.
    #[inline]
    pub fn config(&self) -> &TrackingConfig {
        &self.config
    }
}

impl TrackGenerator for InMemoryTrackGenerator {
    #[inline]
    fn max_optical_length(&self) -> f64 {
        self.config.max_optical_length
    }

    #[inline]
    fn fsr_volumes(&self) -> Option<&FsrVolumes> {
        self.volumes.as_ref()
    }

    #[inline]
    fn quadrature(&self) -> &(dyn Quadrature + Sync) {
        &self.quadrature
    }

    #[inline]
    fn num_regions(&self) -> usize {
        self.config.num_regions
    }
}
