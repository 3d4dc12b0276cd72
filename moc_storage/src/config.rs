//! Tracking configuration types.

use crate::error::{Result, StorageError};

/// Default maximum optical path length of a segment.
pub const DEFAULT_MAX_OPTICAL_LENGTH: f64 = 10.0;

/// Tracking configuration parameters (immutable after construction).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackingConfig {
    /// Maximum optical path length (length × total cross-section) of one segment.
    pub max_optical_length: f64,
    /// Number of worker threads; temporary segment storage has one set of rows per thread.
    pub num_threads: usize,
    /// Number of flat source regions in the mesh.
    pub num_regions: usize,
}

impl TrackingConfig {
    /// Create a new tracking configuration.
    ///
    /// # Arguments
    /// * `max_optical_length` - Largest optical thickness allowed per segment
    /// * `num_threads` - Worker threads (at least 1)
    /// * `num_regions` - Flat source regions in the mesh
    #[inline]
    pub const fn new(max_optical_length: f64, num_threads: usize, num_regions: usize) -> Self {
        Self {
            max_optical_length,
            num_threads,
            num_regions,
        }
    }

    /// Set the maximum optical path length.
    #[inline]
    pub const fn with_max_optical_length(mut self, max_optical_length: f64) -> Self {
        self.max_optical_length = max_optical_length;
        self
    }

    /// Set the number of worker threads.
    #[inline]
    pub const fn with_num_threads(mut self, num_threads: usize) -> Self {
        self.num_threads = num_threads;
        self
    }

    /// Set the number of flat source regions.
    #[inline]
    pub const fn with_num_regions(mut self, num_regions: usize) -> Self {
        self.num_regions = num_regions;
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if !(self.max_optical_length.is_finite() && self.max_optical_length > 0.0) {
            return Err(StorageError::InvalidConfig {
                message: "max_optical_length must be positive and finite",
            });
        }
        if self.num_threads == 0 {
            return Err(StorageError::InvalidConfig {
                message: "num_threads must be positive",
            });
        }
        Ok(())
    }
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            max_optical_length: DEFAULT_MAX_OPTICAL_LENGTH,
            num_threads: 1,
            num_regions: 0,
        }
    }
}
