//! Error types for moc_storage operations.
//!
//! Provides specific error variants for buffer indexing and table construction failures.

use core::fmt;

/// Errors that can occur during moc_storage operations.
#[derive(Debug, Clone, PartialEq)]
pub enum StorageError {
    /// A region id addressed past the end of the per-region buffers.
    RegionOutOfBounds {
        /// The requested region.
        region: usize,
        /// Number of regions held.
        num_regions: usize,
    },

    /// A thread id addressed past the per-thread segment storage.
    ThreadOutOfBounds {
        /// The requested thread.
        thread: usize,
        /// Number of threads with storage.
        num_threads: usize,
    },

    /// A row index addressed past a thread's segment rows.
    RowOutOfBounds {
        /// The requested row.
        row: usize,
        /// Number of rows for the thread.
        num_rows: usize,
    },

    /// Quadrature tables have inconsistent shapes or non-finite entries.
    InvalidQuadrature {
        /// Description of the inconsistency.
        message: &'static str,
    },

    /// Configuration value out of range.
    InvalidConfig {
        /// Description of the configuration error.
        message: &'static str,
    },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::RegionOutOfBounds {
                region,
                num_regions,
            } => {
                write!(
                    f,
                    "region {} out of bounds for {} regions",
                    region, num_regions
                )
            }
            StorageError::ThreadOutOfBounds {
                thread,
                num_threads,
            } => {
                write!(
                    f,
                    "thread {} out of bounds for {} threads",
                    thread, num_threads
                )
            }
            StorageError::RowOutOfBounds { row, num_rows } => {
                write!(f, "row {} out of bounds for {} rows", row, num_rows)
            }
            StorageError::InvalidQuadrature { message } => {
                write!(f, "invalid quadrature: {}", message)
            }
            StorageError::InvalidConfig { message } => {
                write!(f, "invalid configuration: {}", message)
            }
        }
    }
}

impl std::error::Error for StorageError {}

/// Result type alias for moc_storage operations.
pub type Result<T> = core::result::Result<T, StorageError>;
