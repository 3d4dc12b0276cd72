//! Error types for moc_rs.

use moc_core::MocCoreError;
use moc_storage::StorageError;
use thiserror::Error;

/// Errors that can occur while constructing or running segment kernels.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KernelError {
    /// The generator has no FSR lock table, so volumes cannot be accumulated safely.
    #[error("unable to create a volume kernel without first creating FSR locks")]
    MissingFsrLocks,

    /// The FSR volume table does not hold one slot per region of the generator.
    #[error("FSR volume table holds {volumes} regions, generator has {num_regions}")]
    VolumeTableMismatch {
        /// Slots in the volume table.
        volumes: usize,
        /// Regions reported by the generator.
        num_regions: usize,
    },

    /// A segment would write past the end of the bound record buffer.
    #[error("segment buffer overflow: {required} records required, capacity is {capacity}")]
    BufferOverflow {
        /// Records needed after this segment.
        required: usize,
        /// Length of the bound buffer.
        capacity: usize,
    },

    /// A track produced more sub-segments than a `usize` can count.
    #[error("sub-segment count overflow: {count} counted, {num_cuts} more requested")]
    CountOverflow {
        /// Count before the rejected segment.
        count: usize,
        /// Sub-segments of the rejected segment.
        num_cuts: usize,
    },

    /// A segment or the maximum optical length violated a splitting precondition.
    #[error("invalid segment: {0}")]
    Split(#[from] MocCoreError),

    /// Shared or temporary storage rejected an access.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Result type alias for moc_rs operations.
pub type Result<T> = std::result::Result<T, KernelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = KernelError::BufferOverflow {
            required: 7,
            capacity: 5,
        };
        assert_eq!(
            err.to_string(),
            "segment buffer overflow: 7 records required, capacity is 5"
        );

        let err: KernelError = MocCoreError::NoEnergyGroups.into();
        assert_eq!(err.to_string(), "invalid segment: material has no energy groups");
    }

    #[test]
    fn test_from_storage_error() {
        let err: KernelError = StorageError::RegionOutOfBounds {
            region: 4,
            num_regions: 2,
        }
        .into();
        assert!(matches!(err, KernelError::Storage(_)));
    }
}
