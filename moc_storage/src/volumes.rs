//! Per-region volume accumulators guarded by per-region locks.
//!
//! Volume tracing sums `weight × length` over every segment crossing a region. Many
//! threads trace tracks at once, so each region slot sits behind its own lock: writes to
//! disjoint regions proceed in parallel, writes to the same region serialize, and no update
//! is lost. Lock and slot are stored together, so the lock table always has exactly one
//! entry per region.

use std::sync::{Mutex, MutexGuard};

use moc_core::RegionId;

use crate::error::{Result, StorageError};

/// Shared FSR volume buffer with one lock per region.
#[derive(Debug)]
pub struct FsrVolumes {
    slots: Box<[Mutex<f64>]>,
}

impl FsrVolumes {
    /// Allocate zeroed accumulators and their locks for `num_regions` regions.
    pub fn new(num_regions: usize) -> Self {
        let slots = (0..num_regions)
            .map(|_| Mutex::new(0.0))
            .collect::<Vec<_>>()
            .into_boxed_slice();
        Self { slots }
    }

    /// Number of regions (equal to the number of locks).
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the buffer holds no regions.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[inline]
    fn lock(&self, region: RegionId) -> Result<MutexGuard<'_, f64>> {
        let slot = self
            .slots
            .get(region)
            .ok_or(StorageError::RegionOutOfBounds {
                region,
                num_regions: self.slots.len(),
            })?;
        // A panic while holding the guard cannot leave a plain f64 half-written.
        Ok(slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner()))
    }

    /// Add `value` to the region's accumulator under the region's lock.
    ///
    /// # Errors
    /// Returns `RegionOutOfBounds` if `region` is not a valid region id.
    #[inline]
    pub fn add(&self, region: RegionId, value: f64) -> Result<()> {
        let mut slot = self.lock(region)?;
        *slot += value;
        Ok(())
    }

    /// Current accumulated volume of a region.
    pub fn get(&self, region: RegionId) -> Result<f64> {
        Ok(*self.lock(region)?)
    }

    /// Copy all accumulated volumes, indexed by region id.
    pub fn snapshot(&self) -> Vec<f64> {
        (0..self.slots.len())
            .map(|region| self.lock(region).map(|slot| *slot).unwrap_or(0.0))
            .collect()
    }

    /// Sum of all region volumes.
    pub fn total(&self) -> f64 {
        self.snapshot().iter().sum()
    }

    /// Zero every accumulator.
    pub fn clear(&self) {
        for region in 0..self.slots.len() {
            if let Ok(mut slot) = self.lock(region) {
                *slot = 0.0;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_zeroed() {
        let volumes = FsrVolumes::new(4);
        assert_eq!(volumes.len(), 4);
        assert!(!volumes.is_empty());
        assert_eq!(volumes.snapshot(), vec![0.0; 4]);
    }

    #[test]
    fn test_add_accumulates() {
        let volumes = FsrVolumes::new(3);
        volumes.add(1, 0.5).unwrap();
        volumes.add(1, 0.25).unwrap();
        volumes.add(2, 1.0).unwrap();

        assert_eq!(volumes.get(0).unwrap(), 0.0);
        assert_eq!(volumes.get(1).unwrap(), 0.75);
        assert_eq!(volumes.total(), 1.75);
    }

    #[test]
    fn test_out_of_bounds_region() {
        let volumes = FsrVolumes::new(2);
        assert_eq!(
            volumes.add(2, 1.0),
            Err(StorageError::RegionOutOfBounds {
                region: 2,
                num_regions: 2
            })
        );
        assert!(volumes.get(5).is_err());
    }

    #[test]
    fn test_clear() {
        let volumes = FsrVolumes::new(2);
        volumes.add(0, 3.0).unwrap();
        volumes.clear();
        assert_eq!(volumes.snapshot(), vec![0.0, 0.0]);
    }

    #[test]
    fn test_poisoned_lock_is_recovered() {
        use std::sync::Arc;
        use std::thread;

        let volumes = Arc::new(FsrVolumes::new(1));
        volumes.add(0, 1.0).unwrap();

        let poisoner = Arc::clone(&volumes);
        let result = thread::spawn(move || {
            let _guard = poisoner.slots[0].lock().unwrap();
            panic!("poison the region lock");
        })
        .join();
        assert!(result.is_err());

        volumes.add(0, 1.0).unwrap();
        assert_eq!(volumes.get(0).unwrap(), 2.0);
    }
}
