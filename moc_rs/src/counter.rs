//! Counter kernel: sizing pass for segmentation.
//!
//! Counts the sub-segments a track produces without storing them, so that the exact-size
//! record buffer for [`SegmentationKernel`](crate::SegmentationKernel) can be allocated.

use moc_core::{Material, RegionId, SurfaceId, Track};

use crate::error::Result;
use crate::generator::TrackGenerator;
use crate::kernel::{KernelState, MocKernel};

/// Counts sub-segments; no other side effects.
#[derive(Debug, Clone)]
pub struct CounterKernel {
    state: KernelState,
}

impl CounterKernel {
    /// Create a counter kernel using the generator's maximum optical length.
    ///
    /// # Errors
    /// Returns `NonPositiveOpticalLength` if the generator's limit is not positive.
    pub fn new<G: TrackGenerator + ?Sized>(generator: &G) -> Result<Self> {
        Self::with_max_optical_length(generator.max_optical_length())
    }

    /// Create a counter kernel with an explicit maximum optical length.
    pub fn with_max_optical_length(max_tau: f64) -> Result<Self> {
        Ok(Self {
            state: KernelState::new(max_tau)?,
        })
    }
}

impl MocKernel for CounterKernel {
    #[inline]
    fn new_track(&mut self, _track: &Track) {
        self.state.reset();
    }

    #[inline]
    fn execute<M: Material + ?Sized>(
        &mut self,
        length: f64,
        material: &M,
        _region: RegionId,
        _fwd_surface: Option<SurfaceId>,
        _bwd_surface: Option<SurfaceId>,
    ) -> Result<()> {
        let split = self.state.split(length, material)?;
        self.state.count = self.state.count_after(split.num_cuts)?;
        Ok(())
    }

    #[inline]
    fn count(&self) -> usize {
        self.state.count
    }

    #[inline]
    fn max_optical_length(&self) -> f64 {
        self.state.max_tau
    }

    fn set_max_optical_length(&mut self, max_tau: f64) -> Result<()> {
        self.state.set_max_tau(max_tau)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use moc_storage::MacroMaterial;

    #[test]
    fn test_counts_cuts() {
        let moderator = MacroMaterial::new(3, "moderator", vec![0.2, 1.0]);
        let mut kernel = CounterKernel::with_max_optical_length(10.0).unwrap();

        kernel.new_track(&Track::new_2d(0));
        kernel.execute(25.0, &moderator, 0, None, None).unwrap();
        kernel.execute(10.0, &moderator, 1, None, None).unwrap();
        kernel.execute(0.5, &moderator, 2, None, None).unwrap();
        assert_eq!(kernel.count(), 5);

        kernel.new_track(&Track::new_3d(1, 0));
        assert_eq!(kernel.count(), 0);
    }

    #[test]
    fn test_rejects_zero_cross_section() {
        let void = MacroMaterial::new(0, "void", vec![0.0, 0.0]);
        let mut kernel = CounterKernel::with_max_optical_length(10.0).unwrap();
        kernel.new_track(&Track::new_2d(0));
        assert!(kernel.execute(1.0, &void, 0, None, None).is_err());
        assert_eq!(kernel.count(), 0);
    }
}
