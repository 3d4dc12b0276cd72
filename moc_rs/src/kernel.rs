//! The per-segment kernel interface.
//!
//! A driving sweep hands each kernel one track at a time:
//!
//! ```text
//! new_track(track) → execute(segment)* → count()
//! ```
//!
//! `execute` runs once per crossed region in geometric order and always advances `count`
//! by the number of sub-segments the segment splits into. Kernels are owned by one worker
//! and take `&mut self`, so an instance is never executed concurrently.

use moc_core::{split_material, Material, MocCoreError, RegionId, Segment, Split, SurfaceId, Track};

use crate::error::{KernelError, Result};

/// A per-segment callback invoked while tracing tracks.
pub trait MocKernel {
    /// Prepare for a new track: reset the count and recompute any per-track state.
    fn new_track(&mut self, track: &Track);

    /// Process one segment of the current track.
    ///
    /// # Errors
    /// Fails fast on a non-positive length or cross-section, and on variant-specific
    /// storage errors.
    fn execute<M: Material + ?Sized>(
        &mut self,
        length: f64,
        material: &M,
        region: RegionId,
        fwd_surface: Option<SurfaceId>,
        bwd_surface: Option<SurfaceId>,
    ) -> Result<()>;

    /// Sub-segments produced or counted since the last [`new_track`](Self::new_track).
    fn count(&self) -> usize;

    /// Current maximum optical path length of a sub-segment.
    fn max_optical_length(&self) -> f64;

    /// Change the maximum optical path length.
    ///
    /// # Errors
    /// Returns `NonPositiveOpticalLength` for non-positive or non-finite values.
    fn set_max_optical_length(&mut self, max_tau: f64) -> Result<()>;

    /// [`execute`](Self::execute) with the fields of a [`Segment`].
    #[inline]
    fn execute_segment<M: Material + ?Sized>(&mut self, segment: &Segment<'_, M>) -> Result<()> {
        self.execute(
            segment.length,
            segment.material,
            segment.region,
            segment.fwd_surface,
            segment.bwd_surface,
        )
    }
}

/// Count and optical-length limit shared by every kernel variant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct KernelState {
    pub(crate) count: usize,
    pub(crate) max_tau: f64,
}

impl KernelState {
    pub(crate) fn new(max_tau: f64) -> Result<Self> {
        Ok(Self {
            count: 0,
            max_tau: checked_max_tau(max_tau)?,
        })
    }

    #[inline]
    pub(crate) fn reset(&mut self) {
        self.count = 0;
    }

    #[inline]
    pub(crate) fn split<M: Material + ?Sized>(&self, length: f64, material: &M) -> Result<Split> {
        Ok(split_material(length, material, self.max_tau)?)
    }

    /// Count after adding `num_cuts` more sub-segments, without committing it.
    #[inline]
    pub(crate) fn count_after(&self, num_cuts: usize) -> Result<usize> {
        self.count
            .checked_add(num_cuts)
            .ok_or(KernelError::CountOverflow {
                count: self.count,
                num_cuts,
            })
    }

    pub(crate) fn set_max_tau(&mut self, max_tau: f64) -> Result<()> {
        self.max_tau = checked_max_tau(max_tau)?;
        Ok(())
    }
}

fn checked_max_tau(max_tau: f64) -> std::result::Result<f64, MocCoreError> {
    if max_tau.is_finite() && max_tau > 0.0 {
        Ok(max_tau)
    } else {
        Err(MocCoreError::NonPositiveOpticalLength { max_tau })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_rejects_bad_max_tau() {
        assert_eq!(
            KernelState::new(0.0),
            Err(KernelError::Split(MocCoreError::NonPositiveOpticalLength {
                max_tau: 0.0
            }))
        );

        let mut state = KernelState::new(1.0).unwrap();
        assert!(state.set_max_tau(f64::INFINITY).is_err());
        assert_eq!(state.max_tau, 1.0);
    }

    #[test]
    fn test_count_after_is_checked() {
        let mut state = KernelState::new(1.0).unwrap();
        state.count = 5;
        assert_eq!(state.count_after(3), Ok(8));
        assert_eq!(state.count, 5);

        state.count = usize::MAX - 1;
        assert_eq!(
            state.count_after(2),
            Err(KernelError::CountOverflow {
                count: usize::MAX - 1,
                num_cuts: 2
            })
        );
    }

    #[test]
    fn test_state_reset() {
        let mut state = KernelState::new(1.0).unwrap();
        state.count = 9;
        state.reset();
        assert_eq!(state.count, 0);
    }
}
