//! Segmentation kernel: materializes split sub-segments.
//!
//! Writes one [`SegmentRecord`] per sub-segment into a pre-sized buffer, normally a row of
//! [`TemporarySegments`](moc_storage::TemporarySegments) sized by a
//! [`CounterKernel`](crate::CounterKernel) pass over the same track. Without a buffer the
//! kernel does nothing, which is how contexts without segment storage (2D) run it.
//!
//! For a segment split into `n` pieces:
//!
//! ```text
//! piece:      0          1   ...   n-2         n-1
//! length:     cut        cut       cut         remainder
//! bwd:        original   -         -           -          (original if n == 1)
//! fwd:        -          -         -           original
//! ```

use moc_core::{Material, RegionId, SegmentRecord, SurfaceId, Track};

use crate::error::{KernelError, Result};
use crate::generator::TrackGenerator;
use crate::kernel::{KernelState, MocKernel};

/// Writes split sub-segments into a bound record buffer.
#[derive(Debug)]
pub struct SegmentationKernel<'s> {
    state: KernelState,
    segments: Option<&'s mut [SegmentRecord]>,
}

impl<'s> SegmentationKernel<'s> {
    /// Create a segmentation kernel writing into `segments`.
    ///
    /// # Errors
    /// Returns `NonPositiveOpticalLength` if the generator's limit is not positive.
    pub fn new<G: TrackGenerator + ?Sized>(
        generator: &G,
        segments: Option<&'s mut [SegmentRecord]>,
    ) -> Result<Self> {
        if segments.is_none() {
            log::debug!("SegmentationKernel created without segment storage; execute is a no-op");
        }
        Ok(Self {
            state: KernelState::new(generator.max_optical_length())?,
            segments,
        })
    }

    /// Whether a record buffer is bound.
    #[inline]
    pub fn is_bound(&self) -> bool {
        self.segments.is_some()
    }

    /// Length of the bound buffer (0 when unbound).
    #[inline]
    pub fn capacity(&self) -> usize {
        self.segments.as_deref().map_or(0, <[SegmentRecord]>::len)
    }

    /// Records written for the current track.
    pub fn records(&self) -> &[SegmentRecord] {
        match self.segments.as_deref() {
            Some(segments) => &segments[..self.state.count],
            None => &[],
        }
    }
}

impl MocKernel for SegmentationKernel<'_> {
    #[inline]
    fn new_track(&mut self, _track: &Track) {
        self.state.reset();
    }

    fn execute<M: Material + ?Sized>(
        &mut self,
        length: f64,
        material: &M,
        region: RegionId,
        fwd_surface: Option<SurfaceId>,
        bwd_surface: Option<SurfaceId>,
    ) -> Result<()> {
        let Some(segments) = self.segments.as_deref_mut() else {
            return Ok(());
        };

        let split = self.state.split(length, material)?;
        let start = self.state.count;
        let end = self.state.count_after(split.num_cuts)?;
        if end > segments.len() {
            return Err(KernelError::BufferOverflow {
                required: end,
                capacity: segments.len(),
            });
        }

        let material = material.id();
        let last = split.num_cuts - 1;
        for (i, (record, piece)) in segments[start..end]
            .iter_mut()
            .zip(split.lengths(length))
            .enumerate()
        {
            *record = SegmentRecord {
                length: piece,
                material,
                region,
                fwd_surface: if i == last { fwd_surface } else { None },
                bwd_surface: if i == 0 { bwd_surface } else { None },
            };
        }

        self.state.count = end;
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
    use crate::generator::InMemoryTrackGenerator;
    use moc_core::MaterialId;
    use moc_storage::{MacroMaterial, QuadratureTable, TrackingConfig};

    fn generator() -> InMemoryTrackGenerator {
        let quadrature = QuadratureTable::uniform(1, 1, 0.1, 1.0).unwrap();
        InMemoryTrackGenerator::new(TrackingConfig::default(), quadrature).unwrap()
    }

    #[test]
    fn test_unbound_is_noop() {
        let generator = generator();
        let fuel = MacroMaterial::new(1, "fuel", vec![1.0]);
        let mut kernel = SegmentationKernel::new(&generator, None).unwrap();

        assert!(!kernel.is_bound());
        kernel.new_track(&Track::new_2d(0));
        kernel.execute(25.0, &fuel, 0, None, None).unwrap();
        assert_eq!(kernel.count(), 0);
        assert!(kernel.records().is_empty());
    }

    #[test]
    fn test_split_records() {
        let generator = generator();
        let fuel = MacroMaterial::new(4, "fuel", vec![0.5, 1.0]);
        let mut buffer = vec![SegmentRecord::default(); 3];
        let mut kernel = SegmentationKernel::new(&generator, Some(buffer.as_mut_slice())).unwrap();

        kernel.new_track(&Track::new_2d(0));
        kernel
            .execute(25.0, &fuel, 6, Some(SurfaceId(11)), Some(SurfaceId(22)))
            .unwrap();
        assert_eq!(kernel.count(), 3);
        assert_eq!(kernel.records().len(), 3);
        drop(kernel);

        let lengths: Vec<f64> = buffer.iter().map(|r| r.length).collect();
        assert_eq!(lengths, vec![10.0, 10.0, 5.0]);
        assert!(buffer.iter().all(|r| r.region == 6 && r.material == MaterialId(4)));

        assert_eq!(buffer[0].bwd_surface, Some(SurfaceId(22)));
        assert_eq!(buffer[0].fwd_surface, None);
        assert_eq!(buffer[1].bwd_surface, None);
        assert_eq!(buffer[1].fwd_surface, None);
        assert_eq!(buffer[2].bwd_surface, None);
        assert_eq!(buffer[2].fwd_surface, Some(SurfaceId(11)));
    }

    #[test]
    fn test_overflow_is_rejected_before_writing() {
        let generator = generator();
        let fuel = MacroMaterial::new(1, "fuel", vec![1.0]);
        let mut buffer = vec![SegmentRecord::default(); 2];
        let mut kernel = SegmentationKernel::new(&generator, Some(buffer.as_mut_slice())).unwrap();
        assert_eq!(kernel.capacity(), 2);

        kernel.new_track(&Track::new_2d(0));
        assert_eq!(
            kernel.execute(25.0, &fuel, 0, None, None),
            Err(KernelError::BufferOverflow {
                required: 3,
                capacity: 2
            })
        );
        assert_eq!(kernel.count(), 0);
        drop(kernel);
        assert!(buffer.iter().all(|r| *r == SegmentRecord::default()));
    }
}
