//! Volume kernel: track-weighted accumulation of FSR volumes.
//!
//! Each segment contributes `weight × length` to its region, where the weight is the
//! track's share of phase space:
//!
//! ```text
//! weight = azim_spacing(a) · azim_weight(a)                                   (2D)
//! weight = azim_spacing(a) · azim_weight(a) · polar_spacing(a,p) · polar_weight(a,p)  (3D)
//! ```
//!
//! This is the only kernel that mutates shared state. The region's lock is held just for
//! the read-add-write of its accumulator.

use moc_core::{Material, Quadrature, RegionId, SurfaceId, Track};
use moc_storage::FsrVolumes;

use crate::error::{KernelError, Result};
use crate::generator::TrackGenerator;
use crate::kernel::{KernelState, MocKernel};

/// Accumulates FSR volumes and counts sub-segments.
#[derive(Clone)]
pub struct VolumeKernel<'a> {
    state: KernelState,
    volumes: &'a FsrVolumes,
    quadrature: &'a (dyn Quadrature + Sync),
    weight: f64,
}

impl<'a> VolumeKernel<'a> {
    /// Create a volume kernel borrowing the generator's volume buffer and quadrature.
    ///
    /// # Errors
    /// Returns `MissingFsrLocks` if the generator has not created its FSR locks; volume
    /// accumulation is unsafe without them. Returns `VolumeTableMismatch` if the table does
    /// not have one slot per region.
    pub fn new<G: TrackGenerator + ?Sized>(generator: &'a G) -> Result<Self> {
        let volumes = match generator.fsr_volumes() {
            Some(volumes) => volumes,
            None => {
                log::error!("Unable to create a VolumeKernel without first creating FSR locks");
                return Err(KernelError::MissingFsrLocks);
            }
        };
        if volumes.len() != generator.num_regions() {
            log::error!(
                "FSR volume table holds {} regions but the generator has {}",
                volumes.len(),
                generator.num_regions()
            );
            return Err(KernelError::VolumeTableMismatch {
                volumes: volumes.len(),
                num_regions: generator.num_regions(),
            });
        }

        Ok(Self {
            state: KernelState::new(generator.max_optical_length())?,
            volumes,
            quadrature: generator.quadrature(),
            weight: 0.0,
        })
    }

    /// Weight of the current track.
    #[inline]
    pub fn weight(&self) -> f64 {
        self.weight
    }
}

impl MocKernel for VolumeKernel<'_> {
    /// # Panics
    /// Panics if the track's angle indices are outside the quadrature.
    fn new_track(&mut self, track: &Track) {
        let azim = track.azim_index();
        let mut weight = self.quadrature.azim_spacing(azim) * self.quadrature.azim_weight(azim);

        if let Some(polar) = track.polar_index() {
            weight *= self.quadrature.polar_spacing(azim, polar)
                * self.quadrature.polar_weight(azim, polar);
        }

        self.weight = weight;
        self.state.reset();
    }

    #[inline]
    fn execute<M: Material + ?Sized>(
        &mut self,
        length: f64,
        material: &M,
        region: RegionId,
        _fwd_surface: Option<SurfaceId>,
        _bwd_surface: Option<SurfaceId>,
    ) -> Result<()> {
        let split = self.state.split(length, material)?;
        let count = self.state.count_after(split.num_cuts)?;
        self.volumes.add(region, self.weight * length)?;
        self.state.count = count;
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
    use moc_storage::{MacroMaterial, QuadratureTable, StorageError, TrackingConfig};

    fn generator() -> InMemoryTrackGenerator {
        let quadrature = QuadratureTable::new_3d(
            vec![0.5, 0.25],
            vec![0.4, 0.6],
            vec![vec![2.0, 3.0], vec![4.0, 5.0]],
            vec![vec![0.5, 0.5], vec![0.1, 0.9]],
        )
        .unwrap();
        let config = TrackingConfig::default().with_num_regions(4);
        InMemoryTrackGenerator::new(config, quadrature)
            .unwrap()
            .with_fsr_volumes()
    }

    #[test]
    fn test_requires_fsr_locks() {
        let quadrature = QuadratureTable::uniform(1, 1, 0.1, 1.0).unwrap();
        let generator =
            InMemoryTrackGenerator::new(TrackingConfig::default(), quadrature).unwrap();
        assert_eq!(
            VolumeKernel::new(&generator).err(),
            Some(KernelError::MissingFsrLocks)
        );
    }

    /// Generator whose volume table was sized for a different mesh.
    struct StaleGenerator {
        volumes: FsrVolumes,
        quadrature: QuadratureTable,
    }

    impl TrackGenerator for StaleGenerator {
        fn max_optical_length(&self) -> f64 {
            10.0
        }

        fn fsr_volumes(&self) -> Option<&FsrVolumes> {
            Some(&self.volumes)
        }

        fn quadrature(&self) -> &(dyn Quadrature + Sync) {
            &self.quadrature
        }

        fn num_regions(&self) -> usize {
            5
        }
    }

    #[test]
    fn test_rejects_volume_table_of_wrong_size() {
        let generator = StaleGenerator {
            volumes: FsrVolumes::new(3),
            quadrature: QuadratureTable::uniform(1, 1, 0.1, 1.0).unwrap(),
        };
        assert_eq!(
            VolumeKernel::new(&generator).err(),
            Some(KernelError::VolumeTableMismatch {
                volumes: 3,
                num_regions: 5
            })
        );
    }

    #[test]
    fn test_weight_2d_and_3d() {
        let generator = generator();
        let mut kernel = VolumeKernel::new(&generator).unwrap();

        kernel.new_track(&Track::new_2d(1));
        assert!((kernel.weight() - 0.25 * 0.6).abs() < 1e-12);

        kernel.new_track(&Track::new_3d(1, 1));
        assert!((kernel.weight() - 0.25 * 0.6 * 5.0 * 0.9).abs() < 1e-12);

        // recomputed from the new track only
        kernel.new_track(&Track::new_3d(0, 0));
        assert!((kernel.weight() - 0.5 * 0.4 * 2.0 * 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_execute_adds_weighted_length_and_counts() {
        let generator = generator();
        let water = MacroMaterial::new(2, "water", vec![0.5, 2.0]);
        let mut kernel = VolumeKernel::new(&generator).unwrap();

        kernel.new_track(&Track::new_2d(0));
        kernel.execute(3.0, &water, 2, None, None).unwrap();
        kernel.execute(12.0, &water, 3, None, None).unwrap();

        // 3.0 * 2.0 / 10 -> 1 cut, 12.0 * 2.0 / 10 -> 3 cuts
        assert_eq!(kernel.count(), 4);

        let volumes = generator.fsr_volumes_snapshot().unwrap();
        let weight = 0.5 * 0.4;
        assert!((volumes[2] - weight * 3.0).abs() < 1e-12);
        assert!((volumes[3] - weight * 12.0).abs() < 1e-12);
        assert_eq!(volumes[0], 0.0);

        kernel.new_track(&Track::new_2d(0));
        assert_eq!(kernel.count(), 0);
    }

    #[test]
    fn test_rejected_segment_leaves_volumes_untouched() {
        let generator = generator();
        let water = MacroMaterial::new(2, "water", vec![1.0]);
        let mut kernel = VolumeKernel::new(&generator).unwrap();
        kernel.new_track(&Track::new_2d(0));

        assert!(kernel.execute(-1.0, &water, 0, None, None).is_err());
        assert_eq!(
            kernel.execute(1.0, &water, 9, None, None),
            Err(KernelError::Storage(StorageError::RegionOutOfBounds {
                region: 9,
                num_regions: 4
            }))
        );
        assert_eq!(generator.fsr_volumes_snapshot(), Some(vec![0.0; 4]));
        assert_eq!(kernel.count(), 0);
    }

    #[test]
    fn test_set_max_optical_length() {
        let generator = generator();
        let fuel = MacroMaterial::new(1, "fuel", vec![1.0]);
        let mut kernel = VolumeKernel::new(&generator).unwrap();
        assert_eq!(kernel.max_optical_length(), 10.0);

        kernel.set_max_optical_length(1.0).unwrap();
        kernel.new_track(&Track::new_2d(0));
        kernel.execute(2.5, &fuel, 0, None, None).unwrap();
        assert_eq!(kernel.count(), 3);
    }
}
