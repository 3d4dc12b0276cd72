//! Traits for the collaborators a segment kernel queries.
//!
//! Material cross-section storage and angular quadrature are owned elsewhere; kernels only
//! read them through these traits. `moc_storage` provides in-memory implementations.

use crate::split::max_sigma_t;
use crate::types::MaterialId;

/// Per-group macroscopic cross-sections of a material.
///
/// Materials are immutable during a tracing pass and shared by many segments.
pub trait Material {
    /// Identifier written into segment records.
    fn id(&self) -> MaterialId;

    /// Macroscopic total cross-section for each energy group.
    fn sigma_t(&self) -> &[f64];

    /// Number of energy groups.
    #[inline]
    fn num_energy_groups(&self) -> usize {
        self.sigma_t().len()
    }

    /// Largest total cross-section over all energy groups.
    #[inline]
    fn max_sigma_t(&self) -> f64 {
        max_sigma_t(self.sigma_t())
    }
}

impl<T: Material + ?Sized> Material for &T {
    #[inline]
    fn id(&self) -> MaterialId {
        (**self).id()
    }

    #[inline]
    fn sigma_t(&self) -> &[f64] {
        (**self).sigma_t()
    }
}

/// Angular quadrature lookup tables.
///
/// Spacing and weight are looked up by azimuthal index, and by (azimuthal, polar) index
/// pair for polar quantities.
pub trait Quadrature {
    /// Number of azimuthal angles.
    fn num_azim(&self) -> usize;

    /// Number of polar angles (1 for purely 2D quadratures).
    fn num_polar(&self) -> usize;

    /// Perpendicular spacing between tracks of the given azimuthal angle.
    fn azim_spacing(&self, azim: usize) -> f64;

    /// Azimuthal quadrature weight.
    fn azim_weight(&self, azim: usize) -> f64;

    /// Axial spacing between 3D tracks of the given angle pair.
    fn polar_spacing(&self, azim: usize, polar: usize) -> f64;

    /// Polar quadrature weight.
    fn polar_weight(&self, azim: usize, polar: usize) -> f64;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TwoGroup {
        sigma_t: [f64; 2],
    }

    impl Material for TwoGroup {
        fn id(&self) -> MaterialId {
            MaterialId(9)
        }

        fn sigma_t(&self) -> &[f64] {
            &self.sigma_t
        }
    }

    #[test]
    fn test_material_defaults() {
        let mat = TwoGroup {
            sigma_t: [0.4, 1.3],
        };
        assert_eq!(mat.num_energy_groups(), 2);
        assert!((mat.max_sigma_t() - 1.3).abs() < 1e-12);
    }

    #[test]
    fn test_material_through_reference() {
        let mat = TwoGroup {
            sigma_t: [0.4, 1.3],
        };
        let by_ref = &mat;
        assert_eq!(Material::id(&by_ref), MaterialId(9));
        assert_eq!(by_ref.num_energy_groups(), 2);
    }
}
