//! In-memory angular quadrature tables.
//!
//! Polar quantities are stored flat, indexed by `azim * num_polar + polar`.

use moc_core::Quadrature;

use crate::error::{Result, StorageError};

/// Azimuthal and polar spacing/weight lookup tables.
#[derive(Debug, Clone, PartialEq)]
pub struct QuadratureTable {
    azim_spacings: Vec<f64>,
    azim_weights: Vec<f64>,
    num_polar: usize,
    polar_spacings: Vec<f64>,
    polar_weights: Vec<f64>,
}

impl QuadratureTable {
    /// Build a 2D quadrature (one polar level with unit spacing and weight).
    ///
    /// # Errors
    /// Returns `InvalidQuadrature` if the tables are empty, differ in length, or hold
    /// non-finite values.
    pub fn new_2d(azim_spacings: Vec<f64>, azim_weights: Vec<f64>) -> Result<Self> {
        let num_azim = azim_spacings.len();
        Self::new_3d(
            azim_spacings,
            azim_weights,
            vec![vec![1.0]; num_azim],
            vec![vec![1.0]; num_azim],
        )
    }

    /// Build a 3D quadrature from per-azimuth rows of polar spacings and weights.
    ///
    /// # Errors
    /// Returns `InvalidQuadrature` if the tables are empty, have mismatched shapes, or
    /// hold non-finite values.
    pub fn new_3d(
        azim_spacings: Vec<f64>,
        azim_weights: Vec<f64>,
        polar_spacings: Vec<Vec<f64>>,
        polar_weights: Vec<Vec<f64>>,
    ) -> Result<Self> {
        let num_azim = azim_spacings.len();
        if num_azim == 0 {
            return Err(StorageError::InvalidQuadrature {
                message: "at least one azimuthal angle is required",
            });
        }
        if azim_weights.len() != num_azim
            || polar_spacings.len() != num_azim
            || polar_weights.len() != num_azim
        {
            return Err(StorageError::InvalidQuadrature {
                message: "azimuthal tables differ in length",
            });
        }

        let num_polar = polar_spacings[0].len();
        if num_polar == 0 {
            return Err(StorageError::InvalidQuadrature {
                message: "at least one polar angle is required",
            });
        }
        let rectangular = polar_spacings
            .iter()
            .chain(polar_weights.iter())
            .all(|row| row.len() == num_polar);
        if !rectangular {
            return Err(StorageError::InvalidQuadrature {
                message: "polar tables must have the same number of polar angles per azimuth",
            });
        }

        let polar_spacings: Vec<f64> = polar_spacings.into_iter().flatten().collect();
        let polar_weights: Vec<f64> = polar_weights.into_iter().flatten().collect();

        let all_finite = azim_spacings
            .iter()
            .chain(&azim_weights)
            .chain(&polar_spacings)
            .chain(&polar_weights)
            .all(|v| v.is_finite());
        if !all_finite {
            return Err(StorageError::InvalidQuadrature {
                message: "spacings and weights must be finite",
            });
        }

        Ok(Self {
            azim_spacings,
            azim_weights,
            num_polar,
            polar_spacings,
            polar_weights,
        })
    }

    /// Uniform quadrature: constant spacings and equal weights summing to one over each
    /// angular dimension.
    pub fn uniform(
        num_azim: usize,
        num_polar: usize,
        azim_spacing: f64,
        polar_spacing: f64,
    ) -> Result<Self> {
        if num_azim == 0 || num_polar == 0 {
            return Err(StorageError::InvalidQuadrature {
                message: "uniform quadrature needs at least one angle per dimension",
            });
        }
        let azim_weight = 1.0 / num_azim as f64;
        let polar_weight = 1.0 / num_polar as f64;
        Self::new_3d(
            vec![azim_spacing; num_azim],
            vec![azim_weight; num_azim],
            vec![vec![polar_spacing; num_polar]; num_azim],
            vec![vec![polar_weight; num_polar]; num_azim],
        )
    }

    #[inline]
    fn polar_index(&self, azim: usize, polar: usize) -> usize {
        assert!(
            polar < self.num_polar,
            "polar index {} out of range for {} polar angles",
            polar,
            self.num_polar
        );
        azim * self.num_polar + polar
    }
}

impl Quadrature for QuadratureTable {
    #[inline]
    fn num_azim(&self) -> usize {
        self.azim_spacings.len()
    }

    #[inline]
    fn num_polar(&self) -> usize {
        self.num_polar
    }

    #[inline]
    fn azim_spacing(&self, azim: usize) -> f64 {
        self.azim_spacings[azim]
    }

    #[inline]
    fn azim_weight(&self, azim: usize) -> f64 {
        self.azim_weights[azim]
    }

    #[inline]
    fn polar_spacing(&self, azim: usize, polar: usize) -> f64 {
        self.polar_spacings[self.polar_index(azim, polar)]
    }

    #[inline]
    fn polar_weight(&self, azim: usize, polar: usize) -> f64 {
        self.polar_weights[self.polar_index(azim, polar)]
    }
}
