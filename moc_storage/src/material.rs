//! Multigroup macroscopic material.

use moc_core::{Material, MaterialId};

/// A material with one macroscopic total cross-section per energy group.
#[derive(Debug, Clone, PartialEq)]
pub struct MacroMaterial {
    id: MaterialId,
    name: String,
    sigma_t: Vec<f64>,
}

impl MacroMaterial {
    /// Create a material from its per-group total cross-sections.
    pub fn new(id: u32, name: impl Into<String>, sigma_t: Vec<f64>) -> Self {
        Self {
            id: MaterialId(id),
            name: name.into(),
            sigma_t,
        }
    }

    /// Human-readable name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Material for MacroMaterial {
    #[inline]
    fn id(&self) -> MaterialId {
        self.id
    }

    #[inline]
    fn sigma_t(&self) -> &[f64] {
        &self.sigma_t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_macro_material() {
        // C5G7 UO2 total cross-sections
        let uo2 = MacroMaterial::new(
            1,
            "UO2",
            vec![
                1.779_49e-1,
                3.298_05e-1,
                4.803_88e-1,
                5.543_67e-1,
                3.118_01e-1,
                3.951_68e-1,
                5.644_06e-1,
            ],
        );

        assert_eq!(uo2.name(), "UO2");
        assert_eq!(uo2.id(), MaterialId(1));
        assert_eq!(uo2.num_energy_groups(), 7);
        assert!((uo2.max_sigma_t() - 5.644_06e-1).abs() < 1e-12);
    }
}
