//! Error types for moc_core operations.
//!
//! Provides a simple error enum with no external dependencies for no_std compatibility.

use core::fmt;

/// Precondition failures of the splitting arithmetic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MocCoreError {
    /// The segment length was zero, negative, or not finite.
    NonPositiveLength {
        /// The rejected length.
        length: f64,
    },
    /// The largest group cross-section of the material was zero, negative, or not finite.
    NonPositiveCrossSection {
        /// The rejected maximum cross-section.
        max_sigma_t: f64,
    },
    /// The maximum optical path length was zero, negative, or not finite.
    NonPositiveOpticalLength {
        /// The rejected maximum optical length.
        max_tau: f64,
    },
    /// The material exposes no energy groups.
    NoEnergyGroups,
    /// The segment's optical length needs more sub-segments than a `usize` can count.
    TooManyCuts {
        /// The rejected ratio `length * max_sigma_t / max_tau`.
        ratio: f64,
    },
}

impl fmt::Display for MocCoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MocCoreError::NonPositiveLength { length } => {
                write!(f, "segment length {} must be positive and finite", length)
            }
            MocCoreError::NonPositiveCrossSection { max_sigma_t } => {
                write!(
                    f,
                    "maximum total cross-section {} must be positive and finite",
                    max_sigma_t
                )
            }
            MocCoreError::NonPositiveOpticalLength { max_tau } => {
                write!(
                    f,
                    "maximum optical length {} must be positive and finite",
                    max_tau
                )
            }
            MocCoreError::NoEnergyGroups => write!(f, "material has no energy groups"),
            MocCoreError::TooManyCuts { ratio } => {
                write!(
                    f,
                    "optical length ratio {} exceeds the countable number of cuts",
                    ratio
                )
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for MocCoreError {}
