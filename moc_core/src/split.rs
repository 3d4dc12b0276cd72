//! Optical-length splitting of track segments.
//!
//! A segment of length `L` through a material whose largest group cross-section is `σ`
//! has optical thickness `L·σ`. It is cut into the fewest pieces whose optical thickness
//! stays within `max_tau`:
//!
//! ```text
//! num_cuts = max(ceil(L·σ / max_tau), 1)
//! ```
//!
//! Every piece but the last has length `max_tau / σ`; the last takes the remainder.
//!
//! ## Exact multiples
//!
//! When `L·σ / max_tau` lands within [`CUT_RATIO_TOLERANCE`] (relative) of an integer `n`,
//! exactly `n` cuts are produced. Without this, rounding noise such as
//! `0.3 / 0.1 = 3.0000000000000004` would add a sliver segment of near-zero length.

use crate::error::MocCoreError;
use crate::traits::Material;

/// Relative distance from an integer below which a cut ratio counts as that integer.
pub const CUT_RATIO_TOLERANCE: f64 = 1e-9;

/// Result of splitting one segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Split {
    /// Number of sub-segments, always at least 1.
    pub num_cuts: usize,
    /// Largest group cross-section of the segment's material.
    pub max_sigma_t: f64,
    /// Length of every sub-segment except the last (`max_tau / max_sigma_t`).
    pub cut_length: f64,
}

impl Split {
    /// Sub-segment lengths in traversal order for a segment of `length`.
    #[inline]
    pub fn lengths(&self, length: f64) -> SubLengths {
        SubLengths {
            remaining: length,
            cut_length: self.cut_length,
            left: self.num_cuts,
        }
    }
}

/// Iterator over sub-segment lengths, see [`Split::lengths`].
#[derive(Debug, Clone)]
pub struct SubLengths {
    remaining: f64,
    cut_length: f64,
    left: usize,
}

impl Iterator for SubLengths {
    type Item = f64;

    #[inline]
    fn next(&mut self) -> Option<f64> {
        match self.left {
            0 => None,
            1 => {
                self.left = 0;
                Some(self.remaining)
            }
            _ => {
                self.left -= 1;
                self.remaining -= self.cut_length;
                Some(self.cut_length)
            }
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.left, Some(self.left))
    }
}

impl ExactSizeIterator for SubLengths {}

/// Largest value in a per-group cross-section array (0 when empty).
#[inline]
pub fn max_sigma_t(sigma_t: &[f64]) -> f64 {
    sigma_t
        .iter()
        .fold(0.0, |max, &sigma| if sigma > max { sigma } else { max })
}

/// Number of sub-segments needed to keep each piece within `max_tau`.
///
/// Inputs are assumed valid; [`split_segment`] checks them.
#[inline]
pub fn num_cuts(length: f64, max_sigma_t: f64, max_tau: f64) -> usize {
    let ratio = length * max_sigma_t / max_tau;
    let nearest = libm::round(ratio);
    let cuts = if libm::fabs(ratio - nearest) <= CUT_RATIO_TOLERANCE * nearest.max(1.0) {
        nearest
    } else {
        libm::ceil(ratio)
    };

    if cuts < 1.0 {
        1
    } else {
        cuts as usize
    }
}

/// Split a segment of `length` through a material with group cross-sections `sigma_t`.
///
/// # Errors
/// Fails fast on a non-positive or non-finite length, maximum cross-section or
/// `max_tau`, on an empty cross-section array, and with `TooManyCuts` when the cut count
/// would not fit in a `usize`.
pub fn split_segment(length: f64, sigma_t: &[f64], max_tau: f64) -> Result<Split, MocCoreError> {
    if sigma_t.is_empty() {
        return Err(MocCoreError::NoEnergyGroups);
    }
    if !(length.is_finite() && length > 0.0) {
        return Err(MocCoreError::NonPositiveLength { length });
    }
    if !(max_tau.is_finite() && max_tau > 0.0) {
        return Err(MocCoreError::NonPositiveOpticalLength { max_tau });
    }

    let max_sigma_t = max_sigma_t(sigma_t);
    if !(max_sigma_t.is_finite() && max_sigma_t > 0.0) {
        return Err(MocCoreError::NonPositiveCrossSection { max_sigma_t });
    }

    // usize::MAX as f64 rounds up to 2^64, so a ceiling below it converts exactly
    let ratio = length * max_sigma_t / max_tau;
    if !(ratio.is_finite() && libm::ceil(ratio) < usize::MAX as f64) {
        return Err(MocCoreError::TooManyCuts { ratio });
    }

    Ok(Split {
        num_cuts: num_cuts(length, max_sigma_t, max_tau),
        max_sigma_t,
        cut_length: max_tau / max_sigma_t,
    })
}

/// [`split_segment`] for a [`Material`].
#[inline]
pub fn split_material<M: Material + ?Sized>(
    length: f64,
    material: &M,
    max_tau: f64,
) -> Result<Split, MocCoreError> {
    split_segment(length, material.sigma_t(), max_tau)
}
