//! Core types for MOC segment processing.
//!
//! Tracks, region/material/surface identifiers, the per-crossing segment input and the
//! sub-segment record written by the segmentation pass.

use core::fmt;

/// Index of a flat source region (FSR). Used directly as an index into per-region buffers.
pub type RegionId = usize;

/// Identifier of a material. Records refer to materials by id so they stay `Copy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct MaterialId(pub u32);

impl fmt::Display for MaterialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "material#{}", self.0)
    }
}

/// Coupling-surface tag attached to a segment's entry or exit face, used by the
/// coarse-mesh (CMFD) acceleration scheme.
///
/// Segments carry `Option<SurfaceId>`; `None` means the face lies on no coupling surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceId(pub u32);

/// A characteristic ray.
///
/// A track always has an azimuthal index. Tracks generated for 3D geometries also carry a
/// polar index; the 2D/3D distinction lives in the value, not in the type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Track {
    uid: usize,
    azim_index: usize,
    polar_index: Option<usize>,
}

impl Track {
    /// Create a 2D track with the given azimuthal index.
    #[inline]
    pub const fn new_2d(azim_index: usize) -> Self {
        Self {
            uid: 0,
            azim_index,
            polar_index: None,
        }
    }

    /// Create a 3D track with azimuthal and polar indices.
    #[inline]
    pub const fn new_3d(azim_index: usize, polar_index: usize) -> Self {
        Self {
            uid: 0,
            azim_index,
            polar_index: Some(polar_index),
        }
    }

    /// Attach a generator-assigned unique id.
    #[inline]
    pub const fn with_uid(mut self, uid: usize) -> Self {
        self.uid = uid;
        self
    }

    /// Generator-assigned unique id (0 unless set).
    #[inline]
    pub const fn uid(&self) -> usize {
        self.uid
    }

    /// Azimuthal angle index into the quadrature.
    #[inline]
    pub const fn azim_index(&self) -> usize {
        self.azim_index
    }

    /// Polar angle index, present only for 3D tracks.
    #[inline]
    pub const fn polar_index(&self) -> Option<usize> {
        self.polar_index
    }

    /// Whether this track carries a polar index.
    #[inline]
    pub const fn is_3d(&self) -> bool {
        self.polar_index.is_some()
    }
}

/// One crossing of a track through a flat source region, as produced by ray tracing.
pub struct Segment<'m, M: ?Sized> {
    /// Chord length through the region.
    pub length: f64,
    /// Material filling the region.
    pub material: &'m M,
    /// Region crossed.
    pub region: RegionId,
    /// Coupling surface at the exit face.
    pub fwd_surface: Option<SurfaceId>,
    /// Coupling surface at the entry face.
    pub bwd_surface: Option<SurfaceId>,
}

impl<'m, M: ?Sized> Segment<'m, M> {
    /// Create a segment lying on no coupling surface.
    #[inline]
    pub fn new(length: f64, material: &'m M, region: RegionId) -> Self {
        Self {
            length,
            material,
            region,
            fwd_surface: None,
            bwd_surface: None,
        }
    }

    /// Set the forward (exit) and backward (entry) coupling surfaces.
    #[inline]
    pub fn with_surfaces(mut self, fwd: Option<SurfaceId>, bwd: Option<SurfaceId>) -> Self {
        self.fwd_surface = fwd;
        self.bwd_surface = bwd;
        self
    }
}

impl<M: ?Sized> Clone for Segment<'_, M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M: ?Sized> Copy for Segment<'_, M> {}

impl<M: ?Sized> fmt::Debug for Segment<'_, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Segment")
            .field("length", &self.length)
            .field("region", &self.region)
            .field("fwd_surface", &self.fwd_surface)
            .field("bwd_surface", &self.bwd_surface)
            .finish_non_exhaustive()
    }
}

/// A materialized sub-segment.
///
/// Same shape as [`Segment`], but possibly one of several pieces replacing it after
/// optical-length splitting.
///
/// The material is recorded by [`MaterialId`] only; this crate keeps no id-to-material
/// lookup, so consumers resolve ids against their own material registry.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SegmentRecord {
    /// Length of this piece.
    pub length: f64,
    /// Material of the original segment.
    pub material: MaterialId,
    /// Region of the original segment.
    pub region: RegionId,
    /// Exit coupling surface; set only on the last piece of a split segment.
    pub fwd_surface: Option<SurfaceId>,
    /// Entry coupling surface; set only on the first piece of a split segment.
    pub bwd_surface: Option<SurfaceId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_capability() {
        let flat = Track::new_2d(3);
        assert_eq!(flat.azim_index(), 3);
        assert_eq!(flat.polar_index(), None);
        assert!(!flat.is_3d());

        let full = Track::new_3d(3, 1).with_uid(42);
        assert_eq!(full.polar_index(), Some(1));
        assert_eq!(full.uid(), 42);
        assert!(full.is_3d());
    }

    #[test]
    fn test_segment_builder() {
        let sigma = [1.0f64, 2.0];
        let seg = Segment::new(2.5, &sigma[..], 7)
            .with_surfaces(Some(SurfaceId(1)), Some(SurfaceId(2)));
        let copy = seg;
        assert_eq!(copy.region, 7);
        assert_eq!(copy.fwd_surface, Some(SurfaceId(1)));
        assert_eq!(seg.bwd_surface, Some(SurfaceId(2)));
    }

    #[test]
    fn test_record_default_has_no_surfaces() {
        let record = SegmentRecord::default();
        assert_eq!(record.fwd_surface, None);
        assert_eq!(record.bwd_surface, None);
        assert_eq!(record.material, MaterialId(0));
    }
}
