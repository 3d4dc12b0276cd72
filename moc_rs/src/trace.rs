//! Tracing passes that drive the kernels over tracks.
//!
//! Three passes run over the same geometry:
//!
//! 1. **Volume pass** ([`accumulate_volumes`]): FSR volumes, shared buffer, locked per region.
//! 2. **Size pass** ([`count_segments`]): sub-segments per track.
//! 3. **Materialize pass** ([`segmentize`]): sizes each storage row exactly, then fills it.
//!
//! With the `rayon` feature, tracks (or batches of tracks) are processed in parallel. Every
//! rayon job owns its own kernel; the FSR volume buffer is the only shared mutable state.

use moc_core::{Material, Segment, SegmentRecord, Track};
use moc_storage::{StorageError, TemporarySegments, ThreadSegments};

use crate::counter::CounterKernel;
use crate::error::{KernelError, Result};
use crate::generator::TrackGenerator;
use crate::kernel::MocKernel;
use crate::segmentation::SegmentationKernel;
use crate::volume::VolumeKernel;

/// A track and its segments in geometric crossing order.
pub struct TrackSegments<'m, M: ?Sized> {
    /// The track.
    pub track: Track,
    /// Crossings, ordered from the track's start to its end.
    pub segments: Vec<Segment<'m, M>>,
}

impl<'m, M: ?Sized> TrackSegments<'m, M> {
    /// Pair a track with its crossings.
    pub fn new(track: Track, segments: Vec<Segment<'m, M>>) -> Self {
        Self { track, segments }
    }

    /// Total chord length of the track.
    pub fn length(&self) -> f64 {
        self.segments.iter().map(|s| s.length).sum()
    }
}

/// Run one kernel over one track and return its final count.
pub fn trace_track<K, M>(kernel: &mut K, track: &TrackSegments<'_, M>) -> Result<usize>
where
    K: MocKernel,
    M: Material + ?Sized,
{
    kernel.new_track(&track.track);
    for segment in &track.segments {
        kernel.execute_segment(segment)?;
    }
    Ok(kernel.count())
}

fn num_segments<M: ?Sized>(tracks: &[TrackSegments<'_, M>]) -> usize {
    tracks.iter().map(|t| t.segments.len()).sum()
}

/// Volume pass: add every segment's weighted length to its region's volume.
///
/// # Errors
/// Returns `MissingFsrLocks` if the generator has no lock table, or the first segment
/// error encountered.
pub fn accumulate_volumes<G, M>(generator: &G, tracks: &[TrackSegments<'_, M>]) -> Result<()>
where
    G: TrackGenerator + Sync + ?Sized,
    M: Material + Sync + ?Sized,
{
    let prototype = VolumeKernel::new(generator)?;
    log::debug!(
        "Volume pass over {} tracks, {} segments",
        tracks.len(),
        num_segments(tracks)
    );

    #[cfg(feature = "rayon")]
    {
        use rayon::prelude::*;

        tracks.par_iter().try_for_each_init(
            || prototype.clone(),
            |kernel, track| trace_track(kernel, track).map(drop),
        )
    }

    #[cfg(not(feature = "rayon"))]
    {
        let mut kernel = prototype;
        for track in tracks {
            trace_track(&mut kernel, track)?;
        }
        Ok(())
    }
}

/// Size pass: sub-segment count of every track, in input order.
pub fn count_segments<G, M>(generator: &G, tracks: &[TrackSegments<'_, M>]) -> Result<Vec<usize>>
where
    G: TrackGenerator + ?Sized,
    M: Material + Sync + ?Sized,
{
    let prototype = CounterKernel::new(generator)?;
    log::debug!(
        "Counting pass over {} tracks, {} segments",
        tracks.len(),
        num_segments(tracks)
    );

    #[cfg(feature = "rayon")]
    {
        use rayon::prelude::*;

        tracks
            .par_iter()
            .map_init(|| prototype.clone(), |kernel, track| trace_track(kernel, track))
            .collect()
    }

    #[cfg(not(feature = "rayon"))]
    {
        let mut kernel = prototype;
        tracks
            .iter()
            .map(|track| trace_track(&mut kernel, track))
            .collect()
    }
}

/// Materialize one track into `segments`, which must hold at least as many records as a
/// [`CounterKernel`] counts for the track. Returns the number of records written.
pub fn segmentize_track<G, M>(
    generator: &G,
    track: &TrackSegments<'_, M>,
    segments: &mut [SegmentRecord],
) -> Result<usize>
where
    G: TrackGenerator + ?Sized,
    M: Material + ?Sized,
{
    let mut kernel = SegmentationKernel::new(generator, Some(segments))?;
    trace_track(&mut kernel, track)
}

/// Size and materialize a batch of tracks into one thread's rows; track `i` fills row `i`.
///
/// Returns the total number of records written.
///
/// # Errors
/// Returns `RowOutOfBounds` if the thread has fewer rows than tracks.
pub fn segmentize<G, M>(
    generator: &G,
    tracks: &[TrackSegments<'_, M>],
    rows: &mut ThreadSegments,
) -> Result<usize>
where
    G: TrackGenerator + ?Sized,
    M: Material + ?Sized,
{
    if rows.num_rows() == 0 && !tracks.is_empty() {
        log::warn!(
            "Segmentation requested for {} tracks but the thread has no segment rows",
            tracks.len()
        );
    }

    let mut counter = CounterKernel::new(generator)?;
    let mut total = 0;
    for (row, track) in tracks.iter().enumerate() {
        let count = trace_track(&mut counter, track)?;
        rows.resize_row(row, count)?;
        total += segmentize_track(generator, track, rows.row_mut(row).unwrap_or_default())?;
    }
    Ok(total)
}

/// Materialize batches of tracks, batch `t` into thread `t`'s rows of `storage`.
///
/// Returns the total number of records written.
///
/// # Errors
/// Returns `ThreadOutOfBounds` if there are more batches than threads with storage.
pub fn segmentize_all<G, M>(
    generator: &G,
    batches: &[Vec<TrackSegments<'_, M>>],
    storage: &mut TemporarySegments,
) -> Result<usize>
where
    G: TrackGenerator + Sync + ?Sized,
    M: Material + Sync + ?Sized,
{
    let num_threads = storage.num_threads();
    if batches.len() > num_threads {
        return Err(KernelError::Storage(StorageError::ThreadOutOfBounds {
            thread: batches.len() - 1,
            num_threads,
        }));
    }
    log::debug!(
        "Segmentation pass over {} batches, {} tracks",
        batches.len(),
        batches.iter().map(Vec::len).sum::<usize>()
    );

    let threads = &mut storage.threads_mut()[..batches.len()];

    #[cfg(feature = "rayon")]
    {
        use rayon::prelude::*;

        threads
            .par_iter_mut()
            .zip(batches.par_iter())
            .map(|(rows, batch)| segmentize(generator, batch, rows))
            .try_reduce(|| 0, |a, b| Ok(a + b))
    }

    #[cfg(not(feature = "rayon"))]
    {
        let mut total = 0;
        for (rows, batch) in threads.iter_mut().zip(batches) {
            total += segmentize(generator, batch, rows)?;
        }
        Ok(total)
    }
}
