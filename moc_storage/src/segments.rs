//! Temporary segment storage.
//!
//! Materialized sub-segments are written into per-thread, per-row buffers. Each row is
//! sized exactly by a counting pass before the segmentation pass fills it, and belongs to
//! one thread, so no locking is involved.
//!
//! # Layout
//!
//! ```text
//! TemporarySegments
//!  ├─ thread 0: [row 0: SegmentRecord × n₀] [row 1: SegmentRecord × n₁] ...
//!  ├─ thread 1: [row 0] [row 1] ...
//!  └─ ...
//! ```

use moc_core::SegmentRecord;

use crate::error::{Result, StorageError};

/// The rows of segment records owned by one worker thread.
#[derive(Debug, Clone, Default)]
pub struct ThreadSegments {
    rows: Vec<Vec<SegmentRecord>>,
}

impl ThreadSegments {
    /// Create `num_rows` empty rows.
    pub fn new(num_rows: usize) -> Self {
        Self {
            rows: vec![Vec::new(); num_rows],
        }
    }

    /// Number of rows.
    #[inline]
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Records of a row, if the row exists.
    #[inline]
    pub fn row(&self, row: usize) -> Option<&[SegmentRecord]> {
        self.rows.get(row).map(Vec::as_slice)
    }

    /// Mutable records of a row, if the row exists.
    #[inline]
    pub fn row_mut(&mut self, row: usize) -> Option<&mut [SegmentRecord]> {
        self.rows.get_mut(row).map(Vec::as_mut_slice)
    }

    /// Resize a row to exactly `len` default records.
    ///
    /// # Errors
    /// Returns `RowOutOfBounds` if the row does not exist.
    pub fn resize_row(&mut self, row: usize, len: usize) -> Result<()> {
        let num_rows = self.rows.len();
        let records = self
            .rows
            .get_mut(row)
            .ok_or(StorageError::RowOutOfBounds { row, num_rows })?;
        records.clear();
        records.resize(len, SegmentRecord::default());
        records.shrink_to(len);
        Ok(())
    }

    /// Total number of records over all rows.
    pub fn total_records(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }
}

/// Per-thread, per-row temporary segment buffers.
#[derive(Debug, Clone, Default)]
pub struct TemporarySegments {
    threads: Vec<ThreadSegments>,
}

impl TemporarySegments {
    /// Allocate `rows_per_thread` empty rows for each of `num_threads` threads.
    pub fn new(num_threads: usize, rows_per_thread: usize) -> Self {
        Self {
            threads: (0..num_threads)
                .map(|_| ThreadSegments::new(rows_per_thread))
                .collect(),
        }
    }

    /// Number of threads with storage.
    #[inline]
    pub fn num_threads(&self) -> usize {
        self.threads.len()
    }

    /// Storage of one thread.
    ///
    /// # Errors
    /// Returns `ThreadOutOfBounds` if `thread` has no storage.
    pub fn thread_mut(&mut self, thread: usize) -> Result<&mut ThreadSegments> {
        let num_threads = self.threads.len();
        self.threads
            .get_mut(thread)
            .ok_or(StorageError::ThreadOutOfBounds {
                thread,
                num_threads,
            })
    }

    /// Storage of every thread, for handing one entry to each worker.
    #[inline]
    pub fn threads_mut(&mut self) -> &mut [ThreadSegments] {
        &mut self.threads
    }

    /// Records of one thread's row, or `None` if either index is out of range.
    pub fn row(&self, thread: usize, row: usize) -> Option<&[SegmentRecord]> {
        self.threads.get(thread)?.row(row)
    }

    /// Mutable records of one thread's row, or `None` if either index is out of range.
    pub fn row_mut(&mut self, thread: usize, row: usize) -> Option<&mut [SegmentRecord]> {
        self.threads.get_mut(thread)?.row_mut(row)
    }

    /// Resize one thread's row to exactly `len` records.
    pub fn resize_row(&mut self, thread: usize, row: usize, len: usize) -> Result<()> {
        self.thread_mut(thread)?.resize_row(row, len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout() {
        let storage = TemporarySegments::new(3, 2);
        assert_eq!(storage.num_threads(), 3);
        assert_eq!(storage.row(2, 1).map(|row| row.len()), Some(0));
        assert!(storage.row(3, 0).is_none());
        assert!(storage.row(0, 2).is_none());
    }

    #[test]
    fn test_resize_row_is_exact() {
        let mut storage = TemporarySegments::new(2, 2);
        storage.resize_row(1, 0, 5).unwrap();

        let row = storage.row_mut(1, 0).unwrap();
        assert_eq!(row.len(), 5);
        assert!(row.iter().all(|r| *r == SegmentRecord::default()));

        storage.resize_row(1, 0, 2).unwrap();
        assert_eq!(storage.row(1, 0).unwrap().len(), 2);
        assert_eq!(storage.threads_mut()[1].total_records(), 2);
    }

    #[test]
    fn test_resize_out_of_range() {
        let mut storage = TemporarySegments::new(1, 1);
        assert_eq!(
            storage.resize_row(1, 0, 3),
            Err(StorageError::ThreadOutOfBounds {
                thread: 1,
                num_threads: 1
            })
        );
        assert_eq!(
            storage.resize_row(0, 4, 3),
            Err(StorageError::RowOutOfBounds {
                row: 4,
                num_rows: 1
            })
        );
    }
}
