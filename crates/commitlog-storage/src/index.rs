//! Index - Memory-Mapped Offset Index
//!
//! The index is the lookup half of a segment: a dense, append-only sequence
//! of fixed-width entries mapping a segment-relative offset to the byte
//! position of its frame in the store. Because entries are fixed-width and
//! gap-free, looking up entry `n` is a single multiplication - O(1) random
//! reads by offset.
//!
//! ## Entry Format
//!
//! ```text
//! ┌──────────────────┬──────────────────┐
//! │ Relative Offset  │ Store Position   │
//! │ (4 bytes LE)     │ (8 bytes LE)     │
//! └──────────────────┴──────────────────┘
//! ```
//!
//! ## Memory Mapping
//!
//! The backing file is pre-sized to the configured capacity and memory
//! mapped once at open; writes are plain stores into the mapping. On close
//! the mapping is flushed and the file is truncated back to the logical
//! size actually used, so a reopened index knows exactly how many entries
//! it holds (file length / entry width).
//!
//! The mapping is owned by this index alone - open, flush, truncate, close
//! is a scoped lifecycle, never a process-wide singleton.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use commitlog_core::{Error, Result};
use memmap2::MmapMut;

/// Width of one index entry: u32 relative offset + u64 position.
pub const ENTRY_WIDTH: u64 = 4 + 8;

/// Memory-mapped mapping from segment-relative offset to store position.
#[derive(Debug)]
pub struct Index {
    path: PathBuf,
    file: File,
    /// `None` once closed; every operation after close fails.
    map: Option<MmapMut>,
    /// Logical size in bytes (entries written * ENTRY_WIDTH).
    size: u64,
    /// Mapped capacity in bytes.
    capacity: u64,
}

impl Index {
    /// Open (or create) the index file at `path`, pre-sizing it to
    /// `max_index_bytes` and memory-mapping the whole region.
    ///
    /// An existing file's length is taken as the logical size; a trailing
    /// partial entry (torn write) is silently dropped by rounding down to
    /// the entry width.
    pub fn open(path: impl AsRef<Path>, max_index_bytes: u64) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .open(&path)?;

        let existing = file.metadata()?.len();
        let size = existing - existing % ENTRY_WIDTH;

        // Never shrink below already-written entries, even if the
        // configured capacity went down between runs.
        let capacity = max_index_bytes.max(size).max(ENTRY_WIDTH);
        file.set_len(capacity)?;

        // Safety: the mapping is private to this Index and the file stays
        // open (and at mapped length) for the mapping's whole lifetime.
        let map = unsafe { MmapMut::map_mut(&file)? };

        Ok(Self {
            path,
            file,
            map: Some(map),
            size,
            capacity,
        })
    }

    /// Append one entry. Entries must arrive in strictly increasing
    /// relative-offset order - the segment guarantees this.
    ///
    /// Fails with [`Error::IndexFull`] when the mapped region is exhausted;
    /// rotation sizing should make that unreachable.
    pub fn write(&mut self, relative_offset: u32, position: u64) -> Result<()> {
        let map = self.map.as_mut().ok_or(Error::Closed)?;

        if self.size + ENTRY_WIDTH > self.capacity {
            return Err(Error::IndexFull {
                capacity: self.capacity,
            });
        }

        let at = self.size as usize;
        map[at..at + 4].copy_from_slice(&relative_offset.to_le_bytes());
        map[at + 4..at + 12].copy_from_slice(&position.to_le_bytes());

        self.size += ENTRY_WIDTH;
        Ok(())
    }

    /// Read entry `n` (0-based). Fails with [`Error::IndexOutOfBounds`]
    /// when `n` is at or past the written entry count.
    pub fn read(&self, n: u64) -> Result<(u32, u64)> {
        let map = self.map.as_ref().ok_or(Error::Closed)?;

        if n >= self.entries() {
            return Err(Error::IndexOutOfBounds { entry: n });
        }

        let at = (n * ENTRY_WIDTH) as usize;
        let relative_offset = u32::from_le_bytes(map[at..at + 4].try_into().unwrap());
        let position = u64::from_le_bytes(map[at + 4..at + 12].try_into().unwrap());

        Ok((relative_offset, position))
    }

    /// Read the most recently written entry.
    pub fn read_last(&self) -> Result<(u32, u64)> {
        let entries = self.entries();
        if entries == 0 {
            return Err(Error::IndexOutOfBounds { entry: 0 });
        }
        self.read(entries - 1)
    }

    /// Drop the most recently written entry. Used by segment recovery when
    /// the entry points at an incomplete store frame.
    pub(crate) fn truncate_last(&mut self) {
        self.size = self.size.saturating_sub(ENTRY_WIDTH);
    }

    /// Number of entries written.
    pub fn entries(&self) -> u64 {
        self.size / ENTRY_WIDTH
    }

    /// Logical size in bytes.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Flush the mapping and truncate the backing file to the logical size.
    ///
    /// After close the index rejects all reads and writes; reopening the
    /// file recovers the same entries.
    pub fn close(&mut self) -> Result<()> {
        if let Some(map) = self.map.take() {
            map.flush()?;
            // Mapping dropped before the file shrinks below its length.
            drop(map);
            self.file.set_len(self.size)?;
            self.file.sync_all()?;
        }
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const TEST_CAPACITY: u64 = ENTRY_WIDTH * 16;

    #[test]
    fn test_write_read() {
        let dir = TempDir::new().unwrap();
        let mut index = Index::open(dir.path().join("0.index"), TEST_CAPACITY).unwrap();

        index.write(0, 0).unwrap();
        index.write(1, 37).unwrap();
        index.write(2, 96).unwrap();

        assert_eq!(index.read(0).unwrap(), (0, 0));
        assert_eq!(index.read(1).unwrap(), (1, 37));
        assert_eq!(index.read(2).unwrap(), (2, 96));
        assert_eq!(index.read_last().unwrap(), (2, 96));
        assert_eq!(index.entries(), 3);
    }

    #[test]
    fn test_read_out_of_bounds() {
        let dir = TempDir::new().unwrap();
        let mut index = Index::open(dir.path().join("0.index"), TEST_CAPACITY).unwrap();
        index.write(0, 0).unwrap();

        let err = index.read(1).unwrap_err();
        assert!(matches!(err, Error::IndexOutOfBounds { entry: 1 }));
    }

    #[test]
    fn test_read_last_on_empty() {
        let dir = TempDir::new().unwrap();
        let index = Index::open(dir.path().join("0.index"), TEST_CAPACITY).unwrap();
        assert!(matches!(
            index.read_last().unwrap_err(),
            Error::IndexOutOfBounds { .. }
        ));
    }

    #[test]
    fn test_capacity_exceeded() {
        let dir = TempDir::new().unwrap();
        let mut index = Index::open(dir.path().join("0.index"), ENTRY_WIDTH * 2).unwrap();

        index.write(0, 0).unwrap();
        index.write(1, 10).unwrap();

        let err = index.write(2, 20).unwrap_err();
        assert!(matches!(err, Error::IndexFull { .. }));
    }

    #[test]
    fn test_close_truncates_and_reopen_recovers() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("0.index");

        let mut index = Index::open(&path, TEST_CAPACITY).unwrap();
        index.write(0, 0).unwrap();
        index.write(1, 42).unwrap();
        index.close().unwrap();
        drop(index);

        // File shrank to the logical size on close.
        assert_eq!(std::fs::metadata(&path).unwrap().len(), 2 * ENTRY_WIDTH);

        let reopened = Index::open(&path, TEST_CAPACITY).unwrap();
        assert_eq!(reopened.entries(), 2);
        assert_eq!(reopened.read(1).unwrap(), (1, 42));
    }

    #[test]
    fn test_reopen_drops_partial_trailing_entry() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("0.index");

        let mut index = Index::open(&path, TEST_CAPACITY).unwrap();
        index.write(0, 0).unwrap();
        index.close().unwrap();
        drop(index);

        // Simulate a crash mid-entry: a few stray bytes after the last
        // complete entry.
        let file = OpenOptions::new().write(true).open(&path).unwrap();
        file.set_len(ENTRY_WIDTH + 5).unwrap();
        drop(file);

        let reopened = Index::open(&path, TEST_CAPACITY).unwrap();
        assert_eq!(reopened.entries(), 1);
    }

    #[test]
    fn test_write_after_close_fails() {
        let dir = TempDir::new().unwrap();
        let mut index = Index::open(dir.path().join("0.index"), TEST_CAPACITY).unwrap();
        index.close().unwrap();

        assert!(matches!(index.write(0, 0).unwrap_err(), Error::Closed));
    }
}
