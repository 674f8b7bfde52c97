//! Segment - One Store + One Index Under a Base Offset
//!
//! A segment ties a store and an index together over a contiguous offset
//! range starting at its base offset. Invariant:
//! `next_offset == base_offset + index.entries()`.
//!
//! Segments are append-only at the tail; once superseded by rotation a
//! segment is sealed and never mutated again, which is what lets the log
//! hand out `Arc<Segment>` references to readers without further
//! synchronization.
//!
//! ## Files
//!
//! `<base_offset>.store` and `<base_offset>.index` in the log directory.
//!
//! ## Crash Recovery
//!
//! The index is written after the store, so the index is the commit point
//! for a record. On open, the segment repairs a torn tail:
//!
//! 1. a trailing partial index entry is dropped (index rounds down),
//! 2. a trailing index entry whose store frame is incomplete is dropped,
//! 3. store bytes past the last fully indexed frame are truncated away.
//!
//! A record either survives whole or never happened.

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use commitlog_core::{Error, Record, Result};
use tracing::warn;

use crate::config::LogConfig;
use crate::index::Index;
use crate::store::Store;

#[derive(Debug)]
pub struct Segment {
    base_offset: u64,
    /// Offset the next append receives. Monotonic; only the log's append
    /// lock advances it.
    next_offset: AtomicU64,
    store: Store,
    index: Mutex<Index>,
    config: LogConfig,
}

impl Segment {
    /// Open (or create) the segment with the given base offset inside
    /// `dir`, repairing any torn tail left by a crash.
    pub fn open(dir: impl AsRef<Path>, base_offset: u64, config: &LogConfig) -> Result<Self> {
        let dir = dir.as_ref();
        let store = Store::open(dir.join(format!("{base_offset}.store")))?;
        let mut index = Index::open(
            dir.join(format!("{base_offset}.index")),
            config.max_index_bytes,
        )?;

        // Walk back from the newest entry until index and store agree.
        loop {
            if index.entries() == 0 {
                if store.size() > 0 {
                    warn!(
                        base_offset,
                        discarded = store.size(),
                        "discarding unindexed store bytes"
                    );
                    store.truncate(0)?;
                }
                break;
            }

            let (_, position) = index.read_last()?;
            match store.frame_end(position)? {
                Some(end) => {
                    if end < store.size() {
                        warn!(
                            base_offset,
                            discarded = store.size() - end,
                            "discarding torn store tail"
                        );
                        store.truncate(end)?;
                    }
                    break;
                }
                None => {
                    warn!(base_offset, "dropping index entry for incomplete frame");
                    index.truncate_last();
                }
            }
        }

        let next_offset = base_offset + index.entries();

        Ok(Self {
            base_offset,
            next_offset: AtomicU64::new(next_offset),
            store,
            index: Mutex::new(index),
            config: config.clone(),
        })
    }

    /// Append a record, assigning it the segment's next offset.
    ///
    /// Serializes the record, writes the frame to the store, records the
    /// (relative offset, position) pair in the index, and returns the
    /// absolute offset. Callers serialize appends via the log's lock.
    pub fn append(&self, record: &Record) -> Result<u64> {
        let offset = self.next_offset.load(Ordering::Acquire);

        let stamped = Record {
            value: record.value.clone(),
            offset,
            term: record.term,
            kind: record.kind,
        };

        let (_, position) = self.store.append(&stamped.encode())?;

        let relative = (offset - self.base_offset) as u32;
        self.index.lock().unwrap().write(relative, position)?;

        self.next_offset.store(offset + 1, Ordering::Release);
        Ok(offset)
    }

    /// Read the record at an absolute offset.
    pub fn read(&self, offset: u64) -> Result<Record> {
        if offset < self.base_offset || offset >= self.next_offset() {
            return Err(Error::OffsetOutOfRange { offset });
        }

        let relative = offset - self.base_offset;
        let (_, position) = self
            .index
            .lock()
            .unwrap()
            .read(relative)
            .map_err(|err| match err {
                Error::IndexOutOfBounds { .. } => Error::OffsetOutOfRange { offset },
                other => other,
            })?;

        let payload = self.store.read(position)?;
        Record::decode(&payload)
    }

    /// Raw store bytes for snapshot streaming; see [`Store::read_at`].
    pub(crate) fn read_raw(&self, buf: &mut [u8], position: u64) -> Result<usize> {
        self.store.read_at(buf, position)
    }

    /// Whether either file has reached its configured size limit. The log
    /// checks this after every append to decide on rotation.
    pub fn is_maxed(&self) -> bool {
        self.store.size() >= self.config.max_store_bytes
            || self.index.lock().unwrap().size() >= self.config.max_index_bytes
    }

    pub fn base_offset(&self) -> u64 {
        self.base_offset
    }

    /// Offset the next appended record would receive.
    pub fn next_offset(&self) -> u64 {
        self.next_offset.load(Ordering::Acquire)
    }

    /// Flush and close both files. The index file shrinks to its logical
    /// size here, which is what makes reopen recovery exact.
    pub fn close(&self) -> Result<()> {
        self.index.lock().unwrap().close()?;
        self.store.close()?;
        Ok(())
    }

    /// Close and delete both files.
    pub fn remove(&self) -> Result<()> {
        self.close()?;
        std::fs::remove_file(self.index.lock().unwrap().path())?;
        std::fs::remove_file(self.store.path())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use tempfile::TempDir;

    fn test_config() -> LogConfig {
        LogConfig {
            max_store_bytes: 1024,
            max_index_bytes: crate::index::ENTRY_WIDTH * 16,
            initial_offset: 0,
        }
    }

    #[test]
    fn test_append_read() {
        let dir = TempDir::new().unwrap();
        let segment = Segment::open(dir.path(), 16, &test_config()).unwrap();
        assert_eq!(segment.next_offset(), 16);

        let record = Record {
            value: Bytes::from("hello world"),
            offset: 0,
            term: 2,
            kind: 1,
        };

        let offset = segment.append(&record).unwrap();
        assert_eq!(offset, 16);
        assert_eq!(segment.next_offset(), 17);

        let got = segment.read(16).unwrap();
        assert_eq!(got.value, record.value);
        assert_eq!(got.offset, 16);
        assert_eq!(got.term, 2);
        assert_eq!(got.kind, 1);
    }

    #[test]
    fn test_read_outside_range() {
        let dir = TempDir::new().unwrap();
        let segment = Segment::open(dir.path(), 10, &test_config()).unwrap();
        segment.append(&Record::new("x")).unwrap();

        assert!(matches!(
            segment.read(9).unwrap_err(),
            Error::OffsetOutOfRange { offset: 9 }
        ));
        assert!(matches!(
            segment.read(11).unwrap_err(),
            Error::OffsetOutOfRange { offset: 11 }
        ));
    }

    #[test]
    fn test_is_maxed_by_index() {
        let dir = TempDir::new().unwrap();
        let config = LogConfig {
            max_store_bytes: 1024 * 1024,
            max_index_bytes: crate::index::ENTRY_WIDTH * 2,
            initial_offset: 0,
        };
        let segment = Segment::open(dir.path(), 0, &config).unwrap();

        assert!(!segment.is_maxed());
        segment.append(&Record::new("a")).unwrap();
        segment.append(&Record::new("b")).unwrap();
        assert!(segment.is_maxed());
    }

    #[test]
    fn test_is_maxed_by_store() {
        let dir = TempDir::new().unwrap();
        let config = LogConfig {
            max_store_bytes: 32,
            max_index_bytes: crate::index::ENTRY_WIDTH * 16,
            initial_offset: 0,
        };
        let segment = Segment::open(dir.path(), 0, &config).unwrap();

        segment.append(&Record::new("a big enough value")).unwrap();
        assert!(segment.is_maxed());
    }

    #[test]
    fn test_reopen_recovers_next_offset() {
        let dir = TempDir::new().unwrap();
        let config = test_config();

        let segment = Segment::open(dir.path(), 0, &config).unwrap();
        for value in ["one", "two", "three"] {
            segment.append(&Record::new(value)).unwrap();
        }
        segment.close().unwrap();
        drop(segment);

        let reopened = Segment::open(dir.path(), 0, &config).unwrap();
        assert_eq!(reopened.next_offset(), 3);
        assert_eq!(reopened.read(1).unwrap().value.as_ref(), b"two");
    }

    #[test]
    fn test_reopen_discards_torn_store_tail() {
        let dir = TempDir::new().unwrap();
        let config = test_config();

        let segment = Segment::open(dir.path(), 0, &config).unwrap();
        segment.append(&Record::new("kept")).unwrap();
        segment.close().unwrap();
        drop(segment);

        // Simulate a crash mid-append: frame bytes hit the store but the
        // index entry never made it.
        let store_path = dir.path().join("0.store");
        let mut file = std::fs::OpenOptions::new()
            .append(true)
            .open(&store_path)
            .unwrap();
        use std::io::Write;
        file.write_all(&[9, 0, 0, 0, b'p', b'a', b'r']).unwrap();
        drop(file);

        let reopened = Segment::open(dir.path(), 0, &config).unwrap();
        assert_eq!(reopened.next_offset(), 1);
        assert_eq!(reopened.read(0).unwrap().value.as_ref(), b"kept");

        // The torn bytes are gone; appending continues cleanly.
        let offset = reopened.append(&Record::new("next")).unwrap();
        assert_eq!(offset, 1);
        assert_eq!(reopened.read(1).unwrap().value.as_ref(), b"next");
    }

    #[test]
    fn test_remove_deletes_files() {
        let dir = TempDir::new().unwrap();
        let segment = Segment::open(dir.path(), 0, &test_config()).unwrap();
        segment.append(&Record::new("x")).unwrap();
        segment.remove().unwrap();

        assert!(!dir.path().join("0.store").exists());
        assert!(!dir.path().join("0.index").exists());
    }
}
