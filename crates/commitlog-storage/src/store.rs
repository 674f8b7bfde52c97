//! Store - Append-Only Framed Record File
//!
//! The store is the byte-level half of a segment: an append-only file of
//! length-framed payloads. It knows nothing about offsets - the index maps
//! offsets to the byte positions this file hands back on append.
//!
//! ## File Format
//!
//! ```text
//! [Frame 1][Frame 2]...[Frame N]
//!
//! Frame:
//! ┌─────────────┬───────────────┐
//! │ Length      │ Payload       │
//! │ (4 bytes LE)│ (Length bytes)│
//! └─────────────┴───────────────┘
//! ```
//!
//! ## Buffered Writes, Flush Before Read
//!
//! Appends go through a `BufWriter` for throughput; every read flushes the
//! buffer first so a caller always sees its own writes. A single lock
//! serializes write/flush/read, so no reader can observe a partially
//! written frame.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use bytes::Bytes;
use commitlog_core::{Error, Result};

/// Width of the frame length prefix.
pub(crate) const LEN_WIDTH: u64 = 4;

/// Append-only file of length-framed payloads.
#[derive(Debug)]
pub struct Store {
    path: PathBuf,
    inner: Mutex<Inner>,
}

#[derive(Debug)]
struct Inner {
    /// Buffered append handle; the file is opened in append mode so writes
    /// always land at end-of-file.
    writer: BufWriter<File>,
    /// Separate handle for positioned reads.
    reader: File,
    /// Logical file size including any buffered, not-yet-flushed bytes.
    size: u64,
}

impl Store {
    /// Open (or create) the store file at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let write_file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)?;
        let reader = OpenOptions::new().read(true).open(&path)?;

        let size = write_file.metadata()?.len();

        Ok(Self {
            path,
            inner: Mutex::new(Inner {
                writer: BufWriter::new(write_file),
                reader,
                size,
            }),
        })
    }

    /// Append one framed payload.
    ///
    /// Returns `(bytes_written, position)` where `position` is the byte
    /// offset the frame starts at - the value the index records.
    pub fn append(&self, payload: &[u8]) -> Result<(u64, u64)> {
        let mut inner = self.inner.lock().unwrap();

        let position = inner.size;
        let len = payload.len() as u32;

        inner.writer.write_all(&len.to_le_bytes())?;
        inner.writer.write_all(payload)?;

        let written = LEN_WIDTH + payload.len() as u64;
        inner.size += written;

        Ok((written, position))
    }

    /// Read the framed payload starting at `position`.
    ///
    /// Flushes buffered writes first so appends are immediately visible.
    pub fn read(&self, position: u64) -> Result<Bytes> {
        let mut inner = self.inner.lock().unwrap();
        inner.writer.flush()?;

        if position + LEN_WIDTH > inner.size {
            return Err(Error::Corrupt(format!(
                "frame position {position} past store size {}",
                inner.size
            )));
        }

        let mut len_buf = [0u8; LEN_WIDTH as usize];
        inner.reader.seek(SeekFrom::Start(position))?;
        inner.reader.read_exact(&mut len_buf)?;
        let len = u32::from_le_bytes(len_buf) as u64;

        if position + LEN_WIDTH + len > inner.size {
            return Err(Error::Corrupt(format!(
                "frame at {position} overruns store size {}",
                inner.size
            )));
        }

        let mut payload = vec![0u8; len as usize];
        inner.reader.read_exact(&mut payload)?;

        Ok(Bytes::from(payload))
    }

    /// Raw sequential read for snapshot streaming: fill `buf` starting at
    /// `position`, returning the byte count (0 at end of store).
    pub fn read_at(&self, buf: &mut [u8], position: u64) -> Result<usize> {
        let mut inner = self.inner.lock().unwrap();
        inner.writer.flush()?;

        if position >= inner.size {
            return Ok(0);
        }

        let remaining = (inner.size - position) as usize;
        let n = buf.len().min(remaining);

        inner.reader.seek(SeekFrom::Start(position))?;
        inner.reader.read_exact(&mut buf[..n])?;

        Ok(n)
    }

    /// End position of the frame starting at `position`, or `None` if the
    /// frame is incomplete (torn write). Used by segment recovery.
    pub(crate) fn frame_end(&self, position: u64) -> Result<Option<u64>> {
        let mut inner = self.inner.lock().unwrap();
        inner.writer.flush()?;

        if position + LEN_WIDTH > inner.size {
            return Ok(None);
        }

        let mut len_buf = [0u8; LEN_WIDTH as usize];
        inner.reader.seek(SeekFrom::Start(position))?;
        inner.reader.read_exact(&mut len_buf)?;
        let len = u32::from_le_bytes(len_buf) as u64;

        let end = position + LEN_WIDTH + len;
        Ok(if end <= inner.size { Some(end) } else { None })
    }

    /// Truncate the store to `size` bytes, discarding everything after.
    /// Used by segment recovery to drop torn or unindexed trailing bytes.
    pub(crate) fn truncate(&self, size: u64) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.writer.flush()?;
        inner.writer.get_ref().set_len(size)?;
        inner.size = size;
        Ok(())
    }

    /// Current logical size in bytes, including buffered writes.
    pub fn size(&self) -> u64 {
        self.inner.lock().unwrap().size
    }

    /// Flush buffered writes to the OS.
    pub fn flush(&self) -> Result<()> {
        self.inner.lock().unwrap().writer.flush()?;
        Ok(())
    }

    /// Flush and sync the file to disk.
    pub fn close(&self) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.writer.flush()?;
        inner.writer.get_ref().sync_all()?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
