//! Error Types for the Commitlog Engine
//!
//! ## Error Categories
//!
//! ### Range Errors
//! - `OffsetOutOfRange`: the requested offset is below the lowest or at/above
//!   the highest offset held by the log. Carries the offending offset so the
//!   service layer can translate it into a protocol status.
//! - `IndexOutOfBounds`: an index entry number past the written entry count.
//!   Surfaced by the index, mapped to `OffsetOutOfRange` by the segment.
//!
//! ### Capacity Errors
//! - `IndexFull`: an index write would exceed the mapped capacity. Rotation
//!   sizing should make this unreachable; hitting it means the configured
//!   `max_index_bytes` does not match `max_store_bytes`.
//!
//! ### Integrity Errors
//! - `Corrupt`: a frame or record that cannot be decoded (bad length,
//!   checksum mismatch).
//!
//! ### I/O Errors
//! - `Io`: any filesystem error, propagated unchanged. The engine never
//!   retries or suppresses these.
//!
//! ## Usage
//!
//! All engine operations return `Result<T>`, aliased to `Result<T, Error>`,
//! so callers propagate with `?`.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("offset out of range: {offset}")]
    OffsetOutOfRange { offset: u64 },

    #[error("index entry out of bounds: {entry}")]
    IndexOutOfBounds { entry: u64 },

    #[error("index full: capacity {capacity} bytes")]
    IndexFull { capacity: u64 },

    #[error("corrupt record data: {0}")]
    Corrupt(String),

    #[error("resource already closed")]
    Closed,
}

impl From<Error> for std::io::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::Io(io) => io,
            other => std::io::Error::new(std::io::ErrorKind::Other, other),
        }
    }
}
