//! Commitlog Storage Engine
//!
//! This crate implements the segmented commit-log storage engine - the
//! component responsible for durably appending variable-length records,
//! serving O(1) random reads by offset, and streaming the whole log for
//! replication transfer.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────────────────────────────────────────┐
//! │ Log                                              │
//! │  - routes appends to the active segment          │
//! │  - routes reads by offset range                  │
//! │  - rotation / recovery / truncation              │
//! │                                                  │
//! │  ┌────────────┐ ┌────────────┐ ┌────────────┐    │
//! │  │ Segment 0  │ │ Segment 1  │ │ Segment 2  │◄── active
//! │  │ ┌────────┐ │ │ ┌────────┐ │ │ ┌────────┐ │    │
//! │  │ │ Store  │ │ │ │ Store  │ │ │ │ Store  │ │    │
//! │  │ ├────────┤ │ │ ├────────┤ │ │ ├────────┤ │    │
//! │  │ │ Index  │ │ │ │ Index  │ │ │ │ Index  │ │    │
//! │  │ └────────┘ │ │ └────────┘ │ │ └────────┘ │    │
//! │  └────────────┘ └────────────┘ └────────────┘    │
//! └──────────────────────────────────────────────────┘
//! ```
//!
//! ## Main Components
//!
//! - [`Store`]: append-only file of length-framed record payloads with
//!   buffered writes and position-addressed reads.
//! - [`Index`]: dense, fixed-width, memory-mapped mapping from
//!   segment-relative offset to store byte position.
//! - [`Segment`]: one store plus one index sharing a base offset; decides
//!   when it is full.
//! - [`Log`]: the ordered segment collection - append with rotation, read
//!   routing, startup recovery, retention truncation.
//! - [`LogReader`]: lazy `std::io::Read` over every segment's raw store
//!   bytes in offset order, for snapshot transfer.
//!
//! ## Persisted Layout
//!
//! A log directory contains one `<base_offset>.store` and one
//! `<base_offset>.index` file per segment. There is no manifest - the file
//! set itself is the source of truth, and recovery reconstructs the segment
//! list by scanning the directory.
//!
//! ## Concurrency Model
//!
//! The engine is synchronous and blocking; callers are parallel worker
//! threads. One `RwLock` per log guards the segment list, held only across
//! segment selection, the append itself, and the rotation check. Sealed
//! segments are immutable, so readers clone an `Arc` to the target segment
//! and drop the log lock before touching disk. Each store serializes
//! write/flush/read behind a single internal lock so no reader can observe
//! a partially written frame.
//!
//! ## Usage
//!
//! ```ignore
//! use commitlog_storage::{Log, LogConfig};
//! use commitlog_core::Record;
//!
//! let log = Log::open("./data/log", LogConfig::default())?;
//!
//! let offset = log.append(&Record::new("hello world"))?;
//! let record = log.read(offset)?;
//! assert_eq!(record.value.as_ref(), b"hello world");
//! ```

pub mod config;
pub mod index;
pub mod log;
pub mod reader;
pub mod segment;
pub mod store;

pub use commitlog_core::{Error, Record, Result};
pub use config::LogConfig;
pub use index::Index;
pub use log::Log;
pub use reader::LogReader;
pub use segment::Segment;
pub use store::Store;
