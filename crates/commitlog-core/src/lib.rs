//! Core types shared across the commitlog crates.
//!
//! This crate holds the leaf types everything else depends on:
//!
//! - [`Record`]: the fundamental unit of data in the log, plus its binary
//!   on-disk codec
//! - [`Error`]/[`Result`]: the error taxonomy for the storage engine
//!
//! It deliberately has no I/O, no async, and no transport dependencies so
//! that both the synchronous storage engine and the gRPC service layer can
//! depend on it without dragging each other's stacks along.

pub mod error;
pub mod record;

pub use error::{Error, Result};
pub use record::Record;
