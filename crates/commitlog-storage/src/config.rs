//! Log Configuration
//!
//! Controls how segments are sized and where offsets start:
//!
//! - **max_store_bytes**: seal the active segment once its store reaches
//!   this size (default: 64MB)
//! - **max_index_bytes**: seal once the index reaches this size; also the
//!   capacity each index file is pre-sized (and memory-mapped) to
//!   (default: enough entries for 64MB of ~1KB records)
//! - **initial_offset**: offset of the very first record in a fresh log
//!   (default: 0)
//!
//! The two size limits bound a segment jointly: whichever is hit first
//! triggers rotation. Sizing the index for at least
//! `max_store_bytes / smallest_expected_record` entries keeps the
//! capacity-exceeded error unreachable.
//!
//! ## Usage
//!
//! ```ignore
//! use commitlog_storage::LogConfig;
//!
//! // Tiny segments for tests: every record forces a rotation
//! let config = LogConfig {
//!     max_store_bytes: 64,
//!     max_index_bytes: 12,
//!     ..Default::default()
//! };
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Maximum store file size in bytes before rotation (default: 64MB)
    #[serde(default = "default_max_store_bytes")]
    pub max_store_bytes: u64,

    /// Maximum index logical size in bytes before rotation, and the mapped
    /// capacity of each index file (default: 768KB = 65536 entries)
    #[serde(default = "default_max_index_bytes")]
    pub max_index_bytes: u64,

    /// Offset assigned to the first record of an empty log (default: 0)
    #[serde(default)]
    pub initial_offset: u64,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            max_store_bytes: default_max_store_bytes(),
            max_index_bytes: default_max_index_bytes(),
            initial_offset: 0,
        }
    }
}

fn default_max_store_bytes() -> u64 {
    64 * 1024 * 1024 // 64MB
}

fn default_max_index_bytes() -> u64 {
    crate::index::ENTRY_WIDTH * 65_536
}
