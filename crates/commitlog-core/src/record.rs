//! Record Data Structure and On-Disk Codec
//!
//! A record is a single entry in the log. Besides the payload it carries the
//! offset assigned by the engine and two opaque replication fields (`term`,
//! `kind`) that are persisted and returned verbatim - the engine never
//! interprets them.
//!
//! ## On-Disk Layout
//!
//! Records are stored inside store frames (a `u32` length prefix written by
//! the store itself, followed by the encoded record). The encoded record is:
//!
//! ```text
//! ┌──────────┬──────────┬──────────┬──────────┬───────────┐
//! │ CRC32    │ Offset   │ Term     │ Kind     │ Value     │
//! │ (4 bytes)│ (8 bytes)│ (8 bytes)│ (4 bytes)│ (N bytes) │
//! └──────────┴──────────┴──────────┴──────────┴───────────┘
//! ```
//!
//! All integers are little-endian. The CRC32 covers everything after the
//! checksum itself, so a torn or bit-flipped record is detected on decode.
//!
//! ## Design Decisions
//!
//! - `bytes::Bytes` for the value: cloning a record shares the payload
//!   instead of copying it.
//! - The value length is implied by the frame length, so no inner length
//!   field is needed.

use bytes::{BufMut, Bytes, BytesMut};

use crate::error::{Error, Result};

/// Fixed byte count preceding the value: crc32 + offset + term + kind.
pub const RECORD_HEADER_LEN: usize = 4 + 8 + 8 + 4;

/// A single record in the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Payload bytes.
    pub value: Bytes,

    /// Offset of this record in the log. Assigned by the engine on append.
    pub offset: u64,

    /// Opaque replication metadata, persisted verbatim.
    pub term: u64,

    /// Opaque record type tag, persisted verbatim.
    pub kind: u32,
}

impl Record {
    pub fn new(value: impl Into<Bytes>) -> Self {
        Self {
            value: value.into(),
            offset: 0,
            term: 0,
            kind: 0,
        }
    }

    /// Encoded size of this record, excluding the store's frame prefix.
    pub fn encoded_len(&self) -> usize {
        RECORD_HEADER_LEN + self.value.len()
    }

    /// Serialize to the framed byte form written into a store.
    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(self.encoded_len());

        let mut crc = crc32fast::Hasher::new();
        crc.update(&self.offset.to_le_bytes());
        crc.update(&self.term.to_le_bytes());
        crc.update(&self.kind.to_le_bytes());
        crc.update(&self.value);

        buf.put_u32_le(crc.finalize());
        buf.put_u64_le(self.offset);
        buf.put_u64_le(self.term);
        buf.put_u32_le(self.kind);
        buf.put_slice(&self.value);

        buf.freeze()
    }

    /// Deserialize a record previously produced by [`Record::encode`].
    ///
    /// Verifies the checksum and fails with [`Error::Corrupt`] on any
    /// mismatch or short buffer.
    pub fn decode(buf: &[u8]) -> Result<Self> {
        if buf.len() < RECORD_HEADER_LEN {
            return Err(Error::Corrupt(format!(
                "record too short: {} bytes",
                buf.len()
            )));
        }

        let stored_crc = u32::from_le_bytes(buf[0..4].try_into().unwrap());

        let mut crc = crc32fast::Hasher::new();
        crc.update(&buf[4..]);
        if crc.finalize() != stored_crc {
            return Err(Error::Corrupt("checksum mismatch".to_string()));
        }

        let offset = u64::from_le_bytes(buf[4..12].try_into().unwrap());
        let term = u64::from_le_bytes(buf[12..20].try_into().unwrap());
        let kind = u32::from_le_bytes(buf[20..24].try_into().unwrap());
        let value = Bytes::copy_from_slice(&buf[RECORD_HEADER_LEN..]);

        Ok(Self {
            value,
            offset,
            term,
            kind,
        })
    }
}
