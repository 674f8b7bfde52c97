//! Commitlog Protocol Buffer Definitions
//!
//! gRPC service and message types for the commitlog API.
//!
//! ## Service
//!
//! - **Log**: record create/get (unary and bidirectional streaming) plus
//!   `GetServers` for client-side cluster discovery.
//!
//! ## Usage
//!
//! ### Client side
//!
//! ```ignore
//! use commitlog_proto::v1::{log_client::LogClient, CreateRecordRequest, Record};
//!
//! let mut client = LogClient::connect("http://localhost:8400").await?;
//! let response = client
//!     .create(CreateRecordRequest {
//!         record: Some(Record {
//!             value: b"hello world".to_vec(),
//!             ..Default::default()
//!         }),
//!     })
//!     .await?;
//! println!("offset: {}", response.into_inner().offset);
//! ```
//!
//! ### Server side
//!
//! ```ignore
//! use commitlog_proto::v1::log_server::{Log, LogServer};
//! ```

/// Commitlog gRPC API, version 1.
pub mod v1 {
    // The generated code is checked in (see `generated.rs`) instead of
    // produced by `tonic::include_proto!` at build time, so the crate
    // builds in environments without the `protoc` compiler.
    include!("generated.rs");
}
