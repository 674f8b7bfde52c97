//! Commitlog gRPC Server
//!
//! Wraps the storage engine in a remote service:
//! - record create/get, unary and bidirectional streaming
//! - policy-based authorization, evaluated before every log call
//! - mutual-TLS transport with certificate-derived client identity
//! - a server-list query for client-side cluster discovery

pub mod auth;
pub mod config;
pub mod discovery;
pub mod identity;
pub mod services;
pub mod tls;

pub use auth::Authorizer;
pub use config::ServerConfig;
pub use discovery::{ServerInfo, ServerProvider, StaticServerProvider};
pub use identity::Subject;
pub use services::LogService;
pub use tls::TlsConfig;
