//! Server Configuration
//!
//! Configuration is a JSON document plus environment overrides, mirroring
//! the storage config pattern: every field has a default so a bare
//! `commitlog-server` starts a plaintext single-node log under `./data`.
//!
//! ```json
//! {
//!   "bind_addr": "0.0.0.0:8400",
//!   "data_dir": "/var/lib/commitlog",
//!   "log": { "max_store_bytes": 67108864 },
//!   "policy_file": "/etc/commitlog/policy.json",
//!   "tls": {
//!     "cert_file": "/etc/commitlog/server.crt",
//!     "key_file": "/etc/commitlog/server.key",
//!     "ca_file": "/etc/commitlog/ca.crt"
//!   },
//!   "servers": [
//!     { "id": "node-1", "rpc_addr": "10.0.0.1:8400", "is_leader": true }
//!   ]
//! }
//! ```

use std::path::{Path, PathBuf};

use commitlog_storage::LogConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::discovery::ServerInfo;
use crate::tls::TlsConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config document: {0}")]
    Parse(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address the gRPC server listens on.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Directory holding the log's segment files.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Storage engine limits.
    #[serde(default)]
    pub log: LogConfig,

    /// Authorization policy document. Absent means allow-all (development).
    #[serde(default)]
    pub policy_file: Option<PathBuf>,

    /// Mutual-TLS material. Absent means plaintext (development).
    #[serde(default)]
    pub tls: Option<TlsConfig>,

    /// Static cluster member list served by `GetServers`. Empty means
    /// this server reports only itself, as leader.
    #[serde(default)]
    pub servers: Vec<ServerInfo>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            data_dir: default_data_dir(),
            log: LogConfig::default(),
            policy_file: None,
            tls: None,
            servers: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// Load from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        serde_json::from_str(&raw).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Build from the environment: `COMMITLOG_CONFIG` names a config file,
    /// and individual `COMMITLOG_*` variables override its fields.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = match std::env::var("COMMITLOG_CONFIG") {
            Ok(path) => Self::load(path)?,
            Err(_) => Self::default(),
        };

        if let Ok(addr) = std::env::var("COMMITLOG_ADDR") {
            config.bind_addr = addr;
        }
        if let Ok(dir) = std::env::var("COMMITLOG_DATA") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Ok(policy) = std::env::var("COMMITLOG_POLICY") {
            config.policy_file = Some(PathBuf::from(policy));
        }
        if let (Ok(cert), Ok(key)) = (
            std::env::var("COMMITLOG_TLS_CERT"),
            std::env::var("COMMITLOG_TLS_KEY"),
        ) {
            let mut tls = TlsConfig::new(cert, key);
            if let Ok(ca) = std::env::var("COMMITLOG_TLS_CA") {
                tls = tls.with_ca(ca);
            }
            config.tls = Some(tls);
        }

        Ok(config)
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0:8400".to_string()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data/log")
}
