//! Commitlog Server
//!
//! Entry point for the replicated commit-log service: a segmented on-disk
//! log exposed over gRPC, guarded by policy-based authorization and
//! mutual-TLS transport.
//!
//! ## Configuration
//!
//! A JSON config file plus environment overrides:
//!
//! - `COMMITLOG_CONFIG`: path to the JSON config document
//! - `COMMITLOG_ADDR`: bind address (default: 0.0.0.0:8400)
//! - `COMMITLOG_DATA`: log directory (default: ./data/log)
//! - `COMMITLOG_POLICY`: authorization policy document; absent = allow all
//! - `COMMITLOG_TLS_CERT` / `COMMITLOG_TLS_KEY` / `COMMITLOG_TLS_CA`:
//!   server certificate, key, and client CA; absent = plaintext
//!
//! ## Logging
//!
//! Controlled via `RUST_LOG`:
//!
//! ```bash
//! RUST_LOG=debug cargo run -p commitlog-server
//! ```

use std::sync::Arc;

use commitlog_proto::v1::log_server::LogServer;
use commitlog_server::{
    Authorizer, LogService, ServerConfig, ServerInfo, StaticServerProvider,
};
use commitlog_storage::Log;
use tonic::transport::Server;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env()?;
    let addr = config.bind_addr.parse()?;

    info!(dir = %config.data_dir.display(), "opening log");
    let log = Arc::new(Log::open(&config.data_dir, config.log.clone())?);

    let authorizer = match &config.policy_file {
        Some(path) => {
            info!(policy = %path.display(), "loading authorization policy");
            Arc::new(Authorizer::from_file(path)?)
        }
        None => {
            warn!("no policy document configured; all subjects permitted");
            Arc::new(Authorizer::allow_all())
        }
    };

    let members = if config.servers.is_empty() {
        vec![ServerInfo {
            id: "standalone".to_string(),
            rpc_addr: config.bind_addr.clone(),
            is_leader: true,
        }]
    } else {
        config.servers.clone()
    };
    let servers = StaticServerProvider::new(members);

    let service = LogService::new(log.clone(), authorizer, servers);

    let mut builder = Server::builder();
    if let Some(tls) = &config.tls {
        info!("mutual TLS enabled; client certificates required");
        builder = builder.tls_config(tls.server()?)?;
    } else {
        warn!("TLS not configured; serving plaintext");
    }

    info!(%addr, "commitlog server listening");
    builder
        .add_service(LogServer::new(service))
        .serve_with_shutdown(addr, async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutdown signal received");
        })
        .await?;

    log.close()?;
    info!("log closed; goodbye");

    Ok(())
}
