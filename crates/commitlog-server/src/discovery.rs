//! Server Discovery
//!
//! The `GetServers` RPC lets clients discover the cluster: every server's
//! RPC address and which one currently leads. The membership/consensus
//! component that would feed this in a full deployment sits behind the
//! [`ServerProvider`] trait; this crate ships a static implementation
//! seeded from configuration, which is also what single-node and test
//! deployments use.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

/// One member of the cluster, as reported to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerInfo {
    /// Stable server identifier.
    pub id: String,
    /// Address clients dial for the log RPC service.
    pub rpc_addr: String,
    /// Whether this server currently leads the cluster.
    #[serde(default)]
    pub is_leader: bool,
}

/// Source of the cluster's server list.
#[async_trait]
pub trait ServerProvider: Send + Sync {
    async fn get_servers(
        &self,
    ) -> Result<Vec<ServerInfo>, Box<dyn std::error::Error + Send + Sync>>;
}

/// Static server list seeded from configuration.
#[derive(Debug, Default)]
pub struct StaticServerProvider {
    servers: RwLock<Vec<ServerInfo>>,
}

impl StaticServerProvider {
    pub fn new(servers: Vec<ServerInfo>) -> Arc<Self> {
        Arc::new(Self {
            servers: RwLock::new(servers),
        })
    }

    /// Replace the server list, e.g. after a config reload.
    pub async fn set_servers(&self, servers: Vec<ServerInfo>) {
        *self.servers.write().await = servers;
    }
}

#[async_trait]
impl ServerProvider for StaticServerProvider {
    async fn get_servers(
        &self,
    ) -> Result<Vec<ServerInfo>, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self.servers.read().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_provider_returns_seeded_servers() {
        let provider = StaticServerProvider::new(vec![
            ServerInfo {
                id: "node-1".to_string(),
                rpc_addr: "10.0.0.1:8400".to_string(),
                is_leader: true,
            },
            ServerInfo {
                id: "node-2".to_string(),
                rpc_addr: "10.0.0.2:8400".to_string(),
                is_leader: false,
            },
        ]);

        let servers = provider.get_servers().await.unwrap();
        assert_eq!(servers.len(), 2);
        assert!(servers[0].is_leader);
        assert_eq!(servers[1].id, "node-2");
    }

    #[tokio::test]
    async fn test_set_servers_replaces_list() {
        let provider = StaticServerProvider::new(vec![]);
        provider
            .set_servers(vec![ServerInfo {
                id: "solo".to_string(),
                rpc_addr: "127.0.0.1:8400".to_string(),
                is_leader: true,
            }])
            .await;

        assert_eq!(provider.get_servers().await.unwrap().len(), 1);
    }
}
