//! TLS Configuration
//!
//! Builds the server- and client-role transport configurations from
//! certificate, key, and CA file paths. The server role verifies client
//! certificates against the CA (mutual TLS): a connection that presents no
//! valid client certificate fails the handshake and never reaches an
//! application handler.
//!
//! ## Usage
//!
//! ```ignore
//! // Server: identity + required client certs
//! let tls = TlsConfig::new("server.crt", "server.key").with_ca("ca.crt");
//! let server_tls = tls.server()?;
//!
//! // Client: identity + server verification
//! let tls = TlsConfig::new("client.crt", "client.key").with_ca("ca.crt");
//! let client_tls = tls.client("localhost")?;
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tonic::transport::{Certificate, ClientTlsConfig, Identity, ServerTlsConfig};

#[derive(Debug, Error)]
pub enum TlsError {
    #[error("failed to read certificate or key file: {0}")]
    CertificateRead(#[from] std::io::Error),

    #[error("CA certificate required for {0}")]
    MissingCa(&'static str),
}

/// Certificate/key/CA paths for one peer role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TlsConfig {
    /// PEM certificate chain presented to the peer.
    pub cert_file: PathBuf,
    /// PEM private key for the certificate.
    pub key_file: PathBuf,
    /// PEM CA certificate used to verify the peer.
    #[serde(default)]
    pub ca_file: Option<PathBuf>,
}

impl TlsConfig {
    pub fn new(cert_file: impl Into<PathBuf>, key_file: impl Into<PathBuf>) -> Self {
        Self {
            cert_file: cert_file.into(),
            key_file: key_file.into(),
            ca_file: None,
        }
    }

    pub fn with_ca(mut self, ca_file: impl Into<PathBuf>) -> Self {
        self.ca_file = Some(ca_file.into());
        self
    }

    /// Server-role configuration: presents the identity and requires
    /// client certificates signed by the CA.
    pub fn server(&self) -> Result<ServerTlsConfig, TlsError> {
        let ca = self
            .ca_file
            .as_deref()
            .ok_or(TlsError::MissingCa("client verification"))?;

        Ok(ServerTlsConfig::new()
            .identity(self.identity()?)
            .client_ca_root(read_certificate(ca)?))
    }

    /// Client-role configuration: presents the identity and verifies the
    /// server certificate (for `domain`) against the CA.
    pub fn client(&self, domain: &str) -> Result<ClientTlsConfig, TlsError> {
        let ca = self
            .ca_file
            .as_deref()
            .ok_or(TlsError::MissingCa("server verification"))?;

        Ok(ClientTlsConfig::new()
            .identity(self.identity()?)
            .ca_certificate(read_certificate(ca)?)
            .domain_name(domain))
    }

    fn identity(&self) -> Result<Identity, TlsError> {
        let cert = std::fs::read(&self.cert_file)?;
        let key = std::fs::read(&self.key_file)?;
        Ok(Identity::from_pem(cert, key))
    }
}

fn read_certificate(path: &Path) -> Result<Certificate, TlsError> {
    Ok(Certificate::from_pem(std::fs::read(path)?))
}
