//! Client Identity Resolution
//!
//! Authorization needs a subject name for the caller. Over mutual TLS that
//! is the common name of the verified client certificate; tests and
//! in-process callers can inject a [`Subject`] request extension instead,
//! which takes precedence.
//!
//! A connection that presented no certificate resolves to `"anonymous"`,
//! which the default-deny policy rejects unless explicitly granted.

use tonic::Request;
use x509_parser::prelude::*;

/// Subject injected directly into a request, bypassing certificate
/// inspection. Highest-precedence identity source.
#[derive(Debug, Clone)]
pub struct Subject(pub String);

/// Subject assigned when no identity can be established.
pub const ANONYMOUS: &str = "anonymous";

/// Resolve the caller's subject name for authorization.
pub fn subject<T>(request: &Request<T>) -> String {
    if let Some(Subject(subject)) = request.extensions().get::<Subject>() {
        return subject.clone();
    }

    if let Some(certs) = request.peer_certs() {
        if let Some(cert) = certs.first() {
            if let Some(cn) = common_name(cert.as_ref()) {
                return cn;
            }
        }
    }

    ANONYMOUS.to_string()
}

/// Common name of a DER-encoded certificate, if present and printable.
fn common_name(der: &[u8]) -> Option<String> {
    let (_, cert) = X509Certificate::from_der(der).ok()?;
    let cn = cert
        .subject()
        .iter_common_name()
        .next()
        .and_then(|cn| cn.as_str().ok())
        .map(|cn| cn.to_string());
    cn
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_takes_precedence() {
        let mut request = Request::new(());
        request.extensions_mut().insert(Subject("root".to_string()));
        assert_eq!(subject(&request), "root");
    }

    #[test]
    fn test_defaults_to_anonymous() {
        let request = Request::new(());
        assert_eq!(subject(&request), ANONYMOUS);
    }

    #[test]
    fn test_common_name_rejects_garbage() {
        assert_eq!(common_name(b"not a certificate"), None);
    }
}
