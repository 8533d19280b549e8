use std::sync::Arc;

use mockpeer_pki::CertificateChain;
use mockpeer_types::HashAlgorithm;

use crate::diag::{self, DiagnosticSink, Severity};

/// Logs the shape of a client certificate chain. Never validates it.
pub struct ClientCertificateInspector {
    fingerprint_hash: HashAlgorithm,
    sink: Arc<dyn DiagnosticSink>,
}

impl ClientCertificateInspector {
    pub fn new(fingerprint_hash: HashAlgorithm, sink: Arc<dyn DiagnosticSink>) -> Self {
        Self {
            fingerprint_hash,
            sink,
        }
    }

    /// One count record, then one fingerprint record per entry, leaf first.
    pub fn on_client_certificate_received(&self, chain: &CertificateChain) {
        let sink = self.sink.as_ref();
        diag::emit(
            sink,
            Severity::Normal,
            &format!(
                "TLS server received client certificate chain of length {}",
                chain.len()
            ),
        );
        for entry in chain {
            let digest = match entry.fingerprint(self.fingerprint_hash) {
                Ok(fp) => fp.to_string(),
                Err(e) => {
                    tracing::warn!(error = %e, "client certificate fingerprint unavailable");
                    "unavailable".to_string()
                }
            };
            diag::emit(
                sink,
                Severity::Normal,
                &format!(
                    "    fingerprint:{} {} ({})",
                    self.fingerprint_hash, digest, entry.subject
                ),
            );
        }
    }
}
