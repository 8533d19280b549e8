use mockpeer_pki::DistinguishedName;
use mockpeer_types::{HashAlgorithm, SignatureAlgorithm, SignatureAndHashAlgorithm};

use crate::handshake::{CertificateRequest, ClientCertificateType};
use crate::ProtocolVersion;

/// Builds the CertificateRequest sent to the client.
#[derive(Debug, Clone)]
pub struct CertificateRequestBuilder {
    hashes: Vec<HashAlgorithm>,
    signatures: Vec<SignatureAlgorithm>,
    certificate_type: ClientCertificateType,
}

impl CertificateRequestBuilder {
    /// `hashes` are expected strongest first; that order is kept on the wire.
    pub fn new(
        hashes: Vec<HashAlgorithm>,
        signatures: Vec<SignatureAlgorithm>,
        certificate_type: ClientCertificateType,
    ) -> Self {
        Self {
            hashes,
            signatures,
            certificate_type,
        }
    }

    /// Every (hash, signature) pair, outer loop over hashes.
    pub fn supported_algorithms(&self) -> Vec<SignatureAndHashAlgorithm> {
        self.hashes
            .iter()
            .flat_map(|&hash| {
                self.signatures
                    .iter()
                    .map(move |&signature| SignatureAndHashAlgorithm::new(hash, signature))
            })
            .collect()
    }

    /// Build a request for `version`.
    ///
    /// Below TLS 1.2 the algorithm list is `None`, never an empty list.
    pub fn build_request(
        &self,
        version: ProtocolVersion,
        trusted_issuers: Vec<DistinguishedName>,
    ) -> CertificateRequest {
        let supported_signature_algorithms = version
            .supports_signature_algorithms()
            .then(|| self.supported_algorithms());
        CertificateRequest {
            certificate_types: vec![self.certificate_type],
            supported_signature_algorithms,
            certificate_authorities: trusted_issuers,
        }
    }
}
