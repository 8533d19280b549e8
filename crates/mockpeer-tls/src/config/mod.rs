//! Test peer configuration with builder pattern.

use std::fmt;

use mockpeer_types::{HashAlgorithm, SignatureAlgorithm, TlsError};

use crate::handshake::ClientCertificateType;
use crate::{CipherSuite, ProtocolVersion};

/// Highest protocol version the test peer is designed to offer.
pub const DESIGNED_MAXIMUM_VERSION: ProtocolVersion = ProtocolVersion::Tls12;

/// Where to load one credential bundle from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialResources {
    /// Certificate resources, leaf first.
    pub chain: Vec<String>,
    /// Private key resource.
    pub key: String,
}

impl CredentialResources {
    pub fn new<S: AsRef<str>>(chain: &[S], key: &str) -> Self {
        Self {
            chain: chain.iter().map(|s| s.as_ref().to_string()).collect(),
            key: key.to_string(),
        }
    }
}

/// Test peer configuration.
///
/// Only obtainable through [`PeerConfigBuilder::build`] (or `Default`, which
/// yields the same validated defaults), so every instance has passed
/// validation.
#[derive(Clone)]
pub struct PeerConfig {
    max_version: ProtocolVersion,
    supplementary_suites: Vec<CipherSuite>,
    request_hash_algorithms: Vec<HashAlgorithm>,
    request_signature_algorithms: Vec<SignatureAlgorithm>,
    client_certificate_type: ClientCertificateType,
    fingerprint_hash: HashAlgorithm,
    trusted_issuers: Vec<String>,
    signer_resources: Vec<(SignatureAlgorithm, CredentialResources)>,
    encryption_resources: CredentialResources,
}

impl fmt::Debug for PeerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PeerConfig")
            .field("max_version", &self.max_version)
            .field("supplementary_suites", &self.supplementary_suites)
            .field("request_hash_algorithms", &self.request_hash_algorithms)
            .field(
                "request_signature_algorithms",
                &self.request_signature_algorithms,
            )
            .field("fingerprint_hash", &self.fingerprint_hash)
            .field("trusted_issuers", &self.trusted_issuers.len())
            .field("signer_resources", &self.signer_resources.len())
            .finish_non_exhaustive()
    }
}

impl PeerConfig {
    /// Create a builder for peer configuration.
    pub fn builder() -> PeerConfigBuilder {
        PeerConfigBuilder::default()
    }

    /// Highest version offered to the engine.
    pub fn max_version(&self) -> ProtocolVersion {
        self.max_version
    }

    /// Suites appended after the engine's base list, in order.
    pub fn supplementary_suites(&self) -> &[CipherSuite] {
        &self.supplementary_suites
    }

    /// Hash kinds for CertificateRequest, strongest first. Never empty.
    pub fn request_hash_algorithms(&self) -> &[HashAlgorithm] {
        &self.request_hash_algorithms
    }

    /// Signature kinds for CertificateRequest. Never empty.
    pub fn request_signature_algorithms(&self) -> &[SignatureAlgorithm] {
        &self.request_signature_algorithms
    }

    pub fn client_certificate_type(&self) -> ClientCertificateType {
        self.client_certificate_type
    }

    /// Digest used for client certificate fingerprints (SHA-2 family).
    pub fn fingerprint_hash(&self) -> HashAlgorithm {
        self.fingerprint_hash
    }

    /// Trust anchor resources whose subjects become the acceptable CAs.
    pub fn trusted_issuers(&self) -> &[String] {
        &self.trusted_issuers
    }

    /// Signing credentials per signature kind.
    pub fn signer_resources(&self) -> &[(SignatureAlgorithm, CredentialResources)] {
        &self.signer_resources
    }

    /// Key-exchange (encryption) credentials.
    pub fn encryption_resources(&self) -> &CredentialResources {
        &self.encryption_resources
    }

    /// Signing resources registered for `signature`, if any.
    pub fn signer_resources_for(
        &self,
        signature: SignatureAlgorithm,
    ) -> Option<&CredentialResources> {
        self.signer_resources
            .iter()
            .find(|(kind, _)| *kind == signature)
            .map(|(_, resources)| resources)
    }
}

impl Default for PeerConfig {
    fn default() -> Self {
        let b = PeerConfigBuilder::default();
        Self {
            max_version: b.max_version,
            supplementary_suites: b.supplementary_suites,
            request_hash_algorithms: b.request_hash_algorithms,
            request_signature_algorithms: b.request_signature_algorithms,
            client_certificate_type: b.client_certificate_type,
            fingerprint_hash: b.fingerprint_hash,
            trusted_issuers: b.trusted_issuers,
            signer_resources: b.signer_resources,
            encryption_resources: b.encryption_resources,
        }
    }
}

/// Builder for `PeerConfig`.
#[derive(Debug)]
pub struct PeerConfigBuilder {
    max_version: ProtocolVersion,
    supplementary_suites: Vec<CipherSuite>,
    request_hash_algorithms: Vec<HashAlgorithm>,
    request_signature_algorithms: Vec<SignatureAlgorithm>,
    client_certificate_type: ClientCertificateType,
    fingerprint_hash: HashAlgorithm,
    trusted_issuers: Vec<String>,
    signer_resources: Vec<(SignatureAlgorithm, CredentialResources)>,
    encryption_resources: CredentialResources,
}

impl Default for PeerConfigBuilder {
    fn default() -> Self {
        let server = CredentialResources::new(
            &["x509-server.pem", "x509-ca.pem"],
            "x509-server-key.pem",
        );
        Self {
            max_version: DESIGNED_MAXIMUM_VERSION,
            supplementary_suites: vec![
                CipherSuite::TLS_ECDHE_RSA_WITH_CHACHA20_POLY1305_SHA256,
                CipherSuite::TLS_ECDHE_RSA_WITH_ESTREAM_SALSA20_SHA1,
                CipherSuite::TLS_ECDHE_RSA_WITH_SALSA20_SHA1,
                CipherSuite::TLS_RSA_WITH_ESTREAM_SALSA20_SHA1,
                CipherSuite::TLS_RSA_WITH_SALSA20_SHA1,
            ],
            request_hash_algorithms: vec![
                HashAlgorithm::Sha512,
                HashAlgorithm::Sha384,
                HashAlgorithm::Sha256,
                HashAlgorithm::Sha224,
                HashAlgorithm::Sha1,
            ],
            request_signature_algorithms: vec![SignatureAlgorithm::Rsa],
            client_certificate_type: ClientCertificateType::RsaSign,
            fingerprint_hash: HashAlgorithm::Sha256,
            trusted_issuers: vec!["x509-ca.pem".to_string()],
            signer_resources: vec![(SignatureAlgorithm::Rsa, server.clone())],
            encryption_resources: server,
        }
    }
}

impl PeerConfigBuilder {
    pub fn max_version(mut self, version: ProtocolVersion) -> Self {
        self.max_version = version;
        self
    }

    pub fn supplementary_suites(mut self, suites: &[CipherSuite]) -> Self {
        self.supplementary_suites = suites.to_vec();
        self
    }

    pub fn request_hash_algorithms(mut self, hashes: &[HashAlgorithm]) -> Self {
        self.request_hash_algorithms = hashes.to_vec();
        self
    }

    pub fn request_signature_algorithms(mut self, signatures: &[SignatureAlgorithm]) -> Self {
        self.request_signature_algorithms = signatures.to_vec();
        self
    }

    pub fn client_certificate_type(mut self, cert_type: ClientCertificateType) -> Self {
        self.client_certificate_type = cert_type;
        self
    }

    pub fn fingerprint_hash(mut self, hash: HashAlgorithm) -> Self {
        self.fingerprint_hash = hash;
        self
    }

    pub fn trusted_issuers<S: AsRef<str>>(mut self, resources: &[S]) -> Self {
        self.trusted_issuers = resources.iter().map(|s| s.as_ref().to_string()).collect();
        self
    }

    /// Register (or replace) the signing credentials for `signature`.
    pub fn signer_resources<S: AsRef<str>>(
        mut self,
        signature: SignatureAlgorithm,
        chain: &[S],
        key: &str,
    ) -> Self {
        let resources = CredentialResources::new(chain, key);
        self.signer_resources.retain(|(kind, _)| *kind != signature);
        self.signer_resources.push((signature, resources));
        self
    }

    /// Drop every registered signing credential.
    pub fn clear_signer_resources(mut self) -> Self {
        self.signer_resources.clear();
        self
    }

    pub fn encryption_resources<S: AsRef<str>>(mut self, chain: &[S], key: &str) -> Self {
        self.encryption_resources = CredentialResources::new(chain, key);
        self
    }

    pub fn build(self) -> Result<PeerConfig, TlsError> {
        if self.max_version > DESIGNED_MAXIMUM_VERSION {
            return Err(TlsError::InvalidConfig(format!(
                "maximum version {} exceeds designed maximum {}",
                self.max_version, DESIGNED_MAXIMUM_VERSION
            )));
        }
        if self.request_hash_algorithms.is_empty() {
            return Err(TlsError::InvalidConfig(
                "certificate request hash set is empty".into(),
            ));
        }
        if self.request_signature_algorithms.is_empty() {
            return Err(TlsError::InvalidConfig(
                "certificate request signature set is empty".into(),
            ));
        }
        if !self.fingerprint_hash.is_sha2() {
            return Err(TlsError::InvalidConfig(format!(
                "fingerprint hash {} is not a SHA-2 digest",
                self.fingerprint_hash
            )));
        }
        Ok(PeerConfig {
            max_version: self.max_version,
            supplementary_suites: self.supplementary_suites,
            request_hash_algorithms: self.request_hash_algorithms,
            request_signature_algorithms: self.request_signature_algorithms,
            client_certificate_type: self.client_certificate_type,
            fingerprint_hash: self.fingerprint_hash,
            trusted_issuers: self.trusted_issuers,
            signer_resources: self.signer_resources,
            encryption_resources: self.encryption_resources,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder_defaults() {
        let config = PeerConfig::builder().build().unwrap();
        assert_eq!(config.max_version(), ProtocolVersion::Tls12);
        assert_eq!(config.supplementary_suites().len(), 5);
        assert_eq!(
            config.supplementary_suites()[0],
            CipherSuite::TLS_ECDHE_RSA_WITH_CHACHA20_POLY1305_SHA256
        );
        assert_eq!(config.request_hash_algorithms()[0], HashAlgorithm::Sha512);
        assert_eq!(config.request_hash_algorithms()[4], HashAlgorithm::Sha1);
        assert_eq!(
            config.request_signature_algorithms(),
            vec![SignatureAlgorithm::Rsa]
        );
        assert_eq!(config.client_certificate_type(), ClientCertificateType::RsaSign);
        assert_eq!(config.fingerprint_hash(), HashAlgorithm::Sha256);
        assert_eq!(config.trusted_issuers(), vec!["x509-ca.pem".to_string()]);
    }

    #[test]
    fn test_default_matches_builder() {
        let built = PeerConfig::builder().build().unwrap();
        let default = PeerConfig::default();
        assert_eq!(built.max_version(), default.max_version());
        assert_eq!(built.supplementary_suites(), default.supplementary_suites());
        assert_eq!(built.signer_resources(), default.signer_resources());
    }

    #[test]
    fn test_default_rsa_signer_resources() {
        let config = PeerConfig::default();
        let rsa = config.signer_resources_for(SignatureAlgorithm::Rsa).unwrap();
        assert_eq!(rsa.chain, vec!["x509-server.pem", "x509-ca.pem"]);
        assert_eq!(rsa.key, "x509-server-key.pem");
        assert!(config
            .signer_resources_for(SignatureAlgorithm::Ecdsa)
            .is_none());
        assert_eq!(config.encryption_resources(), rsa);
    }

    #[test]
    fn test_lower_ceiling_accepted() {
        let config = PeerConfig::builder()
            .max_version(ProtocolVersion::Tls10)
            .build()
            .unwrap();
        assert_eq!(config.max_version(), ProtocolVersion::Tls10);
    }

    #[test]
    fn test_ceiling_above_designed_maximum_rejected() {
        let err = PeerConfig::builder()
            .max_version(ProtocolVersion::Tls13)
            .build()
            .unwrap_err();
        assert!(matches!(err, TlsError::InvalidConfig(_)));
    }

    #[test]
    fn test_default_is_a_validated_config() {
        let default = PeerConfig::default();
        assert!(!default.request_hash_algorithms().is_empty());
        assert!(!default.request_signature_algorithms().is_empty());
        assert!(default.fingerprint_hash().is_sha2());
        assert!(default.max_version() <= DESIGNED_MAXIMUM_VERSION);
        assert_eq!(
            format!("{default:?}"),
            format!("{:?}", PeerConfig::builder().build().unwrap())
        );
    }

    #[test]
    fn test_empty_request_sets_rejected() {
        assert!(PeerConfig::builder()
            .request_hash_algorithms(&[])
            .build()
            .is_err());
        assert!(PeerConfig::builder()
            .request_signature_algorithms(&[])
            .build()
            .is_err());
    }

    #[test]
    fn test_non_sha2_fingerprint_rejected() {
        let err = PeerConfig::builder()
            .fingerprint_hash(HashAlgorithm::Sha1)
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("SHA-1"));
    }

    #[test]
    fn test_signer_resources_replace() {
        let config = PeerConfig::builder()
            .signer_resources(SignatureAlgorithm::Ecdsa, &["ec.pem"], "ec-key.pem")
            .signer_resources(SignatureAlgorithm::Rsa, &["rsa.pem"], "rsa-key.pem")
            .build()
            .unwrap();
        assert_eq!(config.signer_resources().len(), 2);
        assert_eq!(
            config
                .signer_resources_for(SignatureAlgorithm::Rsa)
                .unwrap()
                .chain,
            vec!["rsa.pem"]
        );
        assert_eq!(
            config
                .signer_resources_for(SignatureAlgorithm::Ecdsa)
                .unwrap()
                .key,
            "ec-key.pem"
        );
    }

    #[test]
    fn test_clear_signer_resources() {
        let config = PeerConfig::builder()
            .clear_signer_resources()
            .build()
            .unwrap();
        assert!(config.signer_resources().is_empty());
    }

    #[test]
    fn test_debug_is_summarized() {
        let dbg = format!("{:?}", PeerConfig::default());
        assert!(dbg.contains("PeerConfig"));
        assert!(!dbg.contains("x509-server-key.pem"));
    }
}
