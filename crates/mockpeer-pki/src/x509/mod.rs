//! X.509 certificate entries, chains and subject names.
//!
//! Parsing is structural only: no signature, validity or trust checks are
//! performed here.

use std::fmt;

use der::{Decode, Encode};
use mockpeer_types::{HashAlgorithm, PkiError};
use x509_cert::name::Name;
use x509_cert::Certificate;

use crate::fingerprint::Fingerprint;

/// A distinguished name (DN): its DER encoding plus the RFC 4514 rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistinguishedName {
    der: Vec<u8>,
    text: String,
}

impl DistinguishedName {
    /// Decode a DER-encoded X.509 `Name`.
    pub fn from_der(der: &[u8]) -> Result<Self, PkiError> {
        let name = Name::from_der(der)
            .map_err(|e| PkiError::InvalidCert(format!("distinguished name: {e}")))?;
        Self::from_name(&name)
    }

    fn from_name(name: &Name) -> Result<Self, PkiError> {
        let der = name
            .to_der()
            .map_err(|e| PkiError::InvalidCert(format!("distinguished name: {e}")))?;
        Ok(Self {
            der,
            text: name.to_string(),
        })
    }

    /// The DER encoding, as carried in a CertificateRequest's
    /// `certificate_authorities` list.
    pub fn as_der(&self) -> &[u8] {
        &self.der
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for DistinguishedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// One certificate of a chain.
#[derive(Debug, Clone)]
pub struct CertificateEntry {
    /// DER-encoded certificate data.
    pub raw: Vec<u8>,
    /// Subject distinguished name.
    pub subject: DistinguishedName,
    /// Issuer distinguished name.
    pub issuer: DistinguishedName,
}

impl CertificateEntry {
    /// Parse a DER-encoded certificate.
    pub fn from_der(der: &[u8]) -> Result<Self, PkiError> {
        let cert = Certificate::from_der(der).map_err(|e| PkiError::InvalidCert(e.to_string()))?;
        Self::from_certificate(&cert, der.to_vec())
    }

    fn from_certificate(cert: &Certificate, raw: Vec<u8>) -> Result<Self, PkiError> {
        Ok(Self {
            raw,
            subject: DistinguishedName::from_name(&cert.tbs_certificate.subject)?,
            issuer: DistinguishedName::from_name(&cert.tbs_certificate.issuer)?,
        })
    }

    /// Fingerprint of the DER encoding.
    pub fn fingerprint(&self, hash: HashAlgorithm) -> Result<Fingerprint, PkiError> {
        Fingerprint::compute(hash, &self.raw)
    }
}

/// Parse every CERTIFICATE block of a PEM document, in document order.
pub fn parse_certs_pem(pem: &[u8]) -> Result<Vec<CertificateEntry>, PkiError> {
    if pem.iter().all(|b| b.is_ascii_whitespace()) {
        return Ok(Vec::new());
    }
    let certs = Certificate::load_pem_chain(pem).map_err(|e| PkiError::Pem(e.to_string()))?;
    certs
        .iter()
        .map(|cert| {
            let raw = cert
                .to_der()
                .map_err(|e| PkiError::InvalidCert(e.to_string()))?;
            CertificateEntry::from_certificate(cert, raw)
        })
        .collect()
}

/// An ordered certificate chain, leaf first. May be empty.
#[derive(Debug, Clone, Default)]
pub struct CertificateChain {
    entries: Vec<CertificateEntry>,
}

impl CertificateChain {
    pub fn new(entries: Vec<CertificateEntry>) -> Self {
        Self { entries }
    }

    /// A chain with no certificates (the peer declined to present one).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse a list of DER certificates, leaf first.
    pub fn from_der_list<T: AsRef<[u8]>>(certs: &[T]) -> Result<Self, PkiError> {
        let entries = certs
            .iter()
            .map(|der| CertificateEntry::from_der(der.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn leaf(&self) -> Option<&CertificateEntry> {
        self.entries.first()
    }

    pub fn entries(&self) -> &[CertificateEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CertificateEntry> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a CertificateChain {
    type Item = &'a CertificateEntry;
    type IntoIter = std::slice::Iter<'a, CertificateEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
