//! Credential and trust-anchor loading.
//!
//! The handshake policy only sees the [`CredentialStore`] and
//! [`IdentityResolver`] capabilities; [`FileCredentialStore`] is the PEM
//! directory implementation used by the test server. Nothing is cached:
//! every call goes back to storage.

use std::fmt;
use std::path::{Path, PathBuf};

use mockpeer_types::{PkiError, SignatureAndHashAlgorithm};
use zeroize::{Zeroize, Zeroizing};

use crate::x509::{parse_certs_pem, CertificateChain, CertificateEntry, DistinguishedName};

/// PEM labels accepted for private keys (PKCS#8, PKCS#1, SEC1).
const KEY_LABELS: &[&str] = &["PRIVATE KEY", "RSA PRIVATE KEY", "EC PRIVATE KEY"];

/// Private key bytes as read from storage. Wiped on drop.
pub struct PrivateKeyMaterial {
    label: String,
    der: Vec<u8>,
}

impl PrivateKeyMaterial {
    pub fn new(label: impl Into<String>, der: Vec<u8>) -> Self {
        Self {
            label: label.into(),
            der,
        }
    }

    /// The PEM label the key was stored under.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn as_der(&self) -> &[u8] {
        &self.der
    }
}

impl Drop for PrivateKeyMaterial {
    fn drop(&mut self) {
        self.der.zeroize();
    }
}

impl fmt::Debug for PrivateKeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKeyMaterial")
            .field("label", &self.label)
            .field("der", &format!("[{} bytes]", self.der.len()))
            .finish()
    }
}

/// A private key bound to its certificate chain.
#[derive(Debug)]
pub struct CredentialBundle {
    chain: CertificateChain,
    key: PrivateKeyMaterial,
    algorithm: Option<SignatureAndHashAlgorithm>,
}

impl CredentialBundle {
    pub fn new(
        chain: CertificateChain,
        key: PrivateKeyMaterial,
        algorithm: Option<SignatureAndHashAlgorithm>,
    ) -> Self {
        Self {
            chain,
            key,
            algorithm,
        }
    }

    pub fn certificate_chain(&self) -> &CertificateChain {
        &self.chain
    }

    pub fn private_key(&self) -> &PrivateKeyMaterial {
        &self.key
    }

    /// The (hash, signature) pair this bundle was loaded for, if one was
    /// negotiated. `None` for legacy signing and for encryption credentials.
    pub fn signature_and_hash_algorithm(&self) -> Option<SignatureAndHashAlgorithm> {
        self.algorithm
    }
}

/// Loads credential bundles from external storage.
pub trait CredentialStore: Send + Sync {
    /// Load the certificates named by `chain` (leaf first) and the private key
    /// at `key`, tagging the bundle with `algorithm`.
    fn load(
        &self,
        chain: &[String],
        key: &str,
        algorithm: Option<SignatureAndHashAlgorithm>,
    ) -> Result<CredentialBundle, PkiError>;
}

/// Resolves a trust anchor's subject identity.
pub trait IdentityResolver: Send + Sync {
    fn resolve_subject(&self, resource: &str) -> Result<DistinguishedName, PkiError>;
}

/// Credential store over a directory of PEM files.
///
/// Resource identifiers are file names relative to the root directory.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    root: PathBuf,
}

impl FileCredentialStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn read(&self, resource: &str) -> Result<Zeroizing<Vec<u8>>, PkiError> {
        let path = self.root.join(resource);
        match std::fs::read(&path) {
            Ok(bytes) => Ok(Zeroizing::new(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(PkiError::NotFound(path.display().to_string()))
            }
            Err(source) => Err(PkiError::Unreadable {
                resource: path.display().to_string(),
                source,
            }),
        }
    }

    /// Load every certificate in a PEM resource. An empty resource is malformed.
    pub fn load_certificates(&self, resource: &str) -> Result<Vec<CertificateEntry>, PkiError> {
        let pem = self.read(resource)?;
        let entries = parse_certs_pem(&pem).map_err(|e| malformed(resource, e))?;
        if entries.is_empty() {
            return Err(malformed(resource, "no CERTIFICATE blocks"));
        }
        Ok(entries)
    }

    /// Load a single PEM private key.
    pub fn load_private_key(&self, resource: &str) -> Result<PrivateKeyMaterial, PkiError> {
        let pem = self.read(resource)?;
        let (label, mut der) = der::pem::decode_vec(&pem).map_err(|e| malformed(resource, e))?;
        if !KEY_LABELS.contains(&label) {
            der.zeroize();
            return Err(malformed(
                resource,
                format!("unexpected PEM label '{label}'"),
            ));
        }
        Ok(PrivateKeyMaterial::new(label, der))
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(
        &self,
        chain: &[String],
        key: &str,
        algorithm: Option<SignatureAndHashAlgorithm>,
    ) -> Result<CredentialBundle, PkiError> {
        if chain.is_empty() {
            return Err(malformed(key, "no certificate resources for key"));
        }
        let mut entries = Vec::new();
        for resource in chain {
            entries.extend(self.load_certificates(resource)?);
        }
        let key_material = self.load_private_key(key)?;
        tracing::debug!(
            chain_len = entries.len(),
            key = %key,
            algorithm = ?algorithm,
            "credential bundle loaded"
        );
        Ok(CredentialBundle::new(
            CertificateChain::new(entries),
            key_material,
            algorithm,
        ))
    }
}

impl IdentityResolver for FileCredentialStore {
    /// Subject of the first certificate in `resource`.
    fn resolve_subject(&self, resource: &str) -> Result<DistinguishedName, PkiError> {
        let mut entries = self.load_certificates(resource)?;
        Ok(entries.swap_remove(0).subject)
    }
}

fn malformed(resource: &str, reason: impl fmt::Display) -> PkiError {
    PkiError::Malformed {
        resource: resource.to_string(),
        reason: reason.to_string(),
    }
}
