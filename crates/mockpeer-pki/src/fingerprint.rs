//! Certificate fingerprints.

use std::fmt;

use mockpeer_types::{HashAlgorithm, PkiError};
use sha2::{Digest, Sha224, Sha256, Sha384, Sha512};

/// A digest over a certificate's DER encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fingerprint {
    hash: HashAlgorithm,
    digest: Vec<u8>,
}

impl Fingerprint {
    /// Digest `data` with `hash`. Only the SHA-2 family is supported.
    pub fn compute(hash: HashAlgorithm, data: &[u8]) -> Result<Self, PkiError> {
        let digest = match hash {
            HashAlgorithm::Sha224 => Sha224::digest(data).to_vec(),
            HashAlgorithm::Sha256 => Sha256::digest(data).to_vec(),
            HashAlgorithm::Sha384 => Sha384::digest(data).to_vec(),
            HashAlgorithm::Sha512 => Sha512::digest(data).to_vec(),
            other => return Err(PkiError::UnsupportedDigest(other)),
        };
        Ok(Self { hash, digest })
    }

    pub fn hash_algorithm(&self) -> HashAlgorithm {
        self.hash
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.digest
    }
}

/// Uppercase hex, one colon between bytes.
impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, b) in self.digest.iter().enumerate() {
            if i > 0 {
                f.write_str(":")?;
            }
            write!(f, "{b:02X}")?;
        }
        Ok(())
    }
}
