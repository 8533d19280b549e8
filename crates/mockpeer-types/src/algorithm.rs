//! TLS 1.2 signature and hash algorithm identifiers (RFC 5246 Section 7.4.1.4.1).

use std::fmt;

/// Hash algorithm identifiers as carried in `SignatureAndHashAlgorithm`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum HashAlgorithm {
    None = 0,
    Md5 = 1,
    Sha1 = 2,
    Sha224 = 3,
    Sha256 = 4,
    Sha384 = 5,
    Sha512 = 6,
}

impl HashAlgorithm {
    /// Convert from u8 to HashAlgorithm.
    pub fn from_u8(v: u8) -> Result<Self, u8> {
        match v {
            0 => Ok(HashAlgorithm::None),
            1 => Ok(HashAlgorithm::Md5),
            2 => Ok(HashAlgorithm::Sha1),
            3 => Ok(HashAlgorithm::Sha224),
            4 => Ok(HashAlgorithm::Sha256),
            5 => Ok(HashAlgorithm::Sha384),
            6 => Ok(HashAlgorithm::Sha512),
            _ => Err(v),
        }
    }

    /// Digest output size in bytes, or 0 for `None`.
    pub fn output_len(&self) -> usize {
        match self {
            HashAlgorithm::None => 0,
            HashAlgorithm::Md5 => 16,
            HashAlgorithm::Sha1 => 20,
            HashAlgorithm::Sha224 => 28,
            HashAlgorithm::Sha256 => 32,
            HashAlgorithm::Sha384 => 48,
            HashAlgorithm::Sha512 => 64,
        }
    }

    /// Returns true for the SHA-2 family.
    pub fn is_sha2(&self) -> bool {
        matches!(
            self,
            HashAlgorithm::Sha224
                | HashAlgorithm::Sha256
                | HashAlgorithm::Sha384
                | HashAlgorithm::Sha512
        )
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HashAlgorithm::None => "none",
            HashAlgorithm::Md5 => "MD5",
            HashAlgorithm::Sha1 => "SHA-1",
            HashAlgorithm::Sha224 => "SHA-224",
            HashAlgorithm::Sha256 => "SHA-256",
            HashAlgorithm::Sha384 => "SHA-384",
            HashAlgorithm::Sha512 => "SHA-512",
        };
        f.write_str(name)
    }
}

/// Signature algorithm identifiers as carried in `SignatureAndHashAlgorithm`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SignatureAlgorithm {
    Anonymous = 0,
    Rsa = 1,
    Dsa = 2,
    Ecdsa = 3,
}

impl SignatureAlgorithm {
    /// Convert from u8 to SignatureAlgorithm.
    pub fn from_u8(v: u8) -> Result<Self, u8> {
        match v {
            0 => Ok(SignatureAlgorithm::Anonymous),
            1 => Ok(SignatureAlgorithm::Rsa),
            2 => Ok(SignatureAlgorithm::Dsa),
            3 => Ok(SignatureAlgorithm::Ecdsa),
            _ => Err(v),
        }
    }
}

impl fmt::Display for SignatureAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SignatureAlgorithm::Anonymous => "anonymous",
            SignatureAlgorithm::Rsa => "RSA",
            SignatureAlgorithm::Dsa => "DSA",
            SignatureAlgorithm::Ecdsa => "ECDSA",
        };
        f.write_str(name)
    }
}

/// A (hash, signature) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SignatureAndHashAlgorithm {
    pub hash: HashAlgorithm,
    pub signature: SignatureAlgorithm,
}

impl SignatureAndHashAlgorithm {
    pub const fn new(hash: HashAlgorithm, signature: SignatureAlgorithm) -> Self {
        Self { hash, signature }
    }

    /// Two-byte code point: hash in the high byte, signature in the low byte.
    pub fn to_u16(&self) -> u16 {
        ((self.hash as u16) << 8) | self.signature as u16
    }

    /// Parse a two-byte code point. Returns the raw value if either half is unknown.
    pub fn from_u16(v: u16) -> Result<Self, u16> {
        let hash = HashAlgorithm::from_u8((v >> 8) as u8).map_err(|_| v)?;
        let signature = SignatureAlgorithm::from_u8(v as u8).map_err(|_| v)?;
        Ok(Self { hash, signature })
    }
}

impl fmt::Display for SignatureAndHashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}with{}", self.hash, self.signature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_algorithm_values() {
        assert_eq!(HashAlgorithm::None as u8, 0);
        assert_eq!(HashAlgorithm::Sha1 as u8, 2);
        assert_eq!(HashAlgorithm::Sha256 as u8, 4);
        assert_eq!(HashAlgorithm::Sha512 as u8, 6);
    }

    #[test]
    fn test_hash_algorithm_from_u8() {
        for code in 0u8..=6 {
            assert_eq!(HashAlgorithm::from_u8(code).unwrap() as u8, code);
        }
        assert_eq!(HashAlgorithm::from_u8(7).unwrap_err(), 7);
        assert_eq!(HashAlgorithm::from_u8(255).unwrap_err(), 255);
    }

    #[test]
    fn test_signature_algorithm_from_u8() {
        assert_eq!(SignatureAlgorithm::from_u8(1).unwrap(), SignatureAlgorithm::Rsa);
        assert_eq!(SignatureAlgorithm::from_u8(3).unwrap(), SignatureAlgorithm::Ecdsa);
        assert!(SignatureAlgorithm::from_u8(7).is_err());
    }

    #[test]
    fn test_output_len_matches_family() {
        assert_eq!(HashAlgorithm::Sha224.output_len(), 28);
        assert_eq!(HashAlgorithm::Sha384.output_len(), 48);
        assert!(HashAlgorithm::Sha256.is_sha2());
        assert!(!HashAlgorithm::Sha1.is_sha2());
        assert!(!HashAlgorithm::None.is_sha2());
    }

    #[test]
    fn test_code_point() {
        let alg = SignatureAndHashAlgorithm::new(HashAlgorithm::Sha256, SignatureAlgorithm::Rsa);
        assert_eq!(alg.to_u16(), 0x0401);
        assert_eq!(SignatureAndHashAlgorithm::from_u16(0x0401).unwrap(), alg);

        let ecdsa =
            SignatureAndHashAlgorithm::new(HashAlgorithm::Sha384, SignatureAlgorithm::Ecdsa);
        assert_eq!(ecdsa.to_u16(), 0x0503);
    }

    #[test]
    fn test_code_point_unknown_half() {
        // RSA-PSS code points are TLS 1.3 schemes, not (hash, signature) pairs
        assert_eq!(SignatureAndHashAlgorithm::from_u16(0x0804).unwrap_err(), 0x0804);
        assert_eq!(SignatureAndHashAlgorithm::from_u16(0x0409).unwrap_err(), 0x0409);
    }

    #[test]
    fn test_structural_equality() {
        let a = SignatureAndHashAlgorithm::new(HashAlgorithm::Sha1, SignatureAlgorithm::Rsa);
        let b = SignatureAndHashAlgorithm::new(HashAlgorithm::Sha1, SignatureAlgorithm::Rsa);
        let c = SignatureAndHashAlgorithm::new(HashAlgorithm::Sha1, SignatureAlgorithm::Dsa);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_display() {
        let alg = SignatureAndHashAlgorithm::new(HashAlgorithm::Sha512, SignatureAlgorithm::Rsa);
        assert_eq!(alg.to_string(), "SHA-512withRSA");
        assert_eq!(HashAlgorithm::Sha224.to_string(), "SHA-224");
    }
}
