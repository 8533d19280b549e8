#![forbid(unsafe_code)]
#![doc = "Configurable server-side handshake policy for exercising TLS engines in integration tests."]

pub mod alert;
pub mod config;
pub mod diag;
pub mod handshake;
pub mod policy;

use std::fmt;

pub use mockpeer_types::{
    HashAlgorithm, PkiError, SignatureAlgorithm, SignatureAndHashAlgorithm, TlsError,
};

/// TLS protocol version, ordered oldest to newest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProtocolVersion {
    Ssl3,
    Tls10,
    Tls11,
    Tls12,
    Tls13,
}

impl ProtocolVersion {
    /// Wire encoding `(major, minor)`.
    pub fn wire(&self) -> (u8, u8) {
        match self {
            ProtocolVersion::Ssl3 => (3, 0),
            ProtocolVersion::Tls10 => (3, 1),
            ProtocolVersion::Tls11 => (3, 2),
            ProtocolVersion::Tls12 => (3, 3),
            ProtocolVersion::Tls13 => (3, 4),
        }
    }

    pub fn from_wire(major: u8, minor: u8) -> Option<Self> {
        match (major, minor) {
            (3, 0) => Some(ProtocolVersion::Ssl3),
            (3, 1) => Some(ProtocolVersion::Tls10),
            (3, 2) => Some(ProtocolVersion::Tls11),
            (3, 3) => Some(ProtocolVersion::Tls12),
            (3, 4) => Some(ProtocolVersion::Tls13),
            _ => None,
        }
    }

    /// Whether the `signature_algorithms` extension (RFC 5246 Section 7.4.1.4.1)
    /// exists at this version.
    pub fn supports_signature_algorithms(&self) -> bool {
        *self >= ProtocolVersion::Tls12
    }
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProtocolVersion::Ssl3 => "SSL 3.0",
            ProtocolVersion::Tls10 => "TLS 1.0",
            ProtocolVersion::Tls11 => "TLS 1.1",
            ProtocolVersion::Tls12 => "TLS 1.2",
            ProtocolVersion::Tls13 => "TLS 1.3",
        };
        f.write_str(name)
    }
}

/// TLS cipher suite identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CipherSuite(pub u16);

impl CipherSuite {
    // Engine defaults (representative)
    pub const TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256: Self = Self(0xC02F);
    pub const TLS_ECDHE_RSA_WITH_AES_256_GCM_SHA384: Self = Self(0xC030);
    pub const TLS_ECDHE_RSA_WITH_AES_128_CBC_SHA256: Self = Self(0xC027);
    pub const TLS_ECDHE_RSA_WITH_AES_128_CBC_SHA: Self = Self(0xC013);
    pub const TLS_DHE_RSA_WITH_AES_128_GCM_SHA256: Self = Self(0x009E);
    pub const TLS_RSA_WITH_AES_128_GCM_SHA256: Self = Self(0x009C);
    pub const TLS_RSA_WITH_AES_128_CBC_SHA256: Self = Self(0x003C);
    pub const TLS_RSA_WITH_AES_128_CBC_SHA: Self = Self(0x002F);

    // RFC 7905
    pub const TLS_ECDHE_RSA_WITH_CHACHA20_POLY1305_SHA256: Self = Self(0xCCA8);

    // draft-josefsson-salsa20-tls (private use range)
    pub const TLS_RSA_WITH_ESTREAM_SALSA20_SHA1: Self = Self(0xE410);
    pub const TLS_RSA_WITH_SALSA20_SHA1: Self = Self(0xE411);
    pub const TLS_ECDHE_RSA_WITH_ESTREAM_SALSA20_SHA1: Self = Self(0xE416);
    pub const TLS_ECDHE_RSA_WITH_SALSA20_SHA1: Self = Self(0xE417);

    /// IANA-style name, if known.
    pub fn name(&self) -> Option<&'static str> {
        let name = match *self {
            Self::TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256 => "TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256",
            Self::TLS_ECDHE_RSA_WITH_AES_256_GCM_SHA384 => "TLS_ECDHE_RSA_WITH_AES_256_GCM_SHA384",
            Self::TLS_ECDHE_RSA_WITH_AES_128_CBC_SHA256 => "TLS_ECDHE_RSA_WITH_AES_128_CBC_SHA256",
            Self::TLS_ECDHE_RSA_WITH_AES_128_CBC_SHA => "TLS_ECDHE_RSA_WITH_AES_128_CBC_SHA",
            Self::TLS_DHE_RSA_WITH_AES_128_GCM_SHA256 => "TLS_DHE_RSA_WITH_AES_128_GCM_SHA256",
            Self::TLS_RSA_WITH_AES_128_GCM_SHA256 => "TLS_RSA_WITH_AES_128_GCM_SHA256",
            Self::TLS_RSA_WITH_AES_128_CBC_SHA256 => "TLS_RSA_WITH_AES_128_CBC_SHA256",
            Self::TLS_RSA_WITH_AES_128_CBC_SHA => "TLS_RSA_WITH_AES_128_CBC_SHA",
            Self::TLS_ECDHE_RSA_WITH_CHACHA20_POLY1305_SHA256 => {
                "TLS_ECDHE_RSA_WITH_CHACHA20_POLY1305_SHA256"
            }
            Self::TLS_RSA_WITH_ESTREAM_SALSA20_SHA1 => "TLS_RSA_WITH_ESTREAM_SALSA20_SHA1",
            Self::TLS_RSA_WITH_SALSA20_SHA1 => "TLS_RSA_WITH_SALSA20_SHA1",
            Self::TLS_ECDHE_RSA_WITH_ESTREAM_SALSA20_SHA1 => {
                "TLS_ECDHE_RSA_WITH_ESTREAM_SALSA20_SHA1"
            }
            Self::TLS_ECDHE_RSA_WITH_SALSA20_SHA1 => "TLS_ECDHE_RSA_WITH_SALSA20_SHA1",
            _ => return None,
        };
        Some(name)
    }
}

impl fmt::Display for CipherSuite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "0x{:04X}", self.0),
        }
    }
}
