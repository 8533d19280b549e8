use crate::algorithm::HashAlgorithm;

/// Certificate and credential resource errors.
#[derive(Debug, thiserror::Error)]
pub enum PkiError {
    #[error("resource not found: {0}")]
    NotFound(String),
    #[error("cannot read resource '{resource}': {source}")]
    Unreadable {
        resource: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed resource '{resource}': {reason}")]
    Malformed { resource: String, reason: String },
    #[error("invalid certificate: {0}")]
    InvalidCert(String),
    #[error("pem decode error: {0}")]
    Pem(String),
    #[error("unsupported fingerprint digest: {0}")]
    UnsupportedDigest(HashAlgorithm),
}

/// Handshake policy errors surfaced to the driving engine.
#[derive(Debug, thiserror::Error)]
pub enum TlsError {
    #[error("resource load failure: {0}")]
    ResourceLoad(#[from] PkiError),
    #[error("protocol version has not been negotiated on this connection")]
    VersionNotNegotiated,
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("handshake failed: {0}")]
    HandshakeFailed(String),
}

/// Diagnostic sink failures. Never propagated into handshake control flow.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("diagnostic sink unavailable: {0}")]
    Unavailable(String),
}
