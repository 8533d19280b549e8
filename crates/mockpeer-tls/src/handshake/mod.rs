//! Handshake messages produced by the policy for the engine.

use mockpeer_pki::DistinguishedName;
use mockpeer_types::{SignatureAndHashAlgorithm, TlsError};

/// TLS handshake message type for CertificateRequest.
pub const HANDSHAKE_TYPE_CERTIFICATE_REQUEST: u8 = 13;

/// ClientCertificateType registry (RFC 5246 Section 7.4.4, RFC 4492).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ClientCertificateType {
    RsaSign = 1,
    DssSign = 2,
    RsaFixedDh = 3,
    DssFixedDh = 4,
    EcdsaSign = 64,
    RsaFixedEcdh = 65,
    EcdsaFixedEcdh = 66,
}

/// A server's request for a client certificate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateRequest {
    /// Accepted client certificate types.
    pub certificate_types: Vec<ClientCertificateType>,
    /// Supported (hash, signature) pairs. `None` when the negotiated version
    /// predates the field; this is distinct from an empty list.
    pub supported_signature_algorithms: Option<Vec<SignatureAndHashAlgorithm>>,
    /// Acceptable certificate authorities, in preference order.
    pub certificate_authorities: Vec<DistinguishedName>,
}

impl CertificateRequest {
    /// Encode as a handshake message (header included).
    ///
    /// The `supported_signature_algorithms` vector is written only when
    /// present, so a TLS 1.0/1.1 request carries no algorithm bytes at all.
    /// Fails if any vector exceeds the length its prefix can express.
    pub fn encode(&self) -> Result<Vec<u8>, TlsError> {
        let mut body = Vec::new();

        // cert_types_len(1) || cert_types
        body.push(vec_len::<u8>("certificate_types", self.certificate_types.len())?);
        body.extend(self.certificate_types.iter().map(|t| *t as u8));

        // sig_hash_algs_len(2) || sig_hash_algs (each 2 bytes)
        if let Some(algs) = &self.supported_signature_algorithms {
            let len = vec_len::<u16>("supported_signature_algorithms", algs.len() * 2)?;
            body.extend_from_slice(&len.to_be_bytes());
            for alg in algs {
                body.extend_from_slice(&alg.to_u16().to_be_bytes());
            }
        }

        // ca_list_len(2) || (dn_len(2) || dn)*
        let ca_total: usize = self
            .certificate_authorities
            .iter()
            .map(|dn| 2 + dn.as_der().len())
            .sum();
        let ca_len = vec_len::<u16>("certificate_authorities", ca_total)?;
        body.extend_from_slice(&ca_len.to_be_bytes());
        for dn in &self.certificate_authorities {
            let dn_len = vec_len::<u16>("distinguished name", dn.as_der().len())?;
            body.extend_from_slice(&dn_len.to_be_bytes());
            body.extend_from_slice(dn.as_der());
        }

        // Handshake length is 24 bits.
        let len = body.len();
        if len > 0xFF_FFFF {
            return Err(TlsError::HandshakeFailed(format!(
                "CertificateRequest body of {len} bytes exceeds handshake length"
            )));
        }
        let mut out = Vec::with_capacity(4 + len);
        out.push(HANDSHAKE_TYPE_CERTIFICATE_REQUEST);
        out.push((len >> 16) as u8);
        out.push((len >> 8) as u8);
        out.push(len as u8);
        out.extend_from_slice(&body);
        Ok(out)
    }
}

/// Length prefix for a vector field, rejecting values the prefix cannot hold.
fn vec_len<T: TryFrom<usize>>(field: &str, len: usize) -> Result<T, TlsError> {
    T::try_from(len).map_err(|_| {
        TlsError::HandshakeFailed(format!(
            "CertificateRequest {field} length {len} exceeds its length prefix"
        ))
    })
}
