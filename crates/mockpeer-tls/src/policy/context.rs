use mockpeer_types::SignatureAndHashAlgorithm;

use crate::ProtocolVersion;

/// Negotiation state owned by one connection.
///
/// The engine creates one context per connection and hands it to every policy
/// call for that connection. Nothing in it is shared across connections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionContext {
    negotiated_version: Option<ProtocolVersion>,
    peer_signature_algorithms: Option<Vec<SignatureAndHashAlgorithm>>,
}

impl ConnectionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// The version recorded by `on_version_negotiated`, if it has run.
    pub fn negotiated_version(&self) -> Option<ProtocolVersion> {
        self.negotiated_version
    }

    pub(crate) fn record_version(&mut self, version: ProtocolVersion) -> Option<ProtocolVersion> {
        self.negotiated_version.replace(version)
    }

    /// Store the `signature_algorithms` list parsed from the ClientHello.
    ///
    /// `None` means the extension was not sent; `Some(vec![])` means it was
    /// sent empty. The two are kept distinct.
    pub fn set_peer_signature_algorithms(&mut self, algs: Option<Vec<SignatureAndHashAlgorithm>>) {
        self.peer_signature_algorithms = algs;
    }

    pub fn peer_signature_algorithms(&self) -> Option<&[SignatureAndHashAlgorithm]> {
        self.peer_signature_algorithms.as_deref()
    }
}
