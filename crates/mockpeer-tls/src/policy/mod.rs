//! Server-side handshake customization.
//!
//! The engine holds a [`ServerPolicy`] and calls it at fixed handshake steps;
//! the policy never drives the handshake. [`MockServerPolicy`] is the
//! configurable implementation, assembled from six components that can also
//! be used on their own.
//!
//! Per-connection call order: `on_version_negotiated` before
//! `certificate_request`, which comes before `on_client_certificate_received`.
//! Only the first constraint is checked (`TlsError::VersionNotNegotiated`).

mod alerts;
mod cert_request;
mod context;
mod credentials;
mod inspector;
mod suites;
mod version;

#[cfg(test)]
pub(crate) mod test_support;

use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use mockpeer_pki::{
    CertificateChain, CredentialBundle, CredentialStore, FileCredentialStore, IdentityResolver,
};
use mockpeer_types::{SignatureAlgorithm, TlsError};

use crate::alert::Alert;
use crate::config::PeerConfig;
use crate::diag::DiagnosticSink;
use crate::handshake::CertificateRequest;
use crate::{CipherSuite, ProtocolVersion};

pub use alerts::AlertObserver;
pub use cert_request::CertificateRequestBuilder;
pub use context::ConnectionContext;
pub use credentials::CredentialSelector;
pub use inspector::ClientCertificateInspector;
pub use suites::CipherSuiteAdvertiser;
pub use version::VersionPolicy;

/// Hooks the handshake engine invokes on the server side.
pub trait ServerPolicy: Send + Sync {
    /// Suites to offer: `base` plus any extras.
    fn advertised_suites(&self, base: &[CipherSuite]) -> Vec<CipherSuite>;

    fn maximum_offered_version(&self) -> ProtocolVersion;

    /// Called once per connection with the engine's chosen version.
    fn on_version_negotiated(
        &self,
        ctx: &mut ConnectionContext,
        version: ProtocolVersion,
    ) -> ProtocolVersion;

    /// The CertificateRequest for this connection.
    fn certificate_request(&self, ctx: &ConnectionContext)
        -> Result<CertificateRequest, TlsError>;

    fn on_client_certificate_received(&self, chain: &CertificateChain);

    /// Signing credentials for `target`; `Ok(None)` means none compatible.
    fn select_credentials(
        &self,
        ctx: &ConnectionContext,
        target: SignatureAlgorithm,
    ) -> Result<Option<CredentialBundle>, TlsError>;

    /// RSA key-exchange credentials.
    fn encryption_credentials(&self) -> Result<CredentialBundle, TlsError>;

    fn on_alert_raised(
        &self,
        alert: &Alert,
        message: Option<&str>,
        cause: Option<&(dyn Error + 'static)>,
    );

    fn on_alert_received(&self, alert: &Alert);
}

/// Configurable test server policy.
pub struct MockServerPolicy {
    suites: CipherSuiteAdvertiser,
    version: VersionPolicy,
    request: CertificateRequestBuilder,
    inspector: ClientCertificateInspector,
    credentials: CredentialSelector,
    alerts: AlertObserver,
    resolver: Arc<dyn IdentityResolver>,
    trusted_issuers: Vec<String>,
}

impl MockServerPolicy {
    pub fn new(
        config: &PeerConfig,
        store: Arc<dyn CredentialStore>,
        resolver: Arc<dyn IdentityResolver>,
        sink: Arc<dyn DiagnosticSink>,
    ) -> Self {
        Self {
            suites: CipherSuiteAdvertiser::new(config.supplementary_suites().to_vec()),
            version: VersionPolicy::new(config.max_version(), sink.clone()),
            request: CertificateRequestBuilder::new(
                config.request_hash_algorithms().to_vec(),
                config.request_signature_algorithms().to_vec(),
                config.client_certificate_type(),
            ),
            inspector: ClientCertificateInspector::new(config.fingerprint_hash(), sink.clone()),
            credentials: CredentialSelector::new(
                store,
                config.signer_resources().to_vec(),
                config.encryption_resources().clone(),
            ),
            alerts: AlertObserver::new(sink),
            resolver,
            trusted_issuers: config.trusted_issuers().to_vec(),
        }
    }

    /// Policy backed by a directory of PEM files, used as both credential
    /// store and trust-anchor resolver.
    pub fn from_directory(
        config: &PeerConfig,
        root: impl Into<PathBuf>,
        sink: Arc<dyn DiagnosticSink>,
    ) -> Self {
        let store = Arc::new(FileCredentialStore::new(root));
        Self::new(config, store.clone(), store, sink)
    }
}

impl ServerPolicy for MockServerPolicy {
    fn advertised_suites(&self, base: &[CipherSuite]) -> Vec<CipherSuite> {
        self.suites.advertised_suites(base)
    }

    fn maximum_offered_version(&self) -> ProtocolVersion {
        self.version.maximum_offered_version()
    }

    fn on_version_negotiated(
        &self,
        ctx: &mut ConnectionContext,
        version: ProtocolVersion,
    ) -> ProtocolVersion {
        self.version.on_version_negotiated(ctx, version)
    }

    fn certificate_request(
        &self,
        ctx: &ConnectionContext,
    ) -> Result<CertificateRequest, TlsError> {
        let version = ctx
            .negotiated_version()
            .ok_or(TlsError::VersionNotNegotiated)?;
        let issuers = self
            .trusted_issuers
            .iter()
            .map(|resource| self.resolver.resolve_subject(resource))
            .collect::<Result<Vec<_>, _>>()?;
        tracing::debug!(%version, issuers = issuers.len(), "building certificate request");
        Ok(self.request.build_request(version, issuers))
    }

    fn on_client_certificate_received(&self, chain: &CertificateChain) {
        self.inspector.on_client_certificate_received(chain);
    }

    fn select_credentials(
        &self,
        ctx: &ConnectionContext,
        target: SignatureAlgorithm,
    ) -> Result<Option<CredentialBundle>, TlsError> {
        self.credentials
            .select_credentials(ctx.peer_signature_algorithms(), target)
    }

    fn encryption_credentials(&self) -> Result<CredentialBundle, TlsError> {
        self.credentials.encryption_credentials()
    }

    fn on_alert_raised(
        &self,
        alert: &Alert,
        message: Option<&str>,
        cause: Option<&(dyn Error + 'static)>,
    ) {
        self.alerts.on_alert_raised(alert, message, cause);
    }

    fn on_alert_received(&self, alert: &Alert) {
        self.alerts.on_alert_received(alert);
    }
}
