//! In-memory collaborators for policy unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use mockpeer_pki::{
    CertificateChain, CredentialBundle, CredentialStore, DistinguishedName, IdentityResolver,
    PrivateKeyMaterial,
};
use mockpeer_types::{PkiError, SignatureAndHashAlgorithm, SinkError};

use crate::diag::{CallbackSink, DiagnosticSink, Severity};

/// Captures every diagnostic record.
#[derive(Clone, Default)]
pub(crate) struct Recorder {
    lines: Arc<Mutex<Vec<(Severity, String)>>>,
}

impl Recorder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn sink(&self) -> Arc<dyn DiagnosticSink> {
        let lines = self.lines.clone();
        Arc::new(CallbackSink::new(Arc::new(move |severity, line: &str| {
            lines.lock().unwrap().push((severity, line.to_string()));
        })))
    }

    pub(crate) fn lines(&self) -> Vec<(Severity, String)> {
        self.lines.lock().unwrap().clone()
    }

    fn with(&self, severity: Severity) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|(s, _)| *s == severity)
            .map(|(_, l)| l)
            .collect()
    }

    pub(crate) fn normal(&self) -> Vec<String> {
        self.with(Severity::Normal)
    }

    pub(crate) fn fatal(&self) -> Vec<String> {
        self.with(Severity::Fatal)
    }
}

/// Rejects every record, counting the attempts.
#[derive(Default)]
pub(crate) struct FailingSink {
    attempts: AtomicUsize,
}

impl FailingSink {
    pub(crate) fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

impl DiagnosticSink for FailingSink {
    fn emit(&self, _: Severity, _: &str) -> Result<(), SinkError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(SinkError::Unavailable("stream closed".into()))
    }
}

/// DER of a Name holding a single short CN.
pub(crate) fn name_der(cn: &str) -> Vec<u8> {
    let value = cn.as_bytes();
    let atv_len = 5 + 2 + value.len();
    let mut der = vec![0x30, (atv_len + 4) as u8, 0x31, (atv_len + 2) as u8];
    der.extend_from_slice(&[0x30, atv_len as u8, 0x06, 0x03, 0x55, 0x04, 0x03]);
    der.extend_from_slice(&[0x0C, value.len() as u8]);
    der.extend_from_slice(value);
    der
}

pub(crate) fn dn(cn: &str) -> DistinguishedName {
    DistinguishedName::from_der(&name_der(cn)).unwrap()
}

/// Resolves `<cn>.pem` to `CN=<cn>`; `missing.pem` is not found.
pub(crate) struct FakeResolver;

impl IdentityResolver for FakeResolver {
    fn resolve_subject(&self, resource: &str) -> Result<DistinguishedName, PkiError> {
        if resource == "missing.pem" {
            return Err(PkiError::NotFound(resource.to_string()));
        }
        Ok(dn(resource.trim_end_matches(".pem")))
    }
}

/// One recorded `load` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LoadCall {
    pub chain: Vec<String>,
    pub key: String,
    pub algorithm: Option<SignatureAndHashAlgorithm>,
}

/// Records `load` calls and returns a placeholder bundle; keys named
/// `missing.pem` fail with `NotFound`.
#[derive(Default)]
pub(crate) struct FakeStore {
    calls: Mutex<Vec<LoadCall>>,
}

impl FakeStore {
    pub(crate) fn calls(&self) -> Vec<LoadCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl CredentialStore for FakeStore {
    fn load(
        &self,
        chain: &[String],
        key: &str,
        algorithm: Option<SignatureAndHashAlgorithm>,
    ) -> Result<CredentialBundle, PkiError> {
        self.calls.lock().unwrap().push(LoadCall {
            chain: chain.to_vec(),
            key: key.to_string(),
            algorithm,
        });
        if key == "missing.pem" {
            return Err(PkiError::NotFound(key.to_string()));
        }
        Ok(CredentialBundle::new(
            CertificateChain::empty(),
            PrivateKeyMaterial::new("PRIVATE KEY", key.as_bytes().to_vec()),
            algorithm,
        ))
    }
}
