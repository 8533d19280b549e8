//! Shared fixtures: an on-disk PKI generated with rcgen.

use std::sync::{Arc, Mutex};

use mockpeer_tls::diag::{CallbackSink, DiagnosticSink, Severity};

/// A CA, a server certificate it signed (files named like the default
/// configuration expects), and a client chain kept in memory.
pub struct Pki {
    pub dir: tempfile::TempDir,
    pub client_der: Vec<u8>,
    pub ca_der: Vec<u8>,
}

fn params(cn: &str, sans: Vec<String>) -> rcgen::CertificateParams {
    let mut params = rcgen::CertificateParams::new(sans).unwrap();
    params.distinguished_name = rcgen::DistinguishedName::new();
    params.distinguished_name.push(rcgen::DnType::CommonName, cn);
    params
}

pub fn pki() -> Pki {
    let ca_key = rcgen::KeyPair::generate().unwrap();
    let mut ca_params = params("mockpeer CA", Vec::new());
    ca_params.is_ca = rcgen::IsCa::Ca(rcgen::BasicConstraints::Unconstrained);
    let ca = ca_params.self_signed(&ca_key).unwrap();

    let server_key = rcgen::KeyPair::generate().unwrap();
    let server = params("mockpeer server", vec!["localhost".to_string()])
        .signed_by(&server_key, &ca, &ca_key)
        .unwrap();

    let client_key = rcgen::KeyPair::generate().unwrap();
    let client = params("mockpeer client", Vec::new())
        .signed_by(&client_key, &ca, &ca_key)
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("x509-ca.pem"), ca.pem()).unwrap();
    std::fs::write(dir.path().join("x509-server.pem"), server.pem()).unwrap();
    std::fs::write(
        dir.path().join("x509-server-key.pem"),
        server_key.serialize_pem(),
    )
    .unwrap();

    Pki {
        dir,
        client_der: client.der().to_vec(),
        ca_der: ca.der().to_vec(),
    }
}

pub type Lines = Arc<Mutex<Vec<(Severity, String)>>>;

pub fn capture() -> (Arc<dyn DiagnosticSink>, Lines) {
    let lines: Lines = Arc::new(Mutex::new(Vec::new()));
    let lines_clone = lines.clone();
    let sink = CallbackSink::new(Arc::new(move |severity, line: &str| {
        lines_clone.lock().unwrap().push((severity, line.to_string()));
    }));
    (Arc::new(sink), lines)
}

pub fn with_severity(lines: &Lines, severity: Severity) -> Vec<String> {
    lines
        .lock()
        .unwrap()
        .iter()
        .filter(|(s, _)| *s == severity)
        .map(|(_, l)| l.clone())
        .collect()
}
