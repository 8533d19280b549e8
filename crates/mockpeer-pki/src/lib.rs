#![forbid(unsafe_code)]
#![doc = "Certificate chains, fingerprints and credential loading for the mockpeer TLS test server."]

pub mod fingerprint;
pub mod store;
pub mod x509;

pub use fingerprint::Fingerprint;
pub use store::{
    CredentialBundle, CredentialStore, FileCredentialStore, IdentityResolver, PrivateKeyMaterial,
};
pub use x509::{CertificateChain, CertificateEntry, DistinguishedName};
