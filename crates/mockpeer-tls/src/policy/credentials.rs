use std::sync::Arc;

use mockpeer_pki::{CredentialBundle, CredentialStore};
use mockpeer_types::{SignatureAlgorithm, SignatureAndHashAlgorithm, TlsError};

use crate::config::CredentialResources;

/// Picks signing and encryption credentials for the server.
///
/// Bundles are loaded from the store on every call; nothing is cached.
pub struct CredentialSelector {
    store: Arc<dyn CredentialStore>,
    signers: Vec<(SignatureAlgorithm, CredentialResources)>,
    encryption: CredentialResources,
}

impl CredentialSelector {
    pub fn new(
        store: Arc<dyn CredentialStore>,
        signers: Vec<(SignatureAlgorithm, CredentialResources)>,
        encryption: CredentialResources,
    ) -> Self {
        Self {
            store,
            signers,
            encryption,
        }
    }

    /// Signing credentials for `target`, honoring the peer's preferences.
    ///
    /// - `preferences == None`: the unfiltered default bundle for `target`.
    /// - `Some(list)`: the bundle for the first entry of `list` signed with
    ///   `target`. No matching entry (including an empty list) yields
    ///   `Ok(None)`, as does a `target` with no configured resources.
    ///
    /// Store failures are returned as [`TlsError::ResourceLoad`]. A bundle
    /// tagged with any pair other than the one requested is rejected with
    /// [`TlsError::HandshakeFailed`].
    pub fn select_credentials(
        &self,
        preferences: Option<&[SignatureAndHashAlgorithm]>,
        target: SignatureAlgorithm,
    ) -> Result<Option<CredentialBundle>, TlsError> {
        let algorithm = match preferences {
            None => None,
            Some(list) => match list.iter().find(|alg| alg.signature == target) {
                Some(alg) => Some(*alg),
                None => {
                    tracing::debug!(%target, offered = list.len(), "no compatible signature algorithm");
                    return Ok(None);
                }
            },
        };

        let Some(resources) = self.resources_for(target) else {
            tracing::debug!(%target, "no signing credentials configured");
            return Ok(None);
        };

        tracing::debug!(%target, algorithm = ?algorithm, "loading signing credentials");
        let bundle = self
            .store
            .load(&resources.chain, &resources.key, algorithm)?;
        if bundle.signature_and_hash_algorithm() != algorithm {
            return Err(TlsError::HandshakeFailed(format!(
                "credential store returned {:?} for requested {:?}",
                bundle.signature_and_hash_algorithm(),
                algorithm
            )));
        }
        Ok(Some(bundle))
    }

    /// Key-exchange credentials. Never filtered by signature algorithm.
    pub fn encryption_credentials(&self) -> Result<CredentialBundle, TlsError> {
        let bundle = self
            .store
            .load(&self.encryption.chain, &self.encryption.key, None)?;
        Ok(bundle)
    }

    fn resources_for(&self, target: SignatureAlgorithm) -> Option<&CredentialResources> {
        self.signers
            .iter()
            .find(|(kind, _)| *kind == target)
            .map(|(_, resources)| resources)
    }
}
