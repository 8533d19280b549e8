use std::sync::Arc;

use crate::diag::{self, DiagnosticSink, Severity};
use crate::policy::ConnectionContext;
use crate::ProtocolVersion;

/// Version ceiling and negotiated-version bookkeeping.
pub struct VersionPolicy {
    ceiling: ProtocolVersion,
    sink: Arc<dyn DiagnosticSink>,
}

impl VersionPolicy {
    pub fn new(ceiling: ProtocolVersion, sink: Arc<dyn DiagnosticSink>) -> Self {
        Self { ceiling, sink }
    }

    pub fn maximum_offered_version(&self) -> ProtocolVersion {
        self.ceiling
    }

    /// Record the engine's choice in `ctx` and hand it back unchanged.
    pub fn on_version_negotiated(
        &self,
        ctx: &mut ConnectionContext,
        version: ProtocolVersion,
    ) -> ProtocolVersion {
        if let Some(previous) = ctx.record_version(version) {
            tracing::warn!(%previous, %version, "version negotiated twice on one connection");
        }
        diag::emit(
            self.sink.as_ref(),
            Severity::Normal,
            &format!("TLS server negotiated {version}"),
        );
        version
    }
}
