//! Line-oriented diagnostic records produced by the handshake policy.
//!
//! Records go to an injected [`DiagnosticSink`] with one of two severities.
//! The policy never writes to process output directly, and a failing sink is
//! reported through `tracing` and otherwise ignored.

use std::fmt;
use std::io::Write;
use std::sync::Arc;

use mockpeer_types::SinkError;

/// `tracing` target used by [`TracingSink`].
pub const DIAG_TARGET: &str = "mockpeer::diag";

/// Diagnostic stream selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Normal,
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Normal => f.write_str("normal"),
            Severity::Fatal => f.write_str("fatal"),
        }
    }
}

/// Accepts diagnostic records, one line per call.
pub trait DiagnosticSink: Send + Sync {
    fn emit(&self, severity: Severity, line: &str) -> Result<(), SinkError>;
}

/// Normal records to stdout, fatal records to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdioSink;

impl DiagnosticSink for StdioSink {
    fn emit(&self, severity: Severity, line: &str) -> Result<(), SinkError> {
        match severity {
            Severity::Normal => writeln!(std::io::stdout().lock(), "{line}")?,
            Severity::Fatal => writeln!(std::io::stderr().lock(), "{line}")?,
        }
        Ok(())
    }
}

/// Forwards records to `tracing` under [`DIAG_TARGET`].
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&self, severity: Severity, line: &str) -> Result<(), SinkError> {
        match severity {
            Severity::Normal => tracing::info!(target: DIAG_TARGET, "{line}"),
            Severity::Fatal => tracing::error!(target: DIAG_TARGET, "{line}"),
        }
        Ok(())
    }
}

/// Diagnostic callback type.
pub type DiagnosticCallback = Arc<dyn Fn(Severity, &str) + Send + Sync>;

/// Hands each record to a user callback.
#[derive(Clone)]
pub struct CallbackSink {
    callback: DiagnosticCallback,
}

impl CallbackSink {
    pub fn new(callback: DiagnosticCallback) -> Self {
        Self { callback }
    }
}

impl fmt::Debug for CallbackSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackSink").finish_non_exhaustive()
    }
}

impl DiagnosticSink for CallbackSink {
    fn emit(&self, severity: Severity, line: &str) -> Result<(), SinkError> {
        (self.callback)(severity, line);
        Ok(())
    }
}

/// Emit a record, containing any sink failure.
pub(crate) fn emit(sink: &dyn DiagnosticSink, severity: Severity, line: &str) {
    if let Err(e) = sink.emit(severity, line) {
        tracing::warn!(error = %e, %severity, "diagnostic sink failed; record dropped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct BrokenSink;

    impl DiagnosticSink for BrokenSink {
        fn emit(&self, _: Severity, _: &str) -> Result<(), SinkError> {
            Err(SinkError::Unavailable("closed".into()))
        }
    }

    #[test]
    fn test_callback_sink_records() {
        let lines: Arc<Mutex<Vec<(Severity, String)>>> = Arc::new(Mutex::new(Vec::new()));
        let lines_clone = lines.clone();
        let sink = CallbackSink::new(Arc::new(move |severity, line: &str| {
            lines_clone.lock().unwrap().push((severity, line.to_string()));
        }));

        sink.emit(Severity::Normal, "one").unwrap();
        sink.emit(Severity::Fatal, "two").unwrap();

        let logged = lines.lock().unwrap();
        assert_eq!(
            *logged,
            vec![
                (Severity::Normal, "one".to_string()),
                (Severity::Fatal, "two".to_string())
            ]
        );
    }

    #[test]
    fn test_emit_contains_sink_failure() {
        // Must not panic or propagate.
        emit(&BrokenSink, Severity::Fatal, "lost");
    }

    #[test]
    fn test_tracing_sink_with_subscriber() {
        let subscriber = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::TRACE)
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            TracingSink.emit(Severity::Normal, "normal line").unwrap();
            TracingSink.emit(Severity::Fatal, "fatal line").unwrap();
        });
    }

    #[test]
    fn test_stdio_sink() {
        StdioSink.emit(Severity::Normal, "stdout line").unwrap();
        StdioSink.emit(Severity::Fatal, "stderr line").unwrap();
    }

    #[test]
    fn test_severity_display() {
        assert_eq!(Severity::Normal.to_string(), "normal");
        assert_eq!(Severity::Fatal.to_string(), "fatal");
    }
}
