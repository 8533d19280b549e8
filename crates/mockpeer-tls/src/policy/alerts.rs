use std::error::Error;
use std::sync::Arc;

use crate::alert::Alert;
use crate::diag::{self, DiagnosticSink, Severity};

/// Records alerts sent and received. Fatal alerts go to the fatal stream.
pub struct AlertObserver {
    sink: Arc<dyn DiagnosticSink>,
}

impl AlertObserver {
    pub fn new(sink: Arc<dyn DiagnosticSink>) -> Self {
        Self { sink }
    }

    pub fn on_alert_raised(
        &self,
        alert: &Alert,
        message: Option<&str>,
        cause: Option<&(dyn Error + 'static)>,
    ) {
        let severity = severity_of(alert);
        let sink = self.sink.as_ref();
        diag::emit(sink, severity, &format!("TLS server raised alert ({alert})"));
        if let Some(message) = message {
            diag::emit(sink, severity, &format!("> {message}"));
        }
        let mut next = cause;
        while let Some(err) = next {
            diag::emit(sink, severity, &format!("caused by: {err}"));
            next = err.source();
        }
    }

    pub fn on_alert_received(&self, alert: &Alert) {
        diag::emit(
            self.sink.as_ref(),
            severity_of(alert),
            &format!("TLS server received alert ({alert})"),
        );
    }
}

fn severity_of(alert: &Alert) -> Severity {
    if alert.is_fatal() {
        Severity::Fatal
    } else {
        Severity::Normal
    }
}
