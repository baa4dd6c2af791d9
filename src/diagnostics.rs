use crate::prelude::*;

/// Sink for decode diagnostics. The decoder reports through this instead of
/// a module-level logger so tests can capture or silence the side channel.
/// Diagnostics are never correctness-relevant and may be dropped.
pub trait Diagnostics: Send + Sync {
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
}

/// Default sink: forwards to the `log` facade.
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn info(&self, message: &str) {
        info!("{}", message);
    }

    fn warn(&self, message: &str) {
        warn!("{}", message);
    }
}

/// Discards everything.
pub struct NullDiagnostics;

impl Diagnostics for NullDiagnostics {
    fn info(&self, _message: &str) {}
    fn warn(&self, _message: &str) {}
}
