//! Diagnostic sink threaded through a generation run.
//!
//! Recoverable conditions (unsupported field shapes, reflective-mapper
//! caveats) are collected here instead of being logged through global state,
//! so callers can attach them to the run's report.

/// Collects warnings for a single generation run.
#[derive(Debug, Default)]
pub struct Diagnostics {
    warnings: Vec<String>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a recoverable condition. Also mirrored to the tracing log.
    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!("{}", message);
        self.warnings.push(message);
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn into_warnings(self) -> Vec<String> {
        self.warnings
    }
}
