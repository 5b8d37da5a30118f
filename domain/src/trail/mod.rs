//! Audit trail of a single comparison run
//!
//! The trail is the user-facing record of what a run did: which models
//! answered, which judge was asked, each verdict and the final decision.
//! Concurrent adjudications append through a shared reference, so the line
//! buffer sits behind a mutex.

use std::sync::{Mutex, MutexGuard};
use tracing::info;

/// Ordered, append-only log of one run
pub struct AuditTrail {
    lines: Mutex<Vec<String>>,
    verbose: bool,
}

impl AuditTrail {
    /// Create an empty trail; `verbose` enables step-by-step detail lines
    pub fn new(verbose: bool) -> Self {
        Self {
            lines: Mutex::new(Vec::new()),
            verbose,
        }
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Append a line unconditionally
    pub fn record(&self, line: impl Into<String>) {
        let line = line.into();
        info!(target: "multillm::trail", "{}", line);
        self.lock().push(line);
    }

    /// Snapshot of the lines recorded so far
    pub fn lines(&self) -> Vec<String> {
        self.lock().clone()
    }

    /// Hand the recorded lines to the caller
    pub fn into_lines(self) -> Vec<String> {
        self.lines
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn lock(&self) -> MutexGuard<'_, Vec<String>> {
        self.lines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for AuditTrail {
    fn default() -> Self {
        Self::new(true)
    }
}

impl std::fmt::Debug for AuditTrail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuditTrail")
            .field("lines", &self.lines())
            .field("verbose", &self.verbose)
            .finish()
    }
}
