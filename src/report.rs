//! Run-scoped error collaborator shared by the front-end stages.
//!
//! The scanner, parser, and resolver each surface *every* error they find in
//! one pass instead of stopping at the first; they funnel those errors here.
//! The driver polls [`Reporter::had_error`] between stages to decide whether
//! to advance the pipeline, and [`Reporter::had_runtime_error`] after an
//! `interpret` call to pick the process exit status. The evaluator itself
//! never reads these flags.

use log::debug;

use crate::error::LoxError;

/// Collects and emits diagnostics for one execution run.
///
/// Formatted messages go to stderr as they arrive and are also retained for
/// later inspection. In interactive use, [`Reporter::reset`] clears the
/// static-error flag between lines so one bad line does not poison the next.
#[derive(Debug, Default)]
pub struct Reporter {
    had_error: bool,
    had_runtime_error: bool,
    diagnostics: Vec<String>,
}

impl Reporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report a lexical, syntax, or resolution error.
    pub fn error(&mut self, err: &LoxError) {
        debug!("Reporting static error: {}", err);

        let formatted: String = err.to_string();
        eprintln!("{}", formatted);

        self.diagnostics.push(formatted);
        self.had_error = true;
    }

    /// Report a runtime error caught at the `interpret` boundary.
    pub fn runtime_error(&mut self, err: &LoxError) {
        debug!("Reporting runtime error: {}", err);

        let formatted: String = err.to_string();
        eprintln!("{}", formatted);

        self.diagnostics.push(formatted);
        self.had_runtime_error = true;
    }

    /// Did any lexical/syntax/static error occur in this run?
    pub fn had_error(&self) -> bool {
        self.had_error
    }

    /// Did a runtime error occur in this run?
    pub fn had_runtime_error(&self) -> bool {
        self.had_runtime_error
    }

    /// Clear the static-error flag (used by the REPL between lines).
    pub fn reset(&mut self) {
        self.had_error = false;
    }

    /// Every diagnostic emitted so far, in arrival order.
    pub fn diagnostics(&self) -> &[String] {
        &self.diagnostics
    }
}
