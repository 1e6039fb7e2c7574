//! A single reported finding.

use crate::code::DiagnosticCode;
use crate::severity::Severity;
use crate::snippet::Snippet;
use serde::{Deserialize, Serialize};

/// One problem found in a transition table.
///
/// Built with [`Diagnostic::error`] or [`Diagnostic::warning`] and refined
/// with the `with_*` methods. The snippet points into the guard or
/// assignment string the problem was found in.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Error, warning or note.
    pub severity: Severity,
    /// Stable identifier, e.g. `E103`.
    pub code: DiagnosticCode,
    /// One-line summary.
    pub message: String,
    /// The expression text this diagnostic points into, if any.
    pub snippet: Option<Snippet>,
    /// Explanatory footnotes (e.g., "note: ...").
    pub notes: Vec<String>,
    /// Actionable suggestions (e.g., "help: ...").
    pub help: Vec<String>,
}

impl Diagnostic {
    /// Creates a new error diagnostic with the given code and message.
    pub fn error(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self::with_severity(Severity::Error, code, message)
    }

    /// Creates a new warning diagnostic with the given code and message.
    pub fn warning(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self::with_severity(Severity::Warning, code, message)
    }

    fn with_severity(severity: Severity, code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self {
            severity,
            code,
            message: message.into(),
            snippet: None,
            notes: Vec::new(),
            help: Vec::new(),
        }
    }

    /// Attaches a snippet to this diagnostic.
    pub fn with_snippet(mut self, snippet: Snippet) -> Self {
        self.snippet = Some(snippet);
        self
    }

    /// Adds a note to this diagnostic.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Adds a help message to this diagnostic.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help.push(help.into());
        self
    }
}
