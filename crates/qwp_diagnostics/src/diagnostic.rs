//! Structured diagnostic messages.

use crate::code::DiagnosticCode;
use crate::severity::Severity;
use serde::{Deserialize, Serialize};

/// A structured diagnostic message.
///
/// The placer works on an abstract graph rather than source text, so a
/// diagnostic points at a `subject` (an element, wire or net name) instead of
/// a source span.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// The severity level of this diagnostic.
    pub severity: Severity,
    /// The code identifying the kind of diagnostic.
    pub code: DiagnosticCode,
    /// The main diagnostic message.
    pub message: String,
    /// The design object the message is about, if any.
    pub subject: Option<String>,
    /// Explanatory footnotes.
    pub notes: Vec<String>,
    /// Actionable suggestions.
    pub help: Vec<String>,
}

impl Diagnostic {
    fn new(severity: Severity, code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self {
            severity,
            code,
            message: message.into(),
            subject: None,
            notes: Vec::new(),
            help: Vec::new(),
        }
    }

    /// Creates a new error diagnostic.
    pub fn error(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, code, message)
    }

    /// Creates a new warning diagnostic.
    pub fn warning(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, code, message)
    }

    /// Creates a new informational note.
    pub fn note(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self::new(Severity::Note, code, message)
    }

    /// Names the design object this diagnostic refers to.
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_warning() {
        let diag = Diagnostic::warning(DiagnosticCode::DROPPED_NET, "net too large");
        assert_eq!(diag.severity, Severity::Warning);
        assert_eq!(diag.message, "net too large");
        assert_eq!(diag.code.to_string(), "W001");
        assert!(diag.subject.is_none());
    }

    #[test]
    fn create_error_and_note() {
        let err = Diagnostic::error(DiagnosticCode::PLACEMENT_FAILED, "out of bounds");
        assert!(err.severity.is_error());
        let note = Diagnostic::note(DiagnosticCode::RUN_SUMMARY, "done");
        assert_eq!(note.severity, Severity::Note);
    }

    #[test]
    fn builder_methods() {
        let diag = Diagnostic::warning(DiagnosticCode::DROPPED_NET, "net skipped")
            .with_subject("clk")
            .with_note("touches 150 nodes")
            .with_help("raise max_net_degree to include it");
        assert_eq!(diag.subject.as_deref(), Some("clk"));
        assert_eq!(diag.notes.len(), 1);
        assert_eq!(diag.help.len(), 1);
    }
}
