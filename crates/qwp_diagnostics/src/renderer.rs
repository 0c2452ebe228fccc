//! Diagnostic rendering backends for human-readable and machine-readable output.

use crate::diagnostic::Diagnostic;

/// Trait for rendering diagnostics into formatted output strings.
pub trait DiagnosticRenderer {
    /// Renders a single diagnostic into a formatted string.
    fn render(&self, diag: &Diagnostic) -> String;
}

/// Renders diagnostics in a rustc-style terminal format.
///
/// Produces output like:
/// ```text
/// warning[W001]: net touches 150 nodes and was left out of the placement model
///   --> rst
///    = note: ...
///    = help: ...
/// ```
pub struct TerminalRenderer {
    /// Whether to use ANSI color codes in output.
    pub color: bool,
}

impl TerminalRenderer {
    /// Creates a new terminal renderer.
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn severity_label(&self, diag: &Diagnostic) -> String {
        let plain = format!("{}[{}]", diag.severity, diag.code);
        if !self.color {
            return plain;
        }
        let ansi = match diag.severity {
            crate::Severity::Error => "31",
            crate::Severity::Warning => "33",
            crate::Severity::Note => "36",
        };
        format!("\x1b[1;{ansi}m{plain}\x1b[0m")
    }
}

impl DiagnosticRenderer for TerminalRenderer {
    fn render(&self, diag: &Diagnostic) -> String {
        let mut out = format!("{}: {}\n", self.severity_label(diag), diag.message);

        if let Some(subject) = &diag.subject {
            out.push_str(&format!("  --> {subject}\n"));
        }
        for note in &diag.notes {
            out.push_str(&format!("   = note: {note}\n"));
        }
        for help in &diag.help {
            out.push_str(&format!("   = help: {help}\n"));
        }

        out
    }
}

/// Renders each diagnostic as a single line of JSON.
pub struct JsonRenderer;

impl DiagnosticRenderer for JsonRenderer {
    fn render(&self, diag: &Diagnostic) -> String {
        // Diagnostic holds only strings, enums and vectors, none of which can
        // fail to serialize.
        serde_json::to_string(diag).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::DiagnosticCode;

    #[test]
    fn render_plain_warning() {
        let diag = Diagnostic::warning(DiagnosticCode::DROPPED_NET, "net skipped")
            .with_subject("rst")
            .with_note("touches 150 nodes")
            .with_help("raise max_net_degree");
        let out = TerminalRenderer::new(false).render(&diag);
        assert!(out.starts_with("warning[W001]: net skipped\n"));
        assert!(out.contains("  --> rst\n"));
        assert!(out.contains("   = note: touches 150 nodes\n"));
        assert!(out.contains("   = help: raise max_net_degree\n"));
    }

    #[test]
    fn render_without_subject() {
        let diag = Diagnostic::note(DiagnosticCode::RUN_SUMMARY, "placed 3 elements");
        let out = TerminalRenderer::new(false).render(&diag);
        assert_eq!(out, "note[N001]: placed 3 elements\n");
    }

    #[test]
    fn render_colored_wraps_label() {
        let diag = Diagnostic::error(DiagnosticCode::PLACEMENT_FAILED, "boom");
        let out = TerminalRenderer::new(true).render(&diag);
        assert!(out.starts_with("\x1b[1;31merror[E001]\x1b[0m: boom"));
    }

    #[test]
    fn render_json_line() {
        let diag = Diagnostic::warning(DiagnosticCode::DROPPED_NET, "net skipped");
        let out = JsonRenderer.render(&diag);
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["severity"], "warning");
        assert_eq!(value["message"], "net skipped");
        assert!(!out.contains('\n'));
    }
}
