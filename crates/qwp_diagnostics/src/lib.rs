//! Coded diagnostics for the placer: severity, codes, accumulation, rendering.
//!
//! Placement findings that the user should see (dropped nets, run summaries,
//! fatal invariant violations) are reported as structured [`Diagnostic`]
//! values. The thread-safe [`DiagnosticSink`] accumulates them during a run,
//! and a [`DiagnosticRenderer`] turns them into text for the terminal.

#![warn(missing_docs)]

pub mod code;
pub mod diagnostic;
pub mod renderer;
pub mod severity;
pub mod sink;

pub use code::{Category, DiagnosticCode};
pub use diagnostic::Diagnostic;
pub use renderer::{DiagnosticRenderer, JsonRenderer, TerminalRenderer};
pub use severity::Severity;
pub use sink::DiagnosticSink;
