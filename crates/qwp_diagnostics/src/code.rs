//! Diagnostic codes with category prefixes.
//!
//! The codes the placer emits are collected here as constants so that tests
//! and downstream tooling can match on them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The category of a diagnostic code, determining its prefix letter.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Category {
    /// Fatal problems, prefixed with `E`.
    Error,
    /// Recoverable problems, prefixed with `W`.
    Warning,
    /// Informational messages, prefixed with `N`.
    Note,
}

impl Category {
    /// Returns the single-character prefix for this category.
    pub fn prefix(self) -> char {
        match self {
            Category::Error => 'E',
            Category::Warning => 'W',
            Category::Note => 'N',
        }
    }
}

/// A category prefix plus a number, displayed as e.g. `W001`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct DiagnosticCode {
    /// The category of this diagnostic.
    pub category: Category,
    /// The numeric identifier within the category.
    pub number: u16,
}

impl DiagnosticCode {
    /// Placement aborted on an invariant violation or a numerical failure.
    pub const PLACEMENT_FAILED: DiagnosticCode = DiagnosticCode::new(Category::Error, 1);
    /// A net touched more nodes than the clique-expansion limit and was skipped.
    pub const DROPPED_NET: DiagnosticCode = DiagnosticCode::new(Category::Warning, 1);
    /// Summary statistics of a completed placement run.
    pub const RUN_SUMMARY: DiagnosticCode = DiagnosticCode::new(Category::Note, 1);

    /// Creates a new diagnostic code.
    pub const fn new(category: Category, number: u16) -> Self {
        Self { category, number }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:03}", self.category.prefix(), self.number)
    }
}
