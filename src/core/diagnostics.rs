use std::fmt;
use std::sync::{Mutex, PoisonError};

use super::types::LanguageTag;

/// A non-fatal problem noticed while composing an invoice.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Diagnostic {
    /// A label key was not found in any catalog; the sentinel text was used.
    MissingTranslation { key: String, language: LanguageTag },
    /// A text block template failed; the block was rendered empty.
    TemplateFailed { block: &'static str, reason: String },
    /// An amount did not fit in a `Decimal`; its cell was left empty.
    AmountOutOfRange { row: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingTranslation { key, language } => {
                write!(f, "missing translation \"{key}\" for language {language}")
            }
            Self::TemplateFailed { block, reason } => {
                write!(f, "{block} template failed: {reason}")
            }
            Self::AmountOutOfRange { row } => write!(f, "amount out of range in row `{row}`"),
        }
    }
}

/// Receiver for [`Diagnostic`]s, passed explicitly to the components that emit them.
pub trait Diagnostics: Send + Sync {
    fn report(&self, diagnostic: Diagnostic);
}

/// Forwards every diagnostic to `tracing` at WARN level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn report(&self, diagnostic: Diagnostic) {
        match &diagnostic {
            Diagnostic::MissingTranslation { key, language } => {
                tracing::warn!(%key, %language, "missing translation");
            }
            Diagnostic::TemplateFailed { block, reason } => {
                tracing::warn!(block = *block, %reason, "template expansion failed, rendering empty text");
            }
            Diagnostic::AmountOutOfRange { row } => {
                tracing::warn!(%row, "amount out of range, leaving cell empty");
            }
        }
    }
}

/// Keeps every reported diagnostic in memory.
#[derive(Debug, Default)]
pub struct CollectingDiagnostics {
    entries: Mutex<Vec<Diagnostic>>,
}

impl CollectingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything reported so far, in report order.
    pub fn entries(&self) -> Vec<Diagnostic> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_empty(&self) -> bool {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }
}

impl Diagnostics for CollectingDiagnostics {
    fn report(&self, diagnostic: Diagnostic) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(diagnostic);
    }
}
