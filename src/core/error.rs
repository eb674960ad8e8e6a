use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading inputs or producing an invoice document.
///
/// Missing translations and template failures are not errors at this level:
/// they degrade to visible text and are reported through
/// [`Diagnostics`](super::Diagnostics) instead.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RachunekError {
    /// A file could not be read or written.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// Path of the file involved.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The billing record is malformed or incomplete.
    #[error("billing record error: {0}")]
    Record(String),

    /// A translation catalog could not be loaded.
    #[error("translation catalog error: {0}")]
    Catalog(String),

    /// A text template failed to parse or render.
    #[error("template error: {0}")]
    Template(String),

    /// Builder encountered missing configuration.
    #[error("builder error: {0}")]
    Builder(String),

    /// The output document could not be assembled or encoded.
    #[error("document error: {0}")]
    Document(String),
}

impl RachunekError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
