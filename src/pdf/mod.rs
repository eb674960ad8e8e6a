//! PDF output for composed invoices.
//!
//! [`PdfDocument`] implements [`DocumentSink`](crate::compose::DocumentSink)
//! with the standard Helvetica fonts, so no font files are embedded. Text is
//! written in WinAnsi encoding: Polish letters are reduced to their base
//! Latin form and characters outside the encoding are printed as `?`.
//!
//! ```no_run
//! use rachunek::core::BillingRecord;
//! use rachunek::i18n::Catalog;
//!
//! let record = BillingRecord::from_path("invoice.yaml")?;
//! rachunek::pdf::generate(&record, &Catalog::builtin(), &"pl".into(), "invoice.pdf")?;
//! # Ok::<(), rachunek::core::RachunekError>(())
//! ```

mod document;
mod font;

use std::path::Path;

pub use document::PdfDocument;

use crate::compose::{compose, render};
use crate::core::{BillingRecord, LanguageTag, RachunekError};
use crate::i18n::TranslationSource;

/// Page geometry and type sizes, in PDF points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageConfig {
    pub width: f32,
    pub height: f32,
    /// Margin on all four sides.
    pub margin: f32,
    pub title_size: f32,
    pub heading_size: f32,
    pub body_size: f32,
    /// Line height as a multiple of the font size.
    pub line_spacing: f32,
}

impl PageConfig {
    /// ISO A4 portrait.
    pub const A4: PageConfig = PageConfig {
        width: 595.0,
        height: 842.0,
        margin: 40.0,
        title_size: 14.0,
        heading_size: 10.0,
        body_size: 10.0,
        line_spacing: 1.4,
    };
}

impl Default for PageConfig {
    fn default() -> Self {
        Self::A4
    }
}

/// Compose `record` in `language`, render it to PDF and save it at `out`.
pub fn generate(
    record: &BillingRecord,
    source: &dyn TranslationSource,
    language: &LanguageTag,
    out: impl AsRef<Path>,
) -> Result<(), RachunekError> {
    let blocks = compose(record, source, language);
    let mut document = PdfDocument::default();
    render(&blocks, &mut document);
    document.save(out)
}
