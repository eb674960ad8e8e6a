//! Invoice composition: billing record in, ordered layout blocks out.
//!
//! [`InvoiceComposer`] resolves every label, expands the text templates and
//! computes amounts. [`render`] hands the resulting [`LayoutBlock`]s to any
//! [`DocumentSink`].

mod composer;
mod layout;

pub use composer::{InvoiceComposer, compose};
pub use layout::*;
