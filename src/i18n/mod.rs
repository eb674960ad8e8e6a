//! Translation catalogs and label resolution.
//!
//! [`Catalog`] holds key → text mappings per language and implements the
//! [`TranslationSource`] capability. [`Resolver`] turns lookups into display
//! strings, substituting a visible sentinel for missing keys.

mod catalog;
mod resolver;

pub use catalog::{CATALOG_EXTENSIONS, Catalog, TranslationSource};
pub use resolver::{Localizer, Resolver, missing_translation};
