use crate::core::{Diagnostic, Diagnostics, LanguageTag};

use super::catalog::TranslationSource;

/// Text shown in place of a label that no catalog provides.
pub fn missing_translation(key: &str) -> String {
    format!("[missing translation \"{key}\"]")
}

/// Resolves `(key, language)` pairs to display strings.
///
/// Never fails: a missing key yields [`missing_translation`] and a
/// [`Diagnostic::MissingTranslation`] report.
#[derive(Clone, Copy)]
pub struct Resolver<'a> {
    source: &'a dyn TranslationSource,
    diagnostics: &'a dyn Diagnostics,
}

impl<'a> Resolver<'a> {
    pub fn new(source: &'a dyn TranslationSource, diagnostics: &'a dyn Diagnostics) -> Self {
        Self {
            source,
            diagnostics,
        }
    }

    pub fn resolve(&self, key: &str, language: &LanguageTag) -> String {
        match self.source.lookup(key, language) {
            Some(text) => text.to_string(),
            None => {
                self.diagnostics.report(Diagnostic::MissingTranslation {
                    key: key.to_string(),
                    language: language.clone(),
                });
                missing_translation(key)
            }
        }
    }
}

/// A [`Resolver`] bound to one active language.
#[derive(Clone)]
pub struct Localizer<'a> {
    resolver: Resolver<'a>,
    language: LanguageTag,
}

impl<'a> Localizer<'a> {
    pub fn new(resolver: Resolver<'a>, language: LanguageTag) -> Self {
        Self { resolver, language }
    }

    /// Translate `key` into the active language.
    pub fn t(&self, key: &str) -> String {
        self.resolver.resolve(key, &self.language)
    }

    pub fn language(&self) -> &LanguageTag {
        &self.language
    }
}
