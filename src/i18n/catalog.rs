use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::{LanguageTag, RachunekError};

/// Anything that can look up a label for a language.
///
/// The composer only sees this trait, so catalogs loaded from disk,
/// embedded tables, or a remote service are interchangeable.
pub trait TranslationSource: Send + Sync {
    /// The translation of `key` in `language`, if there is one.
    fn lookup(&self, key: &str, language: &LanguageTag) -> Option<&str>;
}

/// File extensions recognized by [`Catalog::load_dir`].
pub const CATALOG_EXTENSIONS: &[&str] = &["yaml", "yml"];

/// Key → string mappings for every loaded language.
///
/// A key missing in the requested language is looked up in the default
/// language (English unless changed) before it counts as missing.
#[derive(Debug, Clone)]
pub struct Catalog {
    messages: BTreeMap<LanguageTag, BTreeMap<String, String>>,
    default_language: Option<LanguageTag>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            messages: BTreeMap::new(),
            default_language: Some(LanguageTag::default()),
        }
    }
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The English and Polish labels shipped with the crate.
    pub fn builtin() -> Self {
        Self::new()
            .with_messages("en", CATALOG_EN.iter().copied())
            .with_messages("pl", CATALOG_PL.iter().copied())
    }

    /// Load every `*.yaml` / `*.yml` file below `dir`, recursively.
    ///
    /// The language tag is the last dot-separated part of the file stem, so
    /// `en.yaml` and `active.en.yaml` both feed the `en` catalog. Files are read
    /// in path order; a later file overrides keys of an earlier one. The first
    /// unreadable or malformed file aborts the whole load.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self, RachunekError> {
        let dir = dir.as_ref();
        let mut files = Vec::new();
        collect_catalog_files(dir, &mut files)?;
        files.sort();

        let mut catalog = Self::new();
        for path in files {
            tracing::debug!(file = %path.display(), "loading translations");
            let language = language_for_path(&path)?;
            let source = fs::read_to_string(&path).map_err(|e| RachunekError::io(&path, e))?;
            catalog
                .add_yaml(language, &source)
                .map_err(|e| RachunekError::Catalog(format!("{}: {e}", path.display())))?;
        }
        Ok(catalog)
    }

    /// Change the language consulted when a key is missing.
    pub fn with_default_language(mut self, language: impl Into<LanguageTag>) -> Self {
        self.default_language = Some(language.into());
        self
    }

    /// Only ever consult the requested language.
    pub fn without_fallback(mut self) -> Self {
        self.default_language = None;
        self
    }

    pub fn with_messages<I, K, V>(mut self, language: impl Into<LanguageTag>, messages: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let entry = self.messages.entry(language.into()).or_default();
        entry.extend(messages.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn insert(
        &mut self,
        language: impl Into<LanguageTag>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.messages
            .entry(language.into())
            .or_default()
            .insert(key.into(), value.into());
    }

    /// Merge a flat YAML `key: text` mapping into `language`.
    pub fn add_yaml(
        &mut self,
        language: impl Into<LanguageTag>,
        source: &str,
    ) -> Result<(), RachunekError> {
        let parsed: BTreeMap<String, String> = if source.trim().is_empty() {
            BTreeMap::new()
        } else {
            serde_yaml::from_str(source).map_err(|e| RachunekError::Catalog(e.to_string()))?
        };
        self.messages
            .entry(language.into())
            .or_default()
            .extend(parsed);
        Ok(())
    }

    /// Languages with at least one loaded file or entry.
    pub fn languages(&self) -> impl Iterator<Item = &LanguageTag> {
        self.messages.keys()
    }

    pub fn default_language(&self) -> Option<&LanguageTag> {
        self.default_language.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.values().all(BTreeMap::is_empty)
    }
}

impl TranslationSource for Catalog {
    fn lookup(&self, key: &str, language: &LanguageTag) -> Option<&str> {
        if let Some(text) = self.messages.get(language).and_then(|m| m.get(key)) {
            return Some(text.as_str());
        }
        let fallback = self.default_language.as_ref().filter(|d| *d != language)?;
        let text = self.messages.get(fallback)?.get(key)?;
        tracing::debug!(key, %language, %fallback, "using default-language translation");
        Some(text.as_str())
    }
}

fn collect_catalog_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), RachunekError> {
    let entries = fs::read_dir(dir).map_err(|e| RachunekError::io(dir, e))?;
    for entry in entries {
        let path = entry.map_err(|e| RachunekError::io(dir, e))?.path();
        if path.is_dir() {
            collect_catalog_files(&path, out)?;
        } else if is_catalog_file(&path) {
            out.push(path);
        }
    }
    Ok(())
}

fn is_catalog_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| CATALOG_EXTENSIONS.contains(&ext))
}

fn language_for_path(path: &Path) -> Result<LanguageTag, RachunekError> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .and_then(|stem| stem.rsplit('.').next())
        .filter(|tag| !tag.trim().is_empty())
        .map(LanguageTag::new)
        .ok_or_else(|| {
            RachunekError::Catalog(format!(
                "{}: cannot derive a language tag from the file name",
                path.display()
            ))
        })
}

const CATALOG_EN: &[(&str, &str)] = &[
    ("invoice", "invoice"),
    ("date", "date"),
    ("invoiceNumber", "invoice number"),
    ("billTo", "bill to"),
    ("seller", "seller"),
    ("vatNumber", "VAT number"),
    ("name", "name"),
    ("tax", "tax"),
    ("amount", "amount"),
    ("total", "total"),
    ("payment", "payment"),
    ("bankTransfer", "bank transfer"),
    ("accountNumber", "account number"),
    ("dueDate", "due date"),
];

const CATALOG_PL: &[(&str, &str)] = &[
    ("invoice", "faktura"),
    ("date", "data wystawienia"),
    ("invoiceNumber", "numer faktury"),
    ("billTo", "nabywca"),
    ("seller", "sprzedawca"),
    ("vatNumber", "NIP"),
    ("name", "nazwa"),
    ("tax", "VAT"),
    ("amount", "kwota"),
    ("total", "razem"),
    ("payment", "płatność"),
    ("bankTransfer", "przelew bankowy"),
    ("accountNumber", "numer konta"),
    ("dueDate", "termin płatności"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_from_file_name() {
        assert_eq!(
            language_for_path(Path::new("i18n/en.yaml")).unwrap(),
            LanguageTag::new("en")
        );
        assert_eq!(
            language_for_path(Path::new("i18n/active.PL.yaml")).unwrap(),
            LanguageTag::new("pl")
        );
    }

    #[test]
    fn only_yaml_files_count() {
        assert!(is_catalog_file(Path::new("en.yaml")));
        assert!(is_catalog_file(Path::new("en.yml")));
        assert!(!is_catalog_file(Path::new("en.json")));
        assert!(!is_catalog_file(Path::new("README")));
    }

    #[test]
    fn builtin_catalogs_share_keys() {
        let en: Vec<_> = CATALOG_EN.iter().map(|(k, _)| *k).collect();
        let pl: Vec<_> = CATALOG_PL.iter().map(|(k, _)| *k).collect();
        assert_eq!(en, pl);
    }

    #[test]
    fn fallback_to_default_language() {
        let catalog = Catalog::new()
            .with_messages("en", [("total", "total")])
            .with_messages("pl", [("invoice", "faktura")]);
        assert_eq!(catalog.lookup("invoice", &"pl".into()), Some("faktura"));
        assert_eq!(catalog.lookup("total", &"pl".into()), Some("total"));
        assert_eq!(catalog.lookup("total", &"de".into()), Some("total"));
        assert_eq!(catalog.lookup("nope", &"pl".into()), None);
    }

    #[test]
    fn fallback_can_be_disabled() {
        let catalog = Catalog::new()
            .with_messages("en", [("total", "total")])
            .without_fallback();
        assert_eq!(catalog.lookup("total", &"pl".into()), None);
        assert_eq!(catalog.lookup("total", &"en".into()), Some("total"));
    }

    #[test]
    fn add_yaml_rejects_nested_maps() {
        let mut catalog = Catalog::new();
        let err = catalog.add_yaml("en", "invoice:\n  other: invoice\n").unwrap_err();
        assert!(matches!(err, RachunekError::Catalog(_)));
    }

    #[test]
    fn add_yaml_accepts_empty_file() {
        let mut catalog = Catalog::new();
        catalog.add_yaml("en", "\n").unwrap();
        assert!(catalog.is_empty());
    }
}
