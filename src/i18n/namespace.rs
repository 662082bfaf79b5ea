//! Locale modules and the merged translation namespace.
//!
//! Every package contributes a `LocaleModule` (locale → key → template). The
//! `Namespace` merges them: new entries are inserted, identical re-registrations
//! are no-ops and differing templates for the same (locale, key) are rejected.

use crate::error::{Error, RegistrationConflictError};
use crate::i18n::key::TranslationKey;
use crate::i18n::locale::LocaleTag;
use anyhow::{Context, Result as AnyResult};
use serde::Deserialize;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Translations contributed by one package.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LocaleModule {
    package: String,
    locales: BTreeMap<String, BTreeMap<String, String>>,
}

impl LocaleModule {
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            locales: BTreeMap::new(),
        }
    }

    /// Add a single entry, builder style.
    pub fn with_entry(
        mut self,
        locale: impl Into<String>,
        key: impl Into<String>,
        template: impl Into<String>,
    ) -> Self {
        self.locales
            .entry(locale.into())
            .or_default()
            .insert(key.into(), template.into());
        self
    }

    /// Add a batch of entries for one locale, builder style.
    pub fn with_locale<I, K, V>(mut self, locale: impl Into<String>, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let bucket = self.locales.entry(locale.into()).or_default();
        for (key, template) in entries {
            bucket.insert(key.into(), template.into());
        }
        self
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    /// Locale tags as written by the package, with their entries.
    pub fn locales(&self) -> impl Iterator<Item = (&str, &BTreeMap<String, String>)> {
        self.locales.iter().map(|(locale, entries)| (locale.as_str(), entries))
    }

    pub fn entry_count(&self) -> usize {
        self.locales.values().map(BTreeMap::len).sum()
    }

    /// Parse a module from JSON of the form `{"en": {"key": "template"}, ...}`.
    ///
    /// Keys starting with `@` (metadata) are skipped, as are non-string values.
    pub fn from_json_str(package: impl Into<String>, json: &str) -> AnyResult<Self> {
        let package = package.into();
        let root: Value = serde_json::from_str(json)
            .with_context(|| format!("Failed to parse locale module '{}'", package))?;
        let locales = root
            .as_object()
            .with_context(|| format!("Locale module '{}': root must be an object", package))?;

        let mut module = LocaleModule::new(package);
        for (locale, entries) in locales {
            if locale.starts_with('@') {
                continue;
            }
            let entries = entries.as_object().with_context(|| {
                format!(
                    "Locale module '{}': locale '{}' must map to an object",
                    module.package, locale
                )
            })?;
            let entries = string_entries(&module.package, entries);
            module = module.with_locale(locale.clone(), entries);
        }

        Ok(module)
    }

    /// Load a module from a directory of `<locale>.json` files.
    ///
    /// Each file is a flat `{"key": "template"}` object; the file stem is the
    /// locale tag (e.g., `zh-TW.json` → "zh-TW").
    pub fn from_dir(package: impl Into<String>, dir: &Path) -> AnyResult<Self> {
        let mut module = LocaleModule::new(package);

        if !dir.is_dir() {
            anyhow::bail!("Locale directory not found: {}", dir.display());
        }

        let entries = fs::read_dir(dir)
            .with_context(|| format!("Failed to read locale directory '{}'", dir.display()))?;

        for entry in entries {
            let path = entry.context("Error reading locale directory entry")?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }

            let locale = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .with_context(|| format!("Invalid locale file name: {}", path.display()))?
                .to_string();

            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read '{}'", path.display()))?;
            let json: Value = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON from '{}'", path.display()))?;
            let object = json
                .as_object()
                .with_context(|| format!("Invalid JSON in '{}': root must be an object", path.display()))?;

            let entries = string_entries(&module.package, object);
            module = module.with_locale(locale, entries);
        }

        if module.locales.is_empty() {
            warn!("No locale files found in {}", dir.display());
        }

        Ok(module)
    }
}

fn string_entries(
    package: &str,
    object: &serde_json::Map<String, Value>,
) -> Vec<(String, String)> {
    object
        .iter()
        .filter(|(key, _)| !key.starts_with('@'))
        .filter_map(|(key, value)| match value.as_str() {
            Some(template) => Some((key.clone(), template.to_string())),
            None => {
                warn!("Locale module '{}': value for '{}' is not a string, skipping", package, key);
                None
            }
        })
        .collect()
}

/// Outcome of registering one module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationSummary {
    pub package: String,

    /// Entries that were new to the namespace
    pub inserted: usize,

    /// Entries already present with an identical template
    pub unchanged: usize,
}

#[derive(Debug, Clone)]
struct Entry {
    template: String,
    package: String,
}

/// Merged `(locale, key) → template` table.
#[derive(Debug, Default)]
pub struct Namespace {
    locales: HashMap<LocaleTag, HashMap<String, Entry>>,
}

impl Namespace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a locale module into the namespace.
    ///
    /// The module is validated and checked for conflicts before anything is
    /// inserted, so a rejected module leaves the namespace untouched.
    ///
    /// # Errors
    /// * `Error::InvalidLocale` / `Error::InvalidKey` for malformed tags or keys
    /// * `Error::RegistrationConflict` if a (locale, key) already holds a
    ///   different template, either in the namespace or earlier in the module
    pub fn register(&mut self, module: &LocaleModule) -> Result<RegistrationSummary, Error> {
        let mut staged: HashMap<(LocaleTag, String), &str> = HashMap::new();
        let mut unchanged = 0;

        for (raw_locale, entries) in module.locales() {
            let locale = LocaleTag::parse(raw_locale)?;

            for (key, template) in entries {
                TranslationKey::parse(key)?;

                if let Some(existing) = self.entry(&locale, key) {
                    if existing.template == *template {
                        unchanged += 1;
                        continue;
                    }
                    return Err(conflict(&locale, key, &existing.package, &existing.template, module, template));
                }

                match staged.get(&(locale.clone(), key.clone())) {
                    Some(previous) if *previous != template.as_str() => {
                        return Err(conflict(&locale, key, &module.package, previous, module, template));
                    }
                    Some(_) => unchanged += 1,
                    None => {
                        staged.insert((locale.clone(), key.clone()), template.as_str());
                    }
                }
            }
        }

        let inserted = staged.len();
        for ((locale, key), template) in staged {
            self.locales.entry(locale).or_default().insert(
                key,
                Entry {
                    template: template.to_string(),
                    package: module.package.clone(),
                },
            );
        }

        debug!(
            package = %module.package,
            inserted,
            unchanged,
            "Registered locale module"
        );

        Ok(RegistrationSummary {
            package: module.package.clone(),
            inserted,
            unchanged,
        })
    }

    fn entry(&self, locale: &LocaleTag, key: &str) -> Option<&Entry> {
        self.locales.get(locale).and_then(|entries| entries.get(key))
    }

    /// Template registered for exactly this (locale, key), without fallback.
    pub fn lookup(&self, locale: &LocaleTag, key: &str) -> Option<&str> {
        self.entry(locale, key).map(|entry| entry.template.as_str())
    }

    /// Package that contributed this (locale, key).
    pub fn origin(&self, locale: &LocaleTag, key: &str) -> Option<&str> {
        self.entry(locale, key).map(|entry| entry.package.as_str())
    }

    pub fn has_locale(&self, locale: &LocaleTag) -> bool {
        self.locales.contains_key(locale)
    }

    /// All locales with at least one entry, sorted.
    pub fn locales(&self) -> Vec<&LocaleTag> {
        let mut locales: Vec<_> = self.locales.keys().collect();
        locales.sort();
        locales
    }

    /// All keys registered for `locale`, sorted.
    pub fn keys(&self, locale: &LocaleTag) -> Vec<&str> {
        let mut keys: Vec<&str> = self
            .locales
            .get(locale)
            .map(|entries| entries.keys().map(String::as_str).collect())
            .unwrap_or_default();
        keys.sort_unstable();
        keys
    }

    /// Total number of (locale, key) entries.
    pub fn len(&self) -> usize {
        self.locales.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn conflict(
    locale: &LocaleTag,
    key: &str,
    existing_package: &str,
    existing: &str,
    incoming: &LocaleModule,
    template: &str,
) -> Error {
    RegistrationConflictError {
        locale: locale.to_string(),
        key: key.to_string(),
        existing_package: existing_package.to_string(),
        existing: existing.to_string(),
        incoming_package: incoming.package.clone(),
        incoming: template.to_string(),
    }
    .into()
}
