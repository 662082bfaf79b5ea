//! Translation keys of the form `<capability>.<category>.<name>`.

use crate::error::InvalidKeyError;
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

static KEY_REGEX: OnceLock<Regex> = OnceLock::new();

fn key_regex() -> &'static Regex {
    KEY_REGEX.get_or_init(|| {
        Regex::new(r"^([A-Za-z0-9_-]+)\.([A-Za-z0-9_-]+)\.([A-Za-z0-9_-]+)$")
            .expect("key pattern is valid")
    })
}

/// A validated translation key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TranslationKey {
    raw: String,
    capability_end: usize,
    category_end: usize,
}

impl TranslationKey {
    pub fn parse(key: &str) -> Result<Self, InvalidKeyError> {
        let caps = key_regex()
            .captures(key)
            .ok_or_else(|| InvalidKeyError(key.to_string()))?;

        let capability_end = caps[1].len();
        let category_end = capability_end + 1 + caps[2].len();

        Ok(Self {
            raw: key.to_string(),
            capability_end,
            category_end,
        })
    }

    /// Build a key from its three segments.
    pub fn compose(capability: &str, category: &str, name: &str) -> Result<Self, InvalidKeyError> {
        Self::parse(&format!("{capability}.{category}.{name}"))
    }

    pub fn capability(&self) -> &str {
        &self.raw[..self.capability_end]
    }

    pub fn category(&self) -> &str {
        &self.raw[self.capability_end + 1..self.category_end]
    }

    pub fn name(&self) -> &str {
        &self.raw[self.category_end + 1..]
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for TranslationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Check a key without allocating a `TranslationKey`.
pub fn is_valid_key(key: &str) -> bool {
    key_regex().is_match(key)
}

/// `"<capability>.error.noProvider"`
pub fn no_provider_key(capability: &str) -> String {
    format!("{capability}.error.noProvider")
}

/// `"<capability>.warning.noProvider"`
pub fn unbound_warning_key(capability: &str) -> String {
    format!("{capability}.warning.noProvider")
}

/// `"<capability>.error.<operation>NotSupported"`
pub fn unsupported_key(capability: &str, operation: &str) -> String {
    format!("{capability}.error.{operation}NotSupported")
}
