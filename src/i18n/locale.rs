//! Locale tags and fallback chains.
//!
//! A `LocaleTag` is a validated, normalized `language[-region]` tag. Tags are
//! normalized on parse so that "zh_tw", "ZH-tw" and "zh-TW" all address the
//! same namespace bucket.

use crate::error::InvalidLocaleError;
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// The completeness baseline every other locale falls back to.
pub const DEFAULT_LOCALE: &str = "en";

static LOCALE_REGEX: OnceLock<Regex> = OnceLock::new();

fn locale_regex() -> &'static Regex {
    LOCALE_REGEX.get_or_init(|| {
        Regex::new(r"^([A-Za-z]{2,3})(?:[-_]([A-Za-z]{2}|[0-9]{3}|[A-Za-z]{4}))?$")
            .expect("locale pattern is valid")
    })
}

/// A validated locale tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocaleTag {
    /// Lowercase language subtag (e.g., "zh")
    language: String,

    /// Normalized region or script subtag (e.g., "TW", "Hant", "419")
    region: Option<String>,
}

impl LocaleTag {
    /// Parse and normalize a locale tag.
    ///
    /// # Arguments
    /// * `tag` - A tag such as "en", "zh-TW" or "pt_br"
    ///
    /// # Returns
    /// * `Ok(LocaleTag)` with the language lowercased and the region uppercased
    /// * `Err(InvalidLocaleError)` if the tag is not `language[-region]`
    pub fn parse(tag: &str) -> Result<Self, InvalidLocaleError> {
        let caps = locale_regex()
            .captures(tag.trim())
            .ok_or_else(|| InvalidLocaleError(tag.to_string()))?;

        let language = caps[1].to_ascii_lowercase();
        let region = caps.get(2).map(|m| normalize_region(m.as_str()));

        Ok(Self { language, region })
    }

    /// The default locale (`DEFAULT_LOCALE`).
    pub fn default_locale() -> Self {
        Self {
            language: DEFAULT_LOCALE.to_string(),
            region: None,
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// The bare language tag, or `None` if this tag has no region.
    pub fn language_only(&self) -> Option<LocaleTag> {
        self.region.as_ref().map(|_| LocaleTag {
            language: self.language.clone(),
            region: None,
        })
    }
}

fn normalize_region(region: &str) -> String {
    match region.len() {
        2 => region.to_ascii_uppercase(),
        4 => {
            let lower = region.to_ascii_lowercase();
            let mut chars = lower.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => lower,
            }
        }
        _ => region.to_string(),
    }
}

impl fmt::Display for LocaleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.region {
            Some(region) => write!(f, "{}-{}", self.language, region),
            None => f.write_str(&self.language),
        }
    }
}

impl FromStr for LocaleTag {
    type Err = InvalidLocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Default for LocaleTag {
    fn default() -> Self {
        Self::default_locale()
    }
}

/// Compute the ordered list of locales to try for a lookup.
///
/// The chain is: the requested locale, its bare language subtag, then the
/// default locale. Duplicates are removed while preserving order.
pub fn fallback_chain(requested: &LocaleTag, default: &LocaleTag) -> Vec<LocaleTag> {
    let mut chain = Vec::with_capacity(3);
    let candidates = [
        Some(requested.clone()),
        requested.language_only(),
        Some(default.clone()),
    ];

    for candidate in candidates.into_iter().flatten() {
        if !chain.contains(&candidate) {
            chain.push(candidate);
        }
    }

    chain
}
