use crate::i18n::LocaleTag;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Default tracing directive when `CAPABILITY_KIT_LOG` is not set.
pub const DEFAULT_LOG_DIRECTIVE: &str = "capability_kit=info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    // Locale
    pub locale: LocaleTag,

    // Logging
    pub log_directive: String,

    // Extra locale module loaded at initialization
    pub locales_dir: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let locale = match std::env::var("CAPABILITY_KIT_LOCALE") {
            Ok(tag) => LocaleTag::parse(&tag)
                .with_context(|| format!("CAPABILITY_KIT_LOCALE is not a valid locale tag: '{}'", tag))?,
            Err(_) => LocaleTag::default_locale(),
        };

        Ok(Self {
            locale,

            log_directive: std::env::var("CAPABILITY_KIT_LOG")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_LOG_DIRECTIVE.to_string()),

            locales_dir: std::env::var("CAPABILITY_KIT_LOCALES_DIR")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
        })
    }

    /// Load `.env` (if present), then read the environment.
    pub fn load() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Self::from_env()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: LocaleTag::default_locale(),
            log_directive: DEFAULT_LOG_DIRECTIVE.to_string(),
            locales_dir: None,
        }
    }
}
