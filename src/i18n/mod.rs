//! Internationalization (i18n) for capability errors and warnings.
//!
//! Every capability package contributes a locale module; all of them are
//! merged into one namespace and resolved through a single facade.
//!
//! # Architecture
//!
//! - `locale`: Validated `language[-region]` tags and fallback chains
//! - `key`: `<capability>.<category>.<name>` translation keys
//! - `interpolate`: `{{name}}` substitution
//! - `namespace`: Locale modules and the conflict-detecting merger
//! - `translator`: The `t()` facade and the global translator
//! - `strings`: The core's own built-in messages
//! - `validator`: Default-locale completeness checks
//! - `metrics`: Lookup counters
//!
//! # Example
//!
//! ```rust,ignore
//! use capability_kit::i18n::{register_locale_module, t_with, LocaleModule, Params};
//!
//! register_locale_module(
//!     &LocaleModule::new("mailer").with_entry("en", "email.error.bounced", "Bounced: {{address}}"),
//! )?;
//!
//! let text = t_with("email.error.bounced", &Params::new().with("address", "a@b.c"));
//! ```

mod interpolate;
mod key;
mod locale;
mod metrics;
mod namespace;
mod strings;
mod translator;
mod validator;

pub use interpolate::{interpolate, placeholders, Params};
pub use key::{is_valid_key, no_provider_key, unbound_warning_key, unsupported_key, TranslationKey};
pub use locale::{fallback_chain, LocaleTag, DEFAULT_LOCALE};
pub use metrics::{MetricsReport, TranslationMetrics};
pub use namespace::{LocaleModule, Namespace, RegistrationSummary};
pub use strings::{core_locale_module, CORE_PACKAGE, ENGLISH_STRINGS, SPANISH_STRINGS};
pub use translator::{
    current_locale, register_locale_module, set_locale, t, t_in, t_with, Translator,
};
pub use validator::{LocaleValidator, ValidationReport};
