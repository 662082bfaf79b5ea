//! Translation facade: locale resolution plus interpolation.
//!
//! `Translator` owns a `Namespace`, the process-wide current locale and the
//! default locale. It can be used as an explicit context object, and a global
//! instance (pre-loaded with the built-in strings) backs the free functions
//! `t`, `t_with`, `t_in` and `register_locale_module`.
//!
//! Resolved text is never cached. Every call reads the live namespace, so a
//! module registered after start-up is visible to the next lookup.

use crate::error::{Error, InvalidKeyError, InvalidLocaleError};
use crate::i18n::interpolate::{interpolate, Params};
use crate::i18n::key::is_valid_key;
use crate::i18n::locale::{fallback_chain, LocaleTag};
use crate::i18n::metrics::TranslationMetrics;
use crate::i18n::namespace::{LocaleModule, Namespace, RegistrationSummary};
use crate::i18n::strings::core_locale_module;
use crate::i18n::validator::{LocaleValidator, ValidationReport};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, OnceLock, PoisonError, RwLock};
use tracing::{debug, error, warn};

pub struct Translator {
    namespace: RwLock<Namespace>,
    current_locale: RwLock<LocaleTag>,
    default_locale: LocaleTag,
    sealed: AtomicBool,

    /// Bumped on every registration that inserts entries
    generation: AtomicU64,

    metrics: Arc<TranslationMetrics>,
}

/// Global translator instance (initialized lazily)
static TRANSLATOR: OnceLock<Translator> = OnceLock::new();

impl Translator {
    /// Empty translator using `DEFAULT_LOCALE` as default and current locale.
    pub fn new() -> Self {
        Self::with_default_locale(LocaleTag::default_locale())
    }

    pub fn with_default_locale(default_locale: LocaleTag) -> Self {
        Self {
            namespace: RwLock::new(Namespace::new()),
            current_locale: RwLock::new(default_locale.clone()),
            default_locale,
            sealed: AtomicBool::new(false),
            generation: AtomicU64::new(0),
            metrics: Arc::new(TranslationMetrics::new()),
        }
    }

    /// Record lookups into `metrics` instead of this translator's own counters.
    pub fn with_metrics(mut self, metrics: Arc<TranslationMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Lookup counters of this translator.
    pub fn metrics(&self) -> &TranslationMetrics {
        &self.metrics
    }

    /// Get the global translator, with the built-in strings registered.
    pub fn global() -> &'static Translator {
        TRANSLATOR.get_or_init(|| {
            let translator = Translator::new().with_metrics(Arc::clone(TranslationMetrics::global_handle()));
            if let Err(e) = translator.register_locale_module(&core_locale_module()) {
                error!("Built-in locale module failed to register: {}", e);
            }
            translator
        })
    }

    pub fn default_locale(&self) -> &LocaleTag {
        &self.default_locale
    }

    /// The locale used when no explicit locale is requested.
    pub fn current_locale(&self) -> LocaleTag {
        self.current_locale
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn set_current_locale(&self, locale: LocaleTag) {
        debug!(locale = %locale, "Current locale changed");
        *self
            .current_locale
            .write()
            .unwrap_or_else(PoisonError::into_inner) = locale;
    }

    /// Merge a locale module into this translator's namespace.
    ///
    /// Registration after `seal()` is accepted but logged, because text
    /// rendered before the registration may be stale in any caller-side cache.
    pub fn register_locale_module(
        &self,
        module: &LocaleModule,
    ) -> Result<RegistrationSummary, Error> {
        let summary = self
            .namespace
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .register(module)?;

        if summary.inserted > 0 {
            let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
            if self.is_sealed() {
                warn!(
                    package = %summary.package,
                    inserted = summary.inserted,
                    generation,
                    "Locale module registered after initialization; previously rendered text may be stale"
                );
            }
        }

        Ok(summary)
    }

    /// Mark the end of the registration phase.
    pub fn seal(&self) {
        self.sealed.store(true, Ordering::Release);
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed.load(Ordering::Acquire)
    }

    /// Number of registrations that changed the namespace so far.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Find the template for `key`, walking the fallback chain.
    ///
    /// # Returns
    /// The locale the template was found in and the raw template, or `None`.
    pub fn resolve_template(&self, key: &str, locale: Option<&LocaleTag>) -> Option<(LocaleTag, String)> {
        let requested = match locale {
            Some(locale) => locale.clone(),
            None => self.current_locale(),
        };

        let namespace = self.namespace.read().unwrap_or_else(PoisonError::into_inner);
        fallback_chain(&requested, &self.default_locale)
            .into_iter()
            .find_map(|candidate| {
                namespace
                    .lookup(&candidate, key)
                    .map(|template| (candidate.clone(), template.to_string()))
            })
    }

    /// Translate `key`, degrading to the raw key when nothing is found.
    ///
    /// # Arguments
    /// * `key` - A `<capability>.<category>.<name>` key
    /// * `params` - Values for `{{name}}` placeholders
    /// * `locale` - Requested locale; the current locale when `None`
    pub fn translate(&self, key: &str, params: Option<&Params>, locale: Option<&LocaleTag>) -> String {
        match self.try_translate(key, params, locale) {
            Ok(text) => text,
            Err(e) => {
                warn!("{}", e);
                self.metrics.record_miss();
                key.to_string()
            }
        }
    }

    /// Like `translate`, but rejects malformed keys instead of echoing them.
    pub fn try_translate(
        &self,
        key: &str,
        params: Option<&Params>,
        locale: Option<&LocaleTag>,
    ) -> Result<String, InvalidKeyError> {
        if !is_valid_key(key) {
            return Err(InvalidKeyError(key.to_string()));
        }

        let requested = match locale {
            Some(locale) => locale.clone(),
            None => self.current_locale(),
        };
        let metrics = &self.metrics;

        match self.resolve_template(key, Some(&requested)) {
            Some((found, template)) => {
                if found == requested {
                    metrics.record_exact_hit();
                } else {
                    metrics.record_fallback_hit();
                    debug!(key, requested = %requested, resolved = %found, "Translation fallback");
                }
                Ok(match params {
                    Some(params) => interpolate(&template, params),
                    None => template,
                })
            }
            None => {
                metrics.record_miss();
                debug!(key, requested = %requested, "No translation found, using raw key");
                Ok(key.to_string())
            }
        }
    }

    /// Check the namespace against the default locale.
    pub fn validate(&self) -> ValidationReport {
        let namespace = self.namespace.read().unwrap_or_else(PoisonError::into_inner);
        LocaleValidator::validate(&namespace, &self.default_locale)
    }

    /// Total number of (locale, key) entries.
    pub fn len(&self) -> usize {
        self.namespace
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for Translator {
    fn default() -> Self {
        Self::new()
    }
}

/// Translate `key` in the current locale.
pub fn t(key: &str) -> String {
    Translator::global().translate(key, None, None)
}

/// Translate `key` in the current locale with interpolation parameters.
pub fn t_with(key: &str, params: &Params) -> String {
    Translator::global().translate(key, Some(params), None)
}

/// Translate `key` in an explicit locale.
///
/// An unparseable locale falls back to the current locale.
pub fn t_in(locale: &str, key: &str, params: &Params) -> String {
    let translator = Translator::global();
    match LocaleTag::parse(locale) {
        Ok(locale) => translator.translate(key, Some(params), Some(&locale)),
        Err(e) => {
            warn!("{}", e);
            translator.translate(key, Some(params), None)
        }
    }
}

/// Register a locale module with the global translator.
pub fn register_locale_module(module: &LocaleModule) -> Result<RegistrationSummary, Error> {
    Translator::global().register_locale_module(module)
}

/// Set the global current locale.
pub fn set_locale(locale: &str) -> Result<(), InvalidLocaleError> {
    Translator::global().set_current_locale(LocaleTag::parse(locale)?);
    Ok(())
}

/// The global current locale.
pub fn current_locale() -> LocaleTag {
    Translator::global().current_locale()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn locale(tag: &str) -> LocaleTag {
        LocaleTag::parse(tag).unwrap()
    }

    fn translator_with(module: LocaleModule) -> Translator {
        let translator = Translator::new();
        translator.register_locale_module(&module).expect("Should register");
        translator
    }

    // ==================== Resolution Tests ====================

    #[test]
    fn test_exact_locale_wins() {
        let translator = translator_with(
            LocaleModule::new("t")
                .with_entry("en", "a.b.c", "English")
                .with_entry("zh-TW", "a.b.c", "繁體")
                .with_entry("zh", "a.b.c", "中文"),
        );
        assert_eq!(translator.translate("a.b.c", None, Some(&locale("zh-TW"))), "繁體");
    }

    #[test]
    fn test_falls_back_to_language_subtag() {
        let translator = translator_with(
            LocaleModule::new("t")
                .with_entry("en", "a.b.c", "English")
                .with_entry("zh", "a.b.c", "中文"),
        );
        assert_eq!(translator.translate("a.b.c", None, Some(&locale("zh-TW"))), "中文");
    }

    #[test]
    fn test_falls_back_to_default_locale() {
        let translator = translator_with(LocaleModule::new("t").with_entry("en", "a.b.c", "English"));
        assert_eq!(translator.translate("a.b.c", None, Some(&locale("zh-TW"))), "English");

        let (found, _) = translator
            .resolve_template("a.b.c", Some(&locale("zh-TW")))
            .expect("Should resolve");
        assert_eq!(found, LocaleTag::default_locale());
    }

    #[test]
    fn test_missing_translation_returns_raw_key() {
        let translator = Translator::new();
        assert_eq!(translator.translate("a.b.missing", None, None), "a.b.missing");
        assert!(translator.resolve_template("a.b.missing", None).is_none());
    }

    #[test]
    fn test_malformed_key_is_echoed_by_translate() {
        let translator = Translator::new();
        assert_eq!(translator.translate("not a key", None, None), "not a key");
        assert!(translator.try_translate("not a key", None, None).is_err());
    }

    #[test]
    fn test_uses_current_locale_when_none_requested() {
        let translator = translator_with(
            LocaleModule::new("t")
                .with_entry("en", "a.b.c", "English")
                .with_entry("es", "a.b.c", "Español"),
        );
        assert_eq!(translator.translate("a.b.c", None, None), "English");

        translator.set_current_locale(locale("es-MX"));
        assert_eq!(translator.translate("a.b.c", None, None), "Español");
        assert_eq!(translator.current_locale(), locale("es-MX"));
    }

    #[test]
    fn test_custom_default_locale() {
        let translator = Translator::with_default_locale(locale("de"));
        translator
            .register_locale_module(&LocaleModule::new("t").with_entry("de", "a.b.c", "Deutsch"))
            .unwrap();
        assert_eq!(translator.translate("a.b.c", None, Some(&locale("fr"))), "Deutsch");
        assert_eq!(translator.default_locale(), &locale("de"));
    }

    // ==================== Metrics Tests ====================

    #[test]
    fn test_lookups_are_counted_by_outcome() {
        let translator = translator_with(
            LocaleModule::new("t")
                .with_entry("en", "a.b.c", "English")
                .with_entry("es", "a.b.c", "Español"),
        );

        assert_eq!(translator.translate("a.b.c", None, Some(&locale("es"))), "Español");
        assert_eq!(translator.translate("a.b.c", None, Some(&locale("zh-TW"))), "English");
        assert_eq!(translator.translate("a.b.missing", None, None), "a.b.missing");
        assert_eq!(translator.translate("not-a-key", None, None), "not-a-key");

        let metrics = translator.metrics();
        assert_eq!(metrics.exact_hits(), 1);
        assert_eq!(metrics.fallback_hits(), 1);
        assert_eq!(metrics.misses(), 2);
        assert_eq!(metrics.lookups(), 4);
    }

    #[test]
    fn test_explicit_translator_has_own_metrics() {
        let translator = translator_with(LocaleModule::new("t").with_entry("en", "a.b.c", "English"));
        translator.translate("a.b.c", None, None);

        assert_eq!(translator.metrics().lookups(), 1);
        assert!(!std::ptr::eq(translator.metrics(), TranslationMetrics::global()));

        let shared = Arc::new(TranslationMetrics::new());
        let attached = Translator::new().with_metrics(Arc::clone(&shared));
        attached.translate("a.b.c", None, None);
        assert_eq!(shared.misses(), 1);
    }

    #[test]
    #[serial]
    fn test_global_translator_records_global_metrics() {
        set_locale("en").unwrap();
        let metrics = TranslationMetrics::global();
        let (exact, fallback, misses) = (metrics.exact_hits(), metrics.fallback_hits(), metrics.misses());

        t("cache.error.noProvider");
        t_in("zh-TW", "cache.error.noProvider", &Params::new());
        t("nothing.error.registered");

        // Unserialized tests may also translate through the global instance
        assert!(std::ptr::eq(Translator::global().metrics(), metrics));
        assert!(metrics.exact_hits() > exact);
        assert!(metrics.fallback_hits() > fallback);
        assert!(metrics.misses() > misses);
    }

    // ==================== Interpolation Tests ====================

    #[test]
    fn test_translate_interpolates() {
        let translator = translator_with(
            LocaleModule::new("t").with_entry("en", "secrets.error.required", "Required secret '{{key}}' is not set."),
        );
        let params = Params::new().with("key", "API_TOKEN");
        assert_eq!(
            translator.translate("secrets.error.required", Some(&params), None),
            "Required secret 'API_TOKEN' is not set."
        );
    }

    #[test]
    fn test_unmatched_placeholder_passthrough() {
        let translator = translator_with(LocaleModule::new("t").with_entry("en", "job.info.done", "Finished: {{status}}"));
        assert_eq!(
            translator.translate("job.info.done", Some(&Params::new()), None),
            "Finished: {{status}}"
        );
    }

    // ==================== Registration Lifecycle Tests ====================

    #[test]
    fn test_generation_bumps_only_on_insert() {
        let translator = Translator::new();
        let module = LocaleModule::new("t").with_entry("en", "a.b.c", "x");

        translator.register_locale_module(&module).unwrap();
        assert_eq!(translator.generation(), 1);

        translator.register_locale_module(&module).unwrap();
        assert_eq!(translator.generation(), 1);
    }

    #[test]
    fn test_late_registration_is_visible() {
        let translator = Translator::new();
        translator.seal();
        assert!(translator.is_sealed());
        assert_eq!(translator.translate("late.info.loaded", None, None), "late.info.loaded");

        translator
            .register_locale_module(&LocaleModule::new("plugin").with_entry("en", "late.info.loaded", "Loaded"))
            .expect("Late registration still succeeds");
        assert_eq!(translator.translate("late.info.loaded", None, None), "Loaded");
    }

    #[test]
    fn test_conflict_propagates() {
        let translator = translator_with(LocaleModule::new("a").with_entry("en", "a.b.c", "One"));
        let result = translator.register_locale_module(&LocaleModule::new("b").with_entry("en", "a.b.c", "Two"));
        assert!(matches!(result, Err(Error::RegistrationConflict(_))));
        assert_eq!(translator.translate("a.b.c", None, None), "One");
    }

    #[test]
    fn test_validate_reports_missing_default() {
        let translator = translator_with(LocaleModule::new("t").with_entry("fr", "a.b.c", "Français"));
        assert!(translator.validate().has_errors());
        assert_eq!(translator.len(), 1);
        assert!(!translator.is_empty());
    }

    // ==================== Global Facade Tests ====================

    #[test]
    fn test_global_returns_singleton() {
        assert!(std::ptr::eq(Translator::global(), Translator::global()));
    }

    #[test]
    #[serial]
    fn test_global_has_builtin_strings() {
        set_locale("en").unwrap();
        assert_eq!(
            t_with("secrets.error.required", &Params::new().with("key", "API_TOKEN")),
            "Required secret 'API_TOKEN' is not set."
        );
        assert_ne!(t("cache.error.noProvider"), "cache.error.noProvider");
    }

    #[test]
    #[serial]
    fn test_t_in_explicit_locale() {
        set_locale("en").unwrap();
        let params = Params::new().with("key", "DB_URL");
        assert_eq!(
            t_in("es-AR", "secrets.error.required", &params),
            "El secreto obligatorio 'DB_URL' no está definido."
        );
        assert_eq!(
            t_in("not a locale", "secrets.error.required", &params),
            "Required secret 'DB_URL' is not set."
        );
    }

    #[test]
    #[serial]
    fn test_set_locale_rejects_invalid() {
        assert!(set_locale("klingon-empire").is_err());
        set_locale("es").unwrap();
        assert_eq!(current_locale(), locale("es"));
        set_locale("en").unwrap();
    }

    #[test]
    #[serial]
    fn test_global_register_locale_module() {
        set_locale("en").unwrap();
        register_locale_module(
            &LocaleModule::new("translator-tests").with_entry("en", "translatortest.info.hello", "Hello {{name}}"),
        )
        .expect("Should register");
        assert_eq!(
            t_with("translatortest.info.hello", &Params::new().with("name", "Ada")),
            "Hello Ada"
        );
    }
}
