//! Locale completeness validation.
//!
//! The default locale is the completeness baseline: every key a package ships
//! in another locale must also exist in the default locale, otherwise the
//! fallback chain has nothing to land on. Translations are also checked for
//! placeholder parity with their default-locale template, since a dropped
//! `{{name}}` silently loses information in the rendered message.

use crate::i18n::interpolate::placeholders;
use crate::i18n::locale::LocaleTag;
use crate::i18n::namespace::Namespace;

/// Validation report containing errors and warnings about a namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Keys that cannot fall back to the default locale
    pub errors: Vec<String>,

    /// Non-critical issues such as placeholder mismatches
    pub warnings: Vec<String>,
}

impl ValidationReport {
    /// Create a new empty validation report
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Check if the report is clean (no errors or warnings)
    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Validator for namespace completeness.
pub struct LocaleValidator;

impl LocaleValidator {
    /// Validate every non-default locale against `default`.
    ///
    /// # Arguments
    /// * `namespace` - The merged namespace to inspect
    /// * `default` - The completeness baseline locale
    ///
    /// # Returns
    /// A `ValidationReport`; findings are ordered by locale, then key.
    pub fn validate(namespace: &Namespace, default: &LocaleTag) -> ValidationReport {
        let mut report = ValidationReport::new();

        for locale in namespace.locales() {
            if locale == default {
                continue;
            }

            for key in namespace.keys(locale) {
                let Some(baseline) = namespace.lookup(default, key) else {
                    report.errors.push(format!(
                        "Key '{}' is registered for locale '{}' but missing from default locale '{}'",
                        key, locale, default
                    ));
                    continue;
                };

                let Some(translated) = namespace.lookup(locale, key) else {
                    continue;
                };

                let expected = placeholders(baseline);
                let actual = placeholders(translated);
                if expected != actual {
                    report.warnings.push(format!(
                        "Placeholder mismatch for '{}' in locale '{}': default has {:?}, translation has {:?}",
                        key, locale, expected, actual
                    ));
                }
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::namespace::LocaleModule;

    fn namespace_with(module: LocaleModule) -> Namespace {
        let mut namespace = Namespace::new();
        namespace.register(&module).expect("Should register");
        namespace
    }

    // ==================== ValidationReport Tests ====================

    #[test]
    fn test_report_new_is_clean() {
        let report = ValidationReport::new();
        assert!(report.is_clean());
        assert!(!report.has_errors());
        assert!(!report.has_warnings());
    }

    #[test]
    fn test_report_with_warning_only() {
        let mut report = ValidationReport::default();
        report.warnings.push("w".to_string());
        assert!(!report.is_clean());
        assert!(!report.has_errors());
    }

    // ==================== Completeness Tests ====================

    #[test]
    fn test_complete_namespace_is_clean() {
        let namespace = namespace_with(
            LocaleModule::new("secrets")
                .with_entry("en", "secrets.error.required", "Required secret '{{key}}' is not set.")
                .with_entry("es", "secrets.error.required", "El secreto '{{key}}' no está definido."),
        );

        let report = LocaleValidator::validate(&namespace, &LocaleTag::default_locale());
        assert!(report.is_clean(), "{:?}", report);
    }

    #[test]
    fn test_key_missing_from_default_is_error() {
        let namespace = namespace_with(
            LocaleModule::new("push")
                .with_entry("en", "push.error.denied", "Denied")
                .with_entry("fr", "push.error.denied", "Refusé")
                .with_entry("fr", "push.error.expired", "Expiré"),
        );

        let report = LocaleValidator::validate(&namespace, &LocaleTag::default_locale());
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("push.error.expired"));
        assert!(report.errors[0].contains("'fr'"));
    }

    #[test]
    fn test_placeholder_mismatch_is_warning() {
        let namespace = namespace_with(
            LocaleModule::new("queue")
                .with_entry("en", "queue.error.full", "Queue '{{name}}' is full")
                .with_entry("de", "queue.error.full", "Warteschlange ist voll"),
        );

        let report = LocaleValidator::validate(&namespace, &LocaleTag::default_locale());
        assert!(!report.has_errors());
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("queue.error.full"));
    }

    #[test]
    fn test_default_only_namespace_is_clean() {
        let namespace = namespace_with(LocaleModule::new("a").with_entry("en", "a.b.c", "x"));
        assert!(LocaleValidator::validate(&namespace, &LocaleTag::default_locale()).is_clean());
    }

    #[test]
    fn test_empty_namespace_is_clean() {
        let report = LocaleValidator::validate(&Namespace::new(), &LocaleTag::default_locale());
        assert!(report.is_clean());
    }
}
