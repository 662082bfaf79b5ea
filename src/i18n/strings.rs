//! Messages the core itself reports, registered under package "core".
//!
//! Provider packages ship their own locale modules; these tables only cover
//! the guard layer's configuration errors, unbound warnings and unsupported
//! operation errors for the bundled capabilities.

use crate::i18n::namespace::LocaleModule;

/// Package name used for the built-in module.
pub const CORE_PACKAGE: &str = "core";

// ==================== English Strings ====================

/// English strings (default locale)
pub const ENGLISH_STRINGS: &[(&str, &str)] = &[
    // Logger
    (
        "logger.warning.noProvider",
        "No logger provider is bound; messages are written to the built-in log output.",
    ),
    // Cache
    (
        "cache.error.noProvider",
        "No cache provider is configured. Bind a provider for 'cache' before using it.",
    ),
    // Storage
    (
        "storage.error.noProvider",
        "No storage provider is configured. Bind a provider for 'storage' before using it.",
    ),
    (
        "storage.error.signedUrlNotSupported",
        "The configured storage provider does not support signed URLs.",
    ),
    // Secrets
    (
        "secrets.error.noProvider",
        "No secrets provider is configured. Bind a provider for 'secrets' before using it.",
    ),
    ("secrets.error.required", "Required secret '{{key}}' is not set."),
    // Queue
    (
        "queue.error.noProvider",
        "No queue provider is configured. Bind a provider for 'queue' before using it.",
    ),
    (
        "queue.error.sendBatchNotSupported",
        "The configured queue provider does not support batch sending.",
    ),
    // Email
    (
        "email.error.noProvider",
        "No email provider is configured. Bind a provider for 'email' before using it.",
    ),
    // Analytics
    (
        "analytics.warning.noProvider",
        "No analytics provider is bound; '{{operation}}' was skipped.",
    ),
    // Push
    (
        "push.warning.noProvider",
        "No push provider is bound; '{{operation}}' was skipped.",
    ),
];

// ==================== Spanish Strings ====================

/// Spanish strings
pub const SPANISH_STRINGS: &[(&str, &str)] = &[
    (
        "logger.warning.noProvider",
        "No hay un proveedor de registro configurado; los mensajes se escriben en la salida integrada.",
    ),
    (
        "cache.error.noProvider",
        "No hay un proveedor de caché configurado. Asigna un proveedor a 'cache' antes de usarlo.",
    ),
    (
        "storage.error.noProvider",
        "No hay un proveedor de almacenamiento configurado. Asigna un proveedor a 'storage' antes de usarlo.",
    ),
    (
        "storage.error.signedUrlNotSupported",
        "El proveedor de almacenamiento configurado no admite URL firmadas.",
    ),
    (
        "secrets.error.noProvider",
        "No hay un proveedor de secretos configurado. Asigna un proveedor a 'secrets' antes de usarlo.",
    ),
    ("secrets.error.required", "El secreto obligatorio '{{key}}' no está definido."),
    (
        "queue.error.noProvider",
        "No hay un proveedor de colas configurado. Asigna un proveedor a 'queue' antes de usarlo.",
    ),
    (
        "queue.error.sendBatchNotSupported",
        "El proveedor de colas configurado no admite envíos por lotes.",
    ),
    (
        "email.error.noProvider",
        "No hay un proveedor de correo configurado. Asigna un proveedor a 'email' antes de usarlo.",
    ),
    (
        "analytics.warning.noProvider",
        "No hay un proveedor de analítica configurado; se omitió '{{operation}}'.",
    ),
    (
        "push.warning.noProvider",
        "No hay un proveedor de notificaciones configurado; se omitió '{{operation}}'.",
    ),
];

/// The built-in locale module.
pub fn core_locale_module() -> LocaleModule {
    LocaleModule::new(CORE_PACKAGE)
        .with_locale("en", ENGLISH_STRINGS.iter().copied())
        .with_locale("es", SPANISH_STRINGS.iter().copied())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::locale::LocaleTag;
    use crate::i18n::namespace::Namespace;
    use crate::i18n::validator::LocaleValidator;

    #[test]
    fn test_core_module_registers_cleanly() {
        let mut namespace = Namespace::new();
        let summary = namespace
            .register(&core_locale_module())
            .expect("Built-in strings must not conflict");
        assert_eq!(summary.inserted, ENGLISH_STRINGS.len() + SPANISH_STRINGS.len());
    }

    #[test]
    fn test_core_module_is_complete_and_consistent() {
        let mut namespace = Namespace::new();
        namespace.register(&core_locale_module()).unwrap();

        let report = LocaleValidator::validate(&namespace, &LocaleTag::default_locale());
        assert!(report.is_clean(), "{:?}", report);
    }

    #[test]
    fn test_spanish_covers_every_english_key() {
        for (key, _) in ENGLISH_STRINGS {
            assert!(
                SPANISH_STRINGS.iter().any(|(k, _)| k == key),
                "Missing Spanish string for {}",
                key
            );
        }
    }

    #[test]
    fn test_required_secret_template() {
        let template = ENGLISH_STRINGS
            .iter()
            .find(|(key, _)| *key == "secrets.error.required")
            .map(|(_, template)| *template);
        assert_eq!(template, Some("Required secret '{{key}}' is not set."));
    }

    #[test]
    fn test_soft_fail_warnings_mention_operation() {
        for key in ["analytics.warning.noProvider", "push.warning.noProvider"] {
            let (_, template) = ENGLISH_STRINGS.iter().find(|(k, _)| *k == key).unwrap();
            assert!(template.contains("{{operation}}"));
        }
    }
}
