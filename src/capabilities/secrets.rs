//! Secrets capability (hard-fail).

use crate::error::{ConfigurationError, Result};
use crate::guard::{self, UnboundPolicy};
use crate::i18n::{t_with, Params};
use crate::provider::Capability;

/// Contract for secret stores.
pub trait SecretsProvider: Send + Sync {
    /// The secret's value, or `None` if it is not set.
    fn get(&self, name: &str) -> anyhow::Result<Option<String>>;
}

pub struct Secrets;

impl Capability for Secrets {
    const NAME: &'static str = "secrets";
    const POLICY: UnboundPolicy = UnboundPolicy::HardFail;
    type Provider = dyn SecretsProvider;
}

pub fn get(name: &str) -> Result<Option<String>> {
    let provider = guard::resolve_required::<Secrets>("get")?;
    Ok(provider.get(name)?)
}

/// A secret that must be set and non-empty.
///
/// # Errors
/// `Error::Configuration` with key `secrets.error.required` when the secret is
/// missing or empty, in addition to the usual unbound/provider errors.
pub fn required(name: &str) -> Result<String> {
    match get(name)? {
        Some(value) if !value.is_empty() => Ok(value),
        _ => {
            let key = "secrets.error.required";
            let message = t_with(key, &Params::new().with("key", name));
            Err(ConfigurationError::new(Secrets::NAME, key, message).into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::i18n::{set_locale, t};
    use crate::provider::{reset_provider, set_provider};
    use serial_test::serial;
    use std::collections::HashMap;
    use std::sync::Arc;

    struct StaticSecrets(HashMap<&'static str, &'static str>);

    impl SecretsProvider for StaticSecrets {
        fn get(&self, name: &str) -> anyhow::Result<Option<String>> {
            Ok(self.0.get(name).map(|v| v.to_string()))
        }
    }

    fn bind_static() {
        set_provider::<Secrets>(Arc::new(StaticSecrets(HashMap::from([
            ("DB_URL", "postgres://localhost"),
            ("EMPTY", ""),
        ]))));
    }

    #[test]
    #[serial]
    fn test_required_present() {
        bind_static();
        assert_eq!(required("DB_URL").unwrap(), "postgres://localhost");
        assert_eq!(get("MISSING").unwrap(), None);
        reset_provider::<Secrets>();
    }

    #[test]
    #[serial]
    fn test_required_missing_is_localized_configuration_error() {
        set_locale("en").unwrap();
        bind_static();

        match required("API_TOKEN") {
            Err(Error::Configuration(err)) => {
                assert_eq!(err.key, "secrets.error.required");
                assert_eq!(err.message, "Required secret 'API_TOKEN' is not set.");
            }
            other => panic!("Expected ConfigurationError, got {:?}", other),
        }

        assert!(required("EMPTY").is_err());
        reset_provider::<Secrets>();
    }

    #[test]
    #[serial]
    fn test_unbound_secrets() {
        set_locale("en").unwrap();
        reset_provider::<Secrets>();

        match required("DB_URL") {
            Err(Error::Configuration(err)) => assert_eq!(err.message, t("secrets.error.noProvider")),
            other => panic!("Expected ConfigurationError, got {:?}", other),
        }
    }
}
