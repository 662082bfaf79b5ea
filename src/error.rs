//! Error taxonomy for capability binding and translation registration.
//!
//! Missing translations have no error type here: a lookup that
//! finds nothing degrades to the raw key instead of failing.

use thiserror::Error;

/// A hard-fail capability was invoked while no provider is bound.
///
/// The message is already localized through the translation facade.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ConfigurationError {
    /// Capability that reported the error (e.g., "cache")
    pub capability: &'static str,

    /// Translation key the message was rendered from
    pub key: String,

    /// Localized, interpolated message
    pub message: String,
}

impl ConfigurationError {
    pub fn new(capability: &'static str, key: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            capability,
            key: key.into(),
            message: message.into(),
        }
    }
}

/// The bound provider does not implement an optional contract operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct UnsupportedOperationError {
    pub capability: &'static str,

    /// Operation name as used in the message key (e.g., "sendBatch")
    pub operation: &'static str,

    pub message: String,
}

/// Two locale modules claim the same (locale, key) with different templates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "conflicting translation for '{key}' in locale '{locale}': package '{incoming_package}' \
     provides {incoming:?} but package '{existing_package}' already registered {existing:?}"
)]
pub struct RegistrationConflictError {
    pub locale: String,
    pub key: String,
    pub existing_package: String,
    pub existing: String,
    pub incoming_package: String,
    pub incoming: String,
}

/// A translation key that is not of the form `<capability>.<category>.<name>`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid translation key '{0}': expected '<capability>.<category>.<name>'")]
pub struct InvalidKeyError(pub String);

/// A locale tag that is not of the form `language[-region]`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid locale tag '{0}': expected 'language[-region]'")]
pub struct InvalidLocaleError(pub String);

/// Umbrella error returned by capability facades and namespace registration.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    UnsupportedOperation(#[from] UnsupportedOperationError),

    #[error(transparent)]
    RegistrationConflict(#[from] RegistrationConflictError),

    #[error(transparent)]
    InvalidKey(#[from] InvalidKeyError),

    #[error(transparent)]
    InvalidLocale(#[from] InvalidLocaleError),

    /// Failure raised inside a bound provider
    #[error(transparent)]
    Provider(#[from] anyhow::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
