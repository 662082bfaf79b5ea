//! Guard layer for capability entry points.
//!
//! Soft-fail facades resolve their provider through `resolve`, hard-fail ones
//! through `resolve_required`. The outcome for an unbound capability follows
//! its declared `UnboundPolicy`:
//!
//! - `HardFail`: unbound → `ConfigurationError` with `<capability>.error.noProvider`
//! - `SoftFail`: unbound → one localized warning through the logging
//!   capability, then `Ok(None)` so the facade returns its neutral result

use crate::capabilities::logger::{self, LogLevel};
use crate::error::{ConfigurationError, UnsupportedOperationError};
use crate::i18n::{no_provider_key, unbound_warning_key, unsupported_key, Params, Translator};
use crate::provider::{Capability, ProviderRegistry};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// What a guarded operation does when its capability is unbound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnboundPolicy {
    /// Raise a `ConfigurationError`
    HardFail,

    /// Warn and return a neutral result
    SoftFail,
}

/// Resolve the provider for `C` from the global registry and translator.
///
/// # Arguments
/// * `operation` - Operation name, used in the soft-fail warning
///
/// # Returns
/// * `Ok(Some(provider))` when bound
/// * `Ok(None)` when unbound and `C` is soft-fail
/// * `Err(ConfigurationError)` when unbound and `C` is hard-fail
pub fn resolve<C: Capability>(
    operation: &str,
) -> Result<Option<Arc<C::Provider>>, ConfigurationError> {
    resolve_in::<C>(ProviderRegistry::global(), Translator::global(), operation)
}

/// `resolve` against an explicit registry and translator.
pub fn resolve_in<C: Capability>(
    registry: &ProviderRegistry,
    translator: &Translator,
    operation: &str,
) -> Result<Option<Arc<C::Provider>>, ConfigurationError> {
    if let Some(provider) = registry.get_provider::<C>() {
        return Ok(Some(provider));
    }

    match C::POLICY {
        UnboundPolicy::HardFail => Err(unbound_error_in::<C>(translator, operation)),
        UnboundPolicy::SoftFail => {
            let params = Params::new().with("operation", operation);
            let message = translator.translate(&unbound_warning_key(C::NAME), Some(&params), None);
            logger::write_in(registry, translator, LogLevel::Warn, &message);
            Ok(None)
        }
    }
}

/// Resolve the provider of a hard-fail capability.
///
/// Unlike `resolve` there is no neutral-result case: unbound is always a
/// `ConfigurationError`.
pub fn resolve_required<C: Capability>(operation: &str) -> Result<Arc<C::Provider>, ConfigurationError> {
    resolve_required_in::<C>(ProviderRegistry::global(), Translator::global(), operation)
}

/// `resolve_required` against an explicit registry and translator.
pub fn resolve_required_in<C: Capability>(
    registry: &ProviderRegistry,
    translator: &Translator,
    operation: &str,
) -> Result<Arc<C::Provider>, ConfigurationError> {
    registry
        .get_provider::<C>()
        .ok_or_else(|| unbound_error_in::<C>(translator, operation))
}

fn unbound_error_in<C: Capability>(translator: &Translator, operation: &str) -> ConfigurationError {
    debug!(capability = C::NAME, operation, "Capability invoked while unbound");
    no_provider_error_in::<C>(translator)
}

/// Resolve the provider for `C`, failing when unbound regardless of policy.
pub fn require<C: Capability>() -> Result<Arc<C::Provider>, ConfigurationError> {
    ProviderRegistry::global()
        .get_provider::<C>()
        .ok_or_else(|| no_provider_error_in::<C>(Translator::global()))
}

/// The localized "no provider" error for `C`.
pub fn no_provider_error_in<C: Capability>(translator: &Translator) -> ConfigurationError {
    let key = no_provider_key(C::NAME);
    let message = translator.translate(&key, None, None);
    ConfigurationError::new(C::NAME, key, message)
}

/// The localized error for an optional operation the bound provider lacks.
pub fn unsupported<C: Capability>(operation: &'static str) -> UnsupportedOperationError {
    unsupported_in::<C>(Translator::global(), operation)
}

pub fn unsupported_in<C: Capability>(
    translator: &Translator,
    operation: &'static str,
) -> UnsupportedOperationError {
    let message = translator.translate(&unsupported_key(C::NAME, operation), None, None);
    UnsupportedOperationError {
        capability: C::NAME,
        operation,
        message,
    }
}
