//! Process start-up: tracing, locale modules and provider bindings.

use crate::config::Config;
use crate::i18n::{LocaleModule, RegistrationSummary, Translator, ValidationReport};
use crate::provider::{Bindings, ProviderRegistry};
use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Package name of the module loaded from `Config::locales_dir`.
pub const LOCALES_DIR_PACKAGE: &str = "locales_dir";

/// What `initialize` did.
#[derive(Debug, Clone)]
pub struct InitReport {
    pub registrations: Vec<RegistrationSummary>,
    pub bound_capabilities: Vec<&'static str>,
    pub validation: ValidationReport,
}

/// Install the fmt subscriber with `RUST_LOG` plus the configured directive.
///
/// A second call (or a subscriber installed by the host) is left in place.
pub fn init_tracing(config: &Config) -> Result<()> {
    let directive = config
        .log_directive
        .parse()
        .with_context(|| format!("Invalid log directive '{}'", config.log_directive))?;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive))
        .try_init();

    Ok(())
}

/// Initialize the process-wide registry and translator.
pub fn initialize(config: &Config, modules: Vec<LocaleModule>, bindings: Bindings) -> Result<InitReport> {
    initialize_in(
        ProviderRegistry::global(),
        Translator::global(),
        config,
        modules,
        bindings,
    )
}

/// Initialize a given registry and translator.
///
/// Modules are registered in order and the first conflict aborts before any
/// binding is applied. The translator is sealed on success.
pub fn initialize_in(
    registry: &ProviderRegistry,
    translator: &Translator,
    config: &Config,
    mut modules: Vec<LocaleModule>,
    bindings: Bindings,
) -> Result<InitReport> {
    if let Some(dir) = &config.locales_dir {
        let module = LocaleModule::from_dir(LOCALES_DIR_PACKAGE, dir)
            .with_context(|| format!("Failed to load locales from {}", dir.display()))?;
        modules.push(module);
    }

    let mut registrations = Vec::with_capacity(modules.len());
    for module in &modules {
        let summary = translator
            .register_locale_module(module)
            .with_context(|| format!("Failed to register locale module '{}'", module.package()))?;
        info!(
            package = %summary.package,
            inserted = summary.inserted,
            unchanged = summary.unchanged,
            "Registered locale module"
        );
        registrations.push(summary);
    }

    translator.set_current_locale(config.locale.clone());

    let validation = translator.validate();
    for error in &validation.errors {
        warn!("Locale validation error: {}", error);
    }
    for warning in &validation.warnings {
        warn!("Locale validation warning: {}", warning);
    }

    let bound_capabilities = bindings.capabilities();
    bindings.apply(registry);
    translator.seal();

    info!(
        locale = %config.locale,
        bound = ?bound_capabilities,
        "Capability kit initialized"
    );

    Ok(InitReport {
        registrations,
        bound_capabilities,
        validation,
    })
}
