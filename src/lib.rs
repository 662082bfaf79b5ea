//! Pluggable capability providers with localized configuration errors.
//!
//! Applications bind one provider per capability (cache, storage, secrets,
//! ...) at start-up and call the capability facades everywhere else. Calling a
//! hard-fail capability with nothing bound returns a `ConfigurationError`
//! whose message is rendered in the current locale; soft-fail capabilities
//! log a localized warning and return a neutral value.
//!
//! ```rust,ignore
//! use capability_kit::capabilities::{cache, Cache};
//! use capability_kit::providers::MemoryCache;
//! use capability_kit::{initialize, Bindings, Config};
//!
//! let config = Config::load()?;
//! capability_kit::init_tracing(&config)?;
//! initialize(&config, Vec::new(), Bindings::new().bind::<Cache>(Arc::new(MemoryCache::new())))?;
//!
//! cache::set("greeting", json!("hola"), None)?;
//! ```

pub mod capabilities;
pub mod config;
pub mod error;
pub mod guard;
pub mod i18n;
pub mod init;
pub mod provider;
pub mod providers;

pub use config::Config;
pub use error::{
    ConfigurationError, Error, InvalidKeyError, InvalidLocaleError, RegistrationConflictError, Result,
    UnsupportedOperationError,
};
pub use guard::UnboundPolicy;
pub use i18n::{set_locale, t, t_in, t_with, LocaleModule, LocaleTag, Params, Translator};
pub use init::{init_tracing, initialize, initialize_in, InitReport};
pub use provider::{
    get_provider, reset_provider, set_provider, Bindings, Capability, ProviderRegistry, ProviderSlot, SlotStatus,
};
