//! Logging capability.
//!
//! Unlike the other soft-fail capabilities, an unbound logger cannot report
//! itself through the logging capability. It falls back to a built-in writer
//! (the `tracing` macros) and announces the fallback once per registry, at
//! info level, so a guarded soft-fail call still emits a single warning.

use crate::guard::UnboundPolicy;
use crate::i18n::{unbound_warning_key, Translator};
use crate::provider::{Capability, ProviderRegistry};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

/// Contract for log sinks.
pub trait LoggerProvider: Send + Sync {
    fn log(&self, level: LogLevel, message: &str);

    /// Flush buffered output, if any.
    fn flush(&self) {}
}

pub struct Logger;

impl Capability for Logger {
    const NAME: &'static str = "logger";
    const POLICY: UnboundPolicy = UnboundPolicy::SoftFail;
    type Provider = dyn LoggerProvider;
}

/// Write through the logger bound in `registry`, or the built-in writer.
///
/// The fallback notice is rendered with `translator`.
pub fn write_in(registry: &ProviderRegistry, translator: &Translator, level: LogLevel, message: &str) {
    match registry.get_provider::<Logger>() {
        Some(provider) => provider.log(level, message),
        None => {
            if registry.first_logger_fallback() {
                let notice = translator.translate(&unbound_warning_key(Logger::NAME), None, None);
                builtin_write(LogLevel::Info, &notice);
            }
            builtin_write(level, message);
        }
    }
}

fn builtin_write(level: LogLevel, message: &str) {
    match level {
        LogLevel::Debug => tracing::debug!(target: "capability_kit::logger", "{}", message),
        LogLevel::Info => tracing::info!(target: "capability_kit::logger", "{}", message),
        LogLevel::Warn => tracing::warn!(target: "capability_kit::logger", "{}", message),
        LogLevel::Error => tracing::error!(target: "capability_kit::logger", "{}", message),
    }
}

pub fn log(level: LogLevel, message: &str) {
    write_in(ProviderRegistry::global(), Translator::global(), level, message);
}

pub fn debug(message: &str) {
    log(LogLevel::Debug, message);
}

pub fn info(message: &str) {
    log(LogLevel::Info, message);
}

pub fn warn(message: &str) {
    log(LogLevel::Warn, message);
}

pub fn error(message: &str) {
    log(LogLevel::Error, message);
}

/// Flush the bound logger; a no-op for the built-in writer.
pub fn flush() {
    if let Some(provider) = ProviderRegistry::global().get_provider::<Logger>() {
        provider.flush();
    }
}

/// Convenience for binding a concrete logger to the global registry.
pub fn bind(provider: Arc<dyn LoggerProvider>) {
    ProviderRegistry::global().set_provider::<Logger>(provider);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingLogger {
        entries: Mutex<Vec<(LogLevel, String)>>,
        flushes: Mutex<u32>,
    }

    impl LoggerProvider for RecordingLogger {
        fn log(&self, level: LogLevel, message: &str) {
            self.entries.lock().unwrap().push((level, message.to_string()));
        }

        fn flush(&self) {
            *self.flushes.lock().unwrap() += 1;
        }
    }

    #[test]
    fn test_write_in_delegates_to_bound_logger() {
        let registry = ProviderRegistry::new();
        let logger = Arc::new(RecordingLogger::default());
        registry.set_provider::<Logger>(logger.clone());

        let translator = Translator::new();
        write_in(&registry, &translator, LogLevel::Info, "started");
        write_in(&registry, &translator, LogLevel::Error, "failed");

        let entries = logger.entries.lock().unwrap();
        assert_eq!(
            *entries,
            vec![
                (LogLevel::Info, "started".to_string()),
                (LogLevel::Error, "failed".to_string())
            ]
        );
    }

    #[test]
    fn test_write_in_unbound_does_not_panic() {
        let registry = ProviderRegistry::new();
        let translator = Translator::new();
        write_in(&registry, &translator, LogLevel::Warn, "nobody listening");
        write_in(&registry, &translator, LogLevel::Debug, "still nobody");
    }

    #[test]
    fn test_fallback_notice_is_per_registry() {
        let first = ProviderRegistry::new();
        let second = ProviderRegistry::new();

        assert!(first.first_logger_fallback());
        assert!(!first.first_logger_fallback());
        assert!(second.first_logger_fallback());
    }

    #[test]
    #[serial]
    fn test_global_helpers_and_flush() {
        let logger = Arc::new(RecordingLogger::default());
        bind(logger.clone());

        debug("d");
        info("i");
        warn("w");
        error("e");
        flush();

        let levels: Vec<LogLevel> = logger.entries.lock().unwrap().iter().map(|(l, _)| *l).collect();
        assert_eq!(levels, vec![LogLevel::Debug, LogLevel::Info, LogLevel::Warn, LogLevel::Error]);
        assert_eq!(*logger.flushes.lock().unwrap(), 1);

        ProviderRegistry::global().reset_provider::<Logger>();
    }

    #[test]
    fn test_level_ordering_and_serialization() {
        assert!(LogLevel::Debug < LogLevel::Error);
        assert_eq!(serde_json::to_string(&LogLevel::Warn).unwrap(), "\"warn\"");
    }
}
