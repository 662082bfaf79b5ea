use crate::capabilities::{LogLevel, LoggerProvider};

/// Logger provider that forwards to `tracing` under the `capability_kit::app`
/// target, tagging each event with the logger's name.
#[derive(Debug, Clone)]
pub struct TracingLogger {
    name: &'static str,
}

impl TracingLogger {
    pub fn new() -> Self {
        Self { name: "app" }
    }

    pub fn named(name: &'static str) -> Self {
        Self { name }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl Default for TracingLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl LoggerProvider for TracingLogger {
    fn log(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Debug => tracing::debug!(target: "capability_kit::app", logger = self.name, "{}", message),
            LogLevel::Info => tracing::info!(target: "capability_kit::app", logger = self.name, "{}", message),
            LogLevel::Warn => tracing::warn!(target: "capability_kit::app", logger = self.name, "{}", message),
            LogLevel::Error => tracing::error!(target: "capability_kit::app", logger = self.name, "{}", message),
        }
    }
}
