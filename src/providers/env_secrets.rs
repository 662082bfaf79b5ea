use crate::capabilities::SecretsProvider;
use anyhow::Result;
use std::env::{self, VarError};

/// Secrets read from process environment variables.
///
/// With a prefix, `get("db_password")` reads `<PREFIX>DB_PASSWORD`; without
/// one the name is used as-is.
#[derive(Debug, Clone, Default)]
pub struct EnvSecrets {
    prefix: Option<String>,
}

impl EnvSecrets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
        }
    }

    fn variable_name(&self, name: &str) -> String {
        match &self.prefix {
            Some(prefix) => format!("{}{}", prefix, name.to_uppercase()),
            None => name.to_string(),
        }
    }
}

impl SecretsProvider for EnvSecrets {
    fn get(&self, name: &str) -> Result<Option<String>> {
        let variable = self.variable_name(name);
        match env::var(&variable) {
            Ok(value) => Ok(Some(value)),
            Err(VarError::NotPresent) => Ok(None),
            Err(VarError::NotUnicode(_)) => {
                anyhow::bail!("Environment variable {} is not valid unicode", variable)
            }
        }
    }
}
