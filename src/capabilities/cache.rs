//! Cache capability (hard-fail).

use crate::error::Result;
use crate::guard::{self, UnboundPolicy};
use crate::provider::Capability;
use serde_json::Value;
use std::time::Duration;

/// Contract for key-value caches.
pub trait CacheProvider: Send + Sync {
    fn get(&self, key: &str) -> anyhow::Result<Option<Value>>;

    /// Store `value`; `ttl` of `None` means no expiry.
    fn set(&self, key: &str, value: Value, ttl: Option<Duration>) -> anyhow::Result<()>;

    /// Remove `key`, returning whether it was present.
    fn delete(&self, key: &str) -> anyhow::Result<bool>;

    fn clear(&self) -> anyhow::Result<()>;
}

pub struct Cache;

impl Capability for Cache {
    const NAME: &'static str = "cache";
    const POLICY: UnboundPolicy = UnboundPolicy::HardFail;
    type Provider = dyn CacheProvider;
}

pub fn get(key: &str) -> Result<Option<Value>> {
    let provider = guard::resolve_required::<Cache>("get")?;
    Ok(provider.get(key)?)
}

pub fn set(key: &str, value: Value, ttl: Option<Duration>) -> Result<()> {
    let provider = guard::resolve_required::<Cache>("set")?;
    Ok(provider.set(key, value, ttl)?)
}

pub fn delete(key: &str) -> Result<bool> {
    let provider = guard::resolve_required::<Cache>("delete")?;
    Ok(provider.delete(key)?)
}

pub fn clear() -> Result<()> {
    let provider = guard::resolve_required::<Cache>("clear")?;
    Ok(provider.clear()?)
}
