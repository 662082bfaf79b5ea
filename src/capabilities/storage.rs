//! Object storage capability (hard-fail).

use crate::error::Result;
use crate::guard::{self, UnboundPolicy};
use crate::provider::Capability;
use async_trait::async_trait;
use std::time::Duration;

/// Optional operations a storage provider may support.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StorageFeatures {
    pub signed_urls: bool,
}

/// Contract for blob stores.
#[async_trait]
pub trait StorageProvider: Send + Sync {
    async fn put(&self, path: &str, data: Vec<u8>, content_type: Option<&str>) -> anyhow::Result<()>;

    async fn get(&self, path: &str) -> anyhow::Result<Option<Vec<u8>>>;

    /// Remove `path`, returning whether it existed.
    async fn delete(&self, path: &str) -> anyhow::Result<bool>;

    /// Paths starting with `prefix`, sorted.
    async fn list(&self, prefix: &str) -> anyhow::Result<Vec<String>>;

    fn features(&self) -> StorageFeatures {
        StorageFeatures::default()
    }

    /// Only called when `features().signed_urls` is true.
    async fn signed_url(&self, path: &str, _expires_in: Duration) -> anyhow::Result<String> {
        anyhow::bail!("signed URLs are not implemented for '{}'", path)
    }
}

pub struct Storage;

impl Capability for Storage {
    const NAME: &'static str = "storage";
    const POLICY: UnboundPolicy = UnboundPolicy::HardFail;
    type Provider = dyn StorageProvider;
}

pub async fn put(path: &str, data: Vec<u8>, content_type: Option<&str>) -> Result<()> {
    let provider = guard::resolve_required::<Storage>("put")?;
    Ok(provider.put(path, data, content_type).await?)
}

pub async fn get(path: &str) -> Result<Option<Vec<u8>>> {
    let provider = guard::resolve_required::<Storage>("get")?;
    Ok(provider.get(path).await?)
}

pub async fn delete(path: &str) -> Result<bool> {
    let provider = guard::resolve_required::<Storage>("delete")?;
    Ok(provider.delete(path).await?)
}

pub async fn list(prefix: &str) -> Result<Vec<String>> {
    let provider = guard::resolve_required::<Storage>("list")?;
    Ok(provider.list(prefix).await?)
}

/// A time-limited URL for `path`.
///
/// # Errors
/// `Error::UnsupportedOperation` (`storage.error.signedUrlNotSupported`) when
/// the bound provider does not advertise signed URL support.
pub async fn signed_url(path: &str, expires_in: Duration) -> Result<String> {
    let provider = guard::resolve_required::<Storage>("signedUrl")?;
    if !provider.features().signed_urls {
        return Err(guard::unsupported::<Storage>("signedUrl").into());
    }
    Ok(provider.signed_url(path, expires_in).await?)
}
