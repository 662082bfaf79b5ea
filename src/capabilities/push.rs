//! Push notification capability (soft-fail).
//!
//! Devices and platforms without push support are a normal state; unbound
//! sends warn and report `false` (not delivered).

use crate::error::Result;
use crate::guard::{self, UnboundPolicy};
use crate::provider::Capability;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PushNotification {
    pub token: String,
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub data: Value,
}

/// Contract for push delivery services.
#[async_trait]
pub trait PushProvider: Send + Sync {
    /// Deliver `notification`, returning whether it was accepted.
    async fn send(&self, notification: &PushNotification) -> anyhow::Result<bool>;

    fn is_supported(&self) -> bool {
        true
    }
}

pub struct Push;

impl Capability for Push {
    const NAME: &'static str = "push";
    const POLICY: UnboundPolicy = UnboundPolicy::SoftFail;
    type Provider = dyn PushProvider;
}

pub async fn send(notification: &PushNotification) -> Result<bool> {
    let Some(provider) = guard::resolve::<Push>("send")? else {
        return Ok(false);
    };
    Ok(provider.send(notification).await?)
}

pub fn is_supported() -> bool {
    match guard::resolve::<Push>("isSupported") {
        Ok(Some(provider)) => provider.is_supported(),
        _ => false,
    }
}
