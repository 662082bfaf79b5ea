//! Analytics capability (soft-fail).
//!
//! Running without an analytics provider is a legitimate product state, so
//! unbound calls only warn.

use crate::error::Result;
use crate::guard::{self, UnboundPolicy};
use crate::provider::Capability;
use serde_json::Value;

/// Contract for event-tracking backends.
pub trait AnalyticsProvider: Send + Sync {
    fn track(&self, event: &str, properties: &Value) -> anyhow::Result<()>;

    fn identify(&self, user_id: &str, traits: &Value) -> anyhow::Result<()>;
}

pub struct Analytics;

impl Capability for Analytics {
    const NAME: &'static str = "analytics";
    const POLICY: UnboundPolicy = UnboundPolicy::SoftFail;
    type Provider = dyn AnalyticsProvider;
}

pub fn track(event: &str, properties: &Value) -> Result<()> {
    let Some(provider) = guard::resolve::<Analytics>("track")? else {
        return Ok(());
    };
    Ok(provider.track(event, properties)?)
}

pub fn identify(user_id: &str, traits: &Value) -> Result<()> {
    let Some(provider) = guard::resolve::<Analytics>("identify")? else {
        return Ok(());
    };
    Ok(provider.identify(user_id, traits)?)
}
