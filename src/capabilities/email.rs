//! Email capability (hard-fail).

use crate::error::Result;
use crate::guard::{self, UnboundPolicy};
use crate::provider::Capability;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email {
    pub to: Vec<String>,
    pub subject: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
}

/// Contract for email delivery services.
#[async_trait]
pub trait EmailProvider: Send + Sync {
    async fn send(&self, email: &Email) -> anyhow::Result<()>;
}

pub struct EmailService;

impl Capability for EmailService {
    const NAME: &'static str = "email";
    const POLICY: UnboundPolicy = UnboundPolicy::HardFail;
    type Provider = dyn EmailProvider;
}

pub async fn send(email: &Email) -> Result<()> {
    let provider = guard::resolve_required::<EmailService>("send")?;
    Ok(provider.send(email).await?)
}
