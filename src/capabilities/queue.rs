//! Message queue capability (hard-fail).

use crate::error::Result;
use crate::guard::{self, UnboundPolicy};
use crate::provider::Capability;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueMessage {
    pub topic: String,
    pub payload: Value,
}

impl QueueMessage {
    pub fn new(topic: impl Into<String>, payload: Value) -> Self {
        Self {
            topic: topic.into(),
            payload,
        }
    }
}

/// Optional operations a queue provider may support.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueueFeatures {
    pub batch_send: bool,
}

/// Contract for message queues.
#[async_trait]
pub trait QueueProvider: Send + Sync {
    /// Enqueue `message`, returning the provider's message id.
    async fn send(&self, message: &QueueMessage) -> anyhow::Result<String>;

    fn features(&self) -> QueueFeatures {
        QueueFeatures::default()
    }

    /// Only called when `features().batch_send` is true.
    async fn send_batch(&self, messages: &[QueueMessage]) -> anyhow::Result<Vec<String>> {
        anyhow::bail!("batch send is not implemented ({} messages)", messages.len())
    }
}

pub struct Queue;

impl Capability for Queue {
    const NAME: &'static str = "queue";
    const POLICY: UnboundPolicy = UnboundPolicy::HardFail;
    type Provider = dyn QueueProvider;
}

pub async fn send(message: &QueueMessage) -> Result<String> {
    let provider = guard::resolve_required::<Queue>("send")?;
    Ok(provider.send(message).await?)
}

/// Enqueue several messages in one provider call.
///
/// # Errors
/// `Error::UnsupportedOperation` (`queue.error.sendBatchNotSupported`) when the
/// bound provider does not advertise batch support.
pub async fn send_batch(messages: &[QueueMessage]) -> Result<Vec<String>> {
    let provider = guard::resolve_required::<Queue>("sendBatch")?;
    if !provider.features().batch_send {
        return Err(guard::unsupported::<Queue>("sendBatch").into());
    }
    Ok(provider.send_batch(messages).await?)
}
