use crate::capabilities::{QueueFeatures, QueueMessage, QueueProvider};
use anyhow::Result;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;

/// FIFO queue kept in memory. Message ids are `msg-<n>`, increasing from 1.
pub struct MemoryQueue {
    messages: Mutex<VecDeque<(String, QueueMessage)>>,
    next_id: AtomicU64,
    batch_send: bool,
}

impl MemoryQueue {
    pub fn new() -> Self {
        Self {
            messages: Mutex::new(VecDeque::new()),
            next_id: AtomicU64::new(1),
            batch_send: true,
        }
    }

    /// A queue that does not advertise batch sending.
    pub fn without_batch() -> Self {
        Self {
            batch_send: false,
            ..Self::new()
        }
    }

    pub async fn len(&self) -> usize {
        self.messages.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.messages.lock().await.is_empty()
    }

    /// Remove and return every pending message in send order.
    pub async fn drain(&self) -> Vec<(String, QueueMessage)> {
        self.messages.lock().await.drain(..).collect()
    }

    fn next_id(&self) -> String {
        format!("msg-{}", self.next_id.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for MemoryQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QueueProvider for MemoryQueue {
    async fn send(&self, message: &QueueMessage) -> Result<String> {
        let id = self.next_id();
        self.messages.lock().await.push_back((id.clone(), message.clone()));
        Ok(id)
    }

    fn features(&self) -> QueueFeatures {
        QueueFeatures {
            batch_send: self.batch_send,
        }
    }

    async fn send_batch(&self, messages: &[QueueMessage]) -> Result<Vec<String>> {
        let mut queue = self.messages.lock().await;
        let ids = messages
            .iter()
            .map(|message| {
                let id = self.next_id();
                queue.push_back((id.clone(), message.clone()));
                id
            })
            .collect();
        Ok(ids)
    }
}
