use crate::capabilities::StorageProvider;
use anyhow::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub data: Vec<u8>,
    pub content_type: Option<String>,
}

/// Blob store kept in memory, ordered by path. Signed URLs are not supported.
#[derive(Default)]
pub struct MemoryStorage {
    objects: RwLock<BTreeMap<String, StoredObject>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// The stored object with its content type.
    pub async fn object(&self, path: &str) -> Option<StoredObject> {
        self.objects.read().await.get(path).cloned()
    }
}

#[async_trait]
impl StorageProvider for MemoryStorage {
    async fn put(&self, path: &str, data: Vec<u8>, content_type: Option<&str>) -> Result<()> {
        if path.is_empty() {
            anyhow::bail!("Storage path must not be empty");
        }
        let object = StoredObject {
            data,
            content_type: content_type.map(str::to_string),
        };
        self.objects.write().await.insert(path.to_string(), object);
        Ok(())
    }

    async fn get(&self, path: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.objects.read().await.get(path).map(|object| object.data.clone()))
    }

    async fn delete(&self, path: &str) -> Result<bool> {
        Ok(self.objects.write().await.remove(path).is_some())
    }

    async fn list(&self, prefix: &str) -> Result<Vec<String>> {
        let objects = self.objects.read().await;
        Ok(objects
            .range(prefix.to_string()..)
            .take_while(|(path, _)| path.starts_with(prefix))
            .map(|(path, _)| path.clone())
            .collect())
    }
}
