//! Ready-made providers for development, tests and single-process deployments.

mod env_secrets;
mod memory_cache;
mod memory_queue;
mod memory_storage;
mod tracing_logger;

pub use env_secrets::EnvSecrets;
pub use memory_cache::MemoryCache;
pub use memory_queue::MemoryQueue;
pub use memory_storage::{MemoryStorage, StoredObject};
pub use tracing_logger::TracingLogger;
