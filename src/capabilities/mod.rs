//! The bundled capabilities: one marker type, one provider contract and a set
//! of guarded facade functions per capability.

pub mod analytics;
pub mod cache;
pub mod email;
pub mod logger;
pub mod push;
pub mod queue;
pub mod secrets;
pub mod storage;

pub use analytics::{Analytics, AnalyticsProvider};
pub use cache::{Cache, CacheProvider};
pub use email::{Email, EmailProvider, EmailService};
pub use logger::{LogLevel, Logger, LoggerProvider};
pub use push::{Push, PushNotification, PushProvider};
pub use queue::{Queue, QueueFeatures, QueueMessage, QueueProvider};
pub use secrets::{Secrets, SecretsProvider};
pub use storage::{Storage, StorageFeatures, StorageProvider};
