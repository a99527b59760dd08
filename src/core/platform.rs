use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use crate::core::channel::ChannelHandle;

/// Read-only view of a platform message, as returned by a channel fetch.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Message {
    pub id: i64,
    #[serde(default)]
    pub text: Option<String>,
    /// Opaque media descriptor (file id, album id, ...). Equal descriptors
    /// mean the same media payload.
    #[serde(default)]
    pub media: Option<String>,
    #[serde(default)]
    pub sender_id: i64,
}

/// One authenticated connection to the messaging platform, bound to a
/// single session token.
#[async_trait]
pub trait ChannelClient: Send + Sync {
    /// Fetch up to `count` messages from a channel, most recent first.
    async fn fetch_latest(&self, channel: &ChannelHandle, count: usize) -> Result<Vec<Message>>;

    /// Forward an already-posted message into `target`.
    async fn forward(&self, target: &ChannelHandle, message: &Message) -> Result<()>;
}

/// Factory for per-session platform connections. Connect failures are
/// fatal to the worker that requested the connection, nothing else.
#[async_trait]
pub trait PlatformGateway: Send + Sync {
    async fn connect(&self, session_token: &str) -> Result<Arc<dyn ChannelClient>>;
}
