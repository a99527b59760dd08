//! HTTP adapter for the messaging platform, speaking JSON to a
//! tdlib-bridge-style gateway. The gateway owns the platform wire
//! protocol; this side only asks it to connect a session, read channel
//! history, and forward a message.

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use crate::core::channel::ChannelHandle;
use crate::core::platform::{ChannelClient, Message, PlatformGateway};

pub struct TelegramGateway {
    base: Url,
    http: reqwest::Client,
}

impl TelegramGateway {
    pub fn new(base_url: &str, call_timeout: Duration) -> Result<Self> {
        let base = Url::parse(base_url).context("invalid gateway base URL")?;
        let http = reqwest::Client::builder()
            .timeout(call_timeout)
            .build()
            .context("failed to build gateway HTTP client")?;
        Ok(Self { base, http })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base
            .join(path)
            .with_context(|| format!("failed to build gateway URL for {path}"))
    }
}

#[derive(serde::Deserialize)]
struct ConnectResponse {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
}

#[derive(serde::Deserialize)]
struct HistoryResponse {
    #[serde(default)]
    messages: Vec<Message>,
}

#[async_trait]
impl PlatformGateway for TelegramGateway {
    async fn connect(&self, session_token: &str) -> Result<Arc<dyn ChannelClient>> {
        let url = self.endpoint("sessions/connect")?;
        let resp: ConnectResponse = self
            .http
            .post(url)
            .json(&serde_json::json!({ "session": session_token }))
            .send()
            .await
            .context("gateway connect request failed")?
            .error_for_status()
            .context("gateway refused connect")?
            .json()
            .await
            .context("gateway connect returned malformed JSON")?;

        if !resp.ok {
            bail!(
                "gateway could not start session: {}",
                resp.error.unwrap_or_else(|| "unknown error".to_string())
            );
        }

        Ok(Arc::new(GatewayClient {
            base: self.base.clone(),
            http: self.http.clone(),
            session_token: session_token.to_string(),
        }))
    }
}

/// A connected session as seen by the relay core. All calls carry the
/// session token; the gateway keeps the actual platform connection.
pub struct GatewayClient {
    base: Url,
    http: reqwest::Client,
    session_token: String,
}

impl GatewayClient {
    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base
            .join(path)
            .with_context(|| format!("failed to build gateway URL for {path}"))
    }
}

#[async_trait]
impl ChannelClient for GatewayClient {
    async fn fetch_latest(&self, channel: &ChannelHandle, count: usize) -> Result<Vec<Message>> {
        let url = self.endpoint("messages/history")?;
        let resp: HistoryResponse = self
            .http
            .post(url)
            .json(&serde_json::json!({
                "session": self.session_token,
                "channel": channel,
                "limit": count,
            }))
            .send()
            .await
            .with_context(|| format!("history request for {channel} failed"))?
            .error_for_status()
            .with_context(|| format!("gateway refused history read for {channel}"))?
            .json()
            .await
            .context("gateway history returned malformed JSON")?;
        Ok(resp.messages)
    }

    async fn forward(&self, target: &ChannelHandle, message: &Message) -> Result<()> {
        let url = self.endpoint("messages/forward")?;
        self.http
            .post(url)
            .json(&serde_json::json!({
                "session": self.session_token,
                "target": target,
                "message_id": message.id,
            }))
            .send()
            .await
            .with_context(|| format!("forward request to {target} failed"))?
            .error_for_status()
            .with_context(|| format!("gateway refused forward to {target}"))?;
        Ok(())
    }
}
