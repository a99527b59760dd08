//! Shared doubles for the engine tests: a scripted platform client, a
//! gateway that hands it out (or refuses to connect), and a canned store.

use anyhow::{Result, bail};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::core::channel::ChannelHandle;
use crate::core::platform::{ChannelClient, Message, PlatformGateway};
use crate::store::{SessionRecord, SessionStore};

pub(crate) fn text_message(id: i64, text: &str) -> Message {
    Message {
        id,
        text: Some(text.to_string()),
        media: None,
        sender_id: 1,
    }
}

pub(crate) fn media_message(id: i64, media: &str, sender_id: i64) -> Message {
    Message {
        id,
        text: None,
        media: Some(media.to_string()),
        sender_id,
    }
}

/// Channel client with canned per-channel histories. Records every fetch
/// and forward so tests can assert on call patterns.
#[derive(Default)]
pub(crate) struct ScriptedClient {
    pub histories: Mutex<HashMap<ChannelHandle, Vec<Message>>>,
    pub failing_channels: Mutex<Vec<ChannelHandle>>,
    pub fetches: Mutex<Vec<(ChannelHandle, usize)>>,
    pub forwards: Mutex<Vec<(ChannelHandle, Message)>>,
}

impl ScriptedClient {
    pub fn with_history(self, channel: ChannelHandle, messages: Vec<Message>) -> Self {
        self.histories.lock().unwrap().insert(channel, messages);
        self
    }

    pub fn with_failing_channel(self, channel: ChannelHandle) -> Self {
        self.failing_channels.lock().unwrap().push(channel);
        self
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.lock().unwrap().len()
    }

    pub fn forwarded(&self) -> Vec<(ChannelHandle, Message)> {
        self.forwards.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChannelClient for ScriptedClient {
    async fn fetch_latest(&self, channel: &ChannelHandle, count: usize) -> Result<Vec<Message>> {
        self.fetches.lock().unwrap().push((channel.clone(), count));
        if self.failing_channels.lock().unwrap().contains(channel) {
            bail!("scripted fetch failure for {channel}");
        }
        let histories = self.histories.lock().unwrap();
        Ok(histories
            .get(channel)
            .map(|msgs| msgs.iter().take(count).cloned().collect())
            .unwrap_or_default())
    }

    async fn forward(&self, target: &ChannelHandle, message: &Message) -> Result<()> {
        self.forwards
            .lock()
            .unwrap()
            .push((target.clone(), message.clone()));
        Ok(())
    }
}

/// Gateway whose connect attempts always fail, terminating any worker
/// that goes through it. Keeps manager tests free of runaway tasks.
pub(crate) struct RefusingGateway;

#[async_trait]
impl PlatformGateway for RefusingGateway {
    async fn connect(&self, _session_token: &str) -> Result<Arc<dyn ChannelClient>> {
        bail!("connect refused by test gateway")
    }
}

/// Store with a fixed token list and one record per token.
#[derive(Default)]
pub(crate) struct CannedStore {
    pub records: Mutex<HashMap<String, SessionRecord>>,
    pub fail_listing: bool,
}

impl CannedStore {
    pub fn with_record(self, token: &str, record: SessionRecord) -> Self {
        self.records.lock().unwrap().insert(token.to_string(), record);
        self
    }

    pub fn failing() -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
            fail_listing: true,
        }
    }
}

#[async_trait]
impl SessionStore for CannedStore {
    async fn list_session_tokens(&self) -> Result<Vec<String>> {
        if self.fail_listing {
            bail!("store unavailable");
        }
        let mut tokens: Vec<String> = self.records.lock().unwrap().keys().cloned().collect();
        tokens.sort();
        Ok(tokens)
    }

    async fn get_session_record(&self, token: &str) -> Result<Option<SessionRecord>> {
        Ok(self.records.lock().unwrap().get(token).cloned())
    }

    async fn find_by_user(&self, user_id: &str) -> Result<Option<SessionRecord>> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .values()
            .find(|r| r.user_id == user_id)
            .cloned())
    }

    async fn update_channels(
        &self,
        _user_id: &str,
        _sources: Vec<String>,
        _targets: Vec<String>,
    ) -> Result<()> {
        bail!("not exercised by engine tests")
    }

    async fn set_automation_state(&self, _user_id: &str, _state: &str) -> Result<()> {
        bail!("not exercised by engine tests")
    }

    async fn recent_replies(&self, _user_id: &str) -> Result<serde_json::Value> {
        bail!("not exercised by engine tests")
    }

    async fn drafts(&self, _user_id: &str) -> Result<serde_json::Value> {
        bail!("not exercised by engine tests")
    }

    async fn user_id_by_email(&self, _email: &str) -> Result<Option<String>> {
        bail!("not exercised by engine tests")
    }
}
