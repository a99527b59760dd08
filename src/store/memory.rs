use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use super::{SessionRecord, SessionStore};

struct MemoryRow {
    token: String,
    email: String,
    record: SessionRecord,
    recent_replies: Value,
    drafts: Value,
}

/// In-process store for `--dev` runs and the HTTP surface tests. Same
/// contract as the REST adapter, minus the network.
#[derive(Default)]
pub struct MemoryStore {
    rows: RwLock<Vec<MemoryRow>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store with one linked demo session, so a dev run has something
    /// to poke at through the API.
    pub fn with_demo_session() -> Self {
        let store = Self::new();
        store
            .rows
            .try_write()
            .expect("fresh store is uncontended")
            .push(MemoryRow {
                token: "dev-session".to_string(),
                email: "dev@example.com".to_string(),
                record: SessionRecord {
                    user_id: "dev".to_string(),
                    automation_state: Value::String("on".to_string()),
                    source_channels: Vec::new(),
                    target_channels: Vec::new(),
                },
                recent_replies: Value::Array(Vec::new()),
                drafts: Value::Array(Vec::new()),
            });
        store
    }

    pub async fn insert_session(&self, token: &str, email: &str, record: SessionRecord) {
        self.rows.write().await.push(MemoryRow {
            token: token.to_string(),
            email: email.to_string(),
            record,
            recent_replies: Value::Array(Vec::new()),
            drafts: Value::Array(Vec::new()),
        });
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn list_session_tokens(&self) -> Result<Vec<String>> {
        Ok(self
            .rows
            .read()
            .await
            .iter()
            .map(|row| row.token.clone())
            .collect())
    }

    async fn get_session_record(&self, token: &str) -> Result<Option<SessionRecord>> {
        Ok(self
            .rows
            .read()
            .await
            .iter()
            .find(|row| row.token == token)
            .map(|row| row.record.clone()))
    }

    async fn find_by_user(&self, user_id: &str) -> Result<Option<SessionRecord>> {
        Ok(self
            .rows
            .read()
            .await
            .iter()
            .find(|row| row.record.user_id == user_id)
            .map(|row| row.record.clone()))
    }

    async fn update_channels(
        &self,
        user_id: &str,
        sources: Vec<String>,
        targets: Vec<String>,
    ) -> Result<()> {
        let mut rows = self.rows.write().await;
        for row in rows.iter_mut().filter(|row| row.record.user_id == user_id) {
            row.record.source_channels = sources.clone();
            row.record.target_channels = targets.clone();
        }
        Ok(())
    }

    async fn set_automation_state(&self, user_id: &str, state: &str) -> Result<()> {
        let mut rows = self.rows.write().await;
        for row in rows.iter_mut().filter(|row| row.record.user_id == user_id) {
            row.record.automation_state = Value::String(state.to_string());
        }
        Ok(())
    }

    async fn recent_replies(&self, user_id: &str) -> Result<Value> {
        Ok(self
            .rows
            .read()
            .await
            .iter()
            .find(|row| row.record.user_id == user_id)
            .map(|row| row.recent_replies.clone())
            .unwrap_or(Value::Array(Vec::new())))
    }

    async fn drafts(&self, user_id: &str) -> Result<Value> {
        Ok(self
            .rows
            .read()
            .await
            .iter()
            .find(|row| row.record.user_id == user_id)
            .map(|row| row.drafts.clone())
            .unwrap_or(Value::Array(Vec::new())))
    }

    async fn user_id_by_email(&self, email: &str) -> Result<Option<String>> {
        Ok(self
            .rows
            .read()
            .await
            .iter()
            .find(|row| row.email == email)
            .map(|row| row.record.user_id.clone()))
    }
}
