pub mod memory;
pub mod supabase;

use anyhow::Result;
use async_trait::async_trait;
use serde::de::{Deserialize, Deserializer};
use serde_json::Value;

/// One session row as the relay core sees it. Channel columns tolerate
/// legacy rows where a scalar was stored instead of a list, and the
/// automation flag is kept as raw JSON until [`SessionRecord::automation_enabled`]
/// normalizes it.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct SessionRecord {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub automation_state: Value,
    #[serde(default, deserialize_with = "string_or_list")]
    pub source_channels: Vec<String>,
    #[serde(default, deserialize_with = "string_or_list")]
    pub target_channels: Vec<String>,
}

impl SessionRecord {
    /// Canonical automation-state parser. Only the explicit falsy
    /// spellings disable the relay: `false`, `0`, or a string trimming
    /// and lowercasing to `"off"`, `"false"`, or `"0"`. A missing or
    /// null column, like any other value, means enabled.
    pub fn automation_enabled(&self) -> bool {
        match &self.automation_state {
            Value::Bool(b) => *b,
            Value::Number(n) => n.as_i64() != Some(0),
            Value::String(s) => !matches!(s.trim().to_lowercase().as_str(), "off" | "false" | "0"),
            _ => true,
        }
    }
}

fn string_or_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_list(value))
}

fn coerce_list(value: Value) -> Vec<String> {
    match value {
        Value::Null => Vec::new(),
        Value::Array(items) => items.into_iter().filter_map(scalar_to_string).collect(),
        other => scalar_to_string(other).into_iter().collect(),
    }
}

fn scalar_to_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Read/write boundary to the external session store. The relay engine
/// only reads; the mutations back the HTTP CRUD surface.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn list_session_tokens(&self) -> Result<Vec<String>>;

    async fn get_session_record(&self, token: &str) -> Result<Option<SessionRecord>>;

    async fn find_by_user(&self, user_id: &str) -> Result<Option<SessionRecord>>;

    async fn update_channels(
        &self,
        user_id: &str,
        sources: Vec<String>,
        targets: Vec<String>,
    ) -> Result<()>;

    async fn set_automation_state(&self, user_id: &str, state: &str) -> Result<()>;

    async fn recent_replies(&self, user_id: &str) -> Result<Value>;

    async fn drafts(&self, user_id: &str) -> Result<Value>;

    async fn user_id_by_email(&self, email: &str) -> Result<Option<String>>;
}
