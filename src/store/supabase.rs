use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde_json::Value;
use std::time::Duration;
use url::Url;

use super::{SessionRecord, SessionStore};

const SESSIONS_TABLE: &str = "telegram_sessions";

/// PostgREST-style adapter for a Supabase project. One row per session in
/// the `telegram_sessions` table; filters are expressed as `column=eq.x`
/// query pairs and updates as PATCH bodies against the same filter.
pub struct SupabaseStore {
    base: Url,
    http: reqwest::Client,
}

impl SupabaseStore {
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self> {
        let base = Url::parse(base_url).context("invalid store base URL")?;

        let mut headers = HeaderMap::new();
        let key_value =
            HeaderValue::from_str(api_key).context("store API key is not a valid header value")?;
        headers.insert("apikey", key_value);
        let bearer = HeaderValue::from_str(&format!("Bearer {api_key}"))
            .context("store API key is not a valid header value")?;
        headers.insert(AUTHORIZATION, bearer);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .context("failed to build store HTTP client")?;

        Ok(Self { base, http })
    }

    fn table_url(&self, filters: &[(&str, &str)]) -> Result<Url> {
        let mut url = self
            .base
            .join(&format!("rest/v1/{SESSIONS_TABLE}"))
            .context("failed to build store URL")?;
        for (key, value) in filters {
            url.query_pairs_mut().append_pair(key, value);
        }
        Ok(url)
    }

    async fn select(&self, filters: &[(&str, &str)]) -> Result<Vec<Value>> {
        let url = self.table_url(filters)?;
        let rows = self
            .http
            .get(url)
            .send()
            .await
            .context("store read failed")?
            .error_for_status()
            .context("store rejected read")?
            .json()
            .await
            .context("store returned malformed JSON")?;
        Ok(rows)
    }

    async fn patch_by_user(&self, user_id: &str, body: Value) -> Result<()> {
        let url = self.table_url(&[("user_id", &format!("eq.{user_id}"))])?;
        self.http
            .patch(url)
            .header("Prefer", "return=minimal")
            .json(&body)
            .send()
            .await
            .context("store write failed")?
            .error_for_status()
            .context("store rejected write")?;
        Ok(())
    }

    async fn select_column(&self, user_id: &str, column: &str) -> Result<Vec<Value>> {
        self.select(&[("select", column), ("user_id", &format!("eq.{user_id}"))])
            .await
    }
}

#[async_trait]
impl SessionStore for SupabaseStore {
    async fn list_session_tokens(&self) -> Result<Vec<String>> {
        let rows = self.select(&[("select", "session_token")]).await?;
        Ok(rows
            .into_iter()
            .filter_map(|row| {
                row.get("session_token")
                    .and_then(Value::as_str)
                    .map(str::to_string)
            })
            .filter(|token| !token.is_empty())
            .collect())
    }

    async fn get_session_record(&self, token: &str) -> Result<Option<SessionRecord>> {
        let rows = self
            .select(&[
                ("select", "user_id,automation_state,source_channels,target_channels"),
                ("session_token", &format!("eq.{token}")),
            ])
            .await?;
        decode_first(rows)
    }

    async fn find_by_user(&self, user_id: &str) -> Result<Option<SessionRecord>> {
        let rows = self
            .select(&[
                ("select", "user_id,automation_state,source_channels,target_channels"),
                ("user_id", &format!("eq.{user_id}")),
            ])
            .await?;
        decode_first(rows)
    }

    async fn update_channels(
        &self,
        user_id: &str,
        sources: Vec<String>,
        targets: Vec<String>,
    ) -> Result<()> {
        self.patch_by_user(
            user_id,
            serde_json::json!({
                "source_channels": sources,
                "target_channels": targets,
            }),
        )
        .await
    }

    async fn set_automation_state(&self, user_id: &str, state: &str) -> Result<()> {
        self.patch_by_user(user_id, serde_json::json!({ "automation_state": state }))
            .await
    }

    async fn recent_replies(&self, user_id: &str) -> Result<Value> {
        let rows = self.select_column(user_id, "recent_replies").await?;
        Ok(Value::Array(rows))
    }

    async fn drafts(&self, user_id: &str) -> Result<Value> {
        let rows = self.select_column(user_id, "drafts").await?;
        Ok(Value::Array(rows))
    }

    async fn user_id_by_email(&self, email: &str) -> Result<Option<String>> {
        let rows = self
            .select(&[("select", "user_id"), ("email", &format!("eq.{email}"))])
            .await?;
        Ok(rows.into_iter().next().and_then(|row| {
            row.get("user_id").and_then(Value::as_str).map(str::to_string)
        }))
    }
}

fn decode_first(rows: Vec<Value>) -> Result<Option<SessionRecord>> {
    match rows.into_iter().next() {
        Some(row) => serde_json::from_value(row)
            .map(Some)
            .map_err(|e| anyhow!("malformed session row: {e}")),
        None => Ok(None),
    }
}
