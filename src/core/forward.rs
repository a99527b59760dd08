use anyhow::{Context, Result};
use std::time::Duration;
use tokio::time::timeout;

use crate::core::channel::ChannelHandle;
use crate::core::dedup::is_duplicate;
use crate::core::platform::ChannelClient;

/// Result of one (source, target) forward attempt. Errors carry their
/// description so the worker can log them without aborting the cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForwardOutcome {
    Forwarded,
    SkippedDuplicate,
    SkippedEmptySource,
    Error(String),
}

/// Execute one forward attempt: fetch the newest source message, fetch
/// the target's recent window, skip on duplicate, forward otherwise.
///
/// Every failure, including a call exceeding `call_timeout`, is captured
/// here as `ForwardOutcome::Error`. Nothing propagates to the caller, so
/// the remaining pairs of the cycle are always attempted.
pub async fn forward_pair(
    client: &dyn ChannelClient,
    source: &ChannelHandle,
    target: &ChannelHandle,
    window_size: usize,
    call_timeout: Duration,
) -> ForwardOutcome {
    match attempt(client, source, target, window_size, call_timeout).await {
        Ok(outcome) => outcome,
        Err(e) => ForwardOutcome::Error(format!("{e:#}")),
    }
}

async fn attempt(
    client: &dyn ChannelClient,
    source: &ChannelHandle,
    target: &ChannelHandle,
    window_size: usize,
    call_timeout: Duration,
) -> Result<ForwardOutcome> {
    let latest = timeout(call_timeout, client.fetch_latest(source, 1))
        .await
        .with_context(|| format!("fetch from {source} timed out"))?
        .with_context(|| format!("fetch from {source} failed"))?;

    let Some(newest) = latest.into_iter().next() else {
        return Ok(ForwardOutcome::SkippedEmptySource);
    };

    let window = timeout(call_timeout, client.fetch_latest(target, window_size))
        .await
        .with_context(|| format!("fetch from {target} timed out"))?
        .with_context(|| format!("fetch from {target} failed"))?;

    if is_duplicate(&newest, &window) {
        return Ok(ForwardOutcome::SkippedDuplicate);
    }

    timeout(call_timeout, client.forward(target, &newest))
        .await
        .with_context(|| format!("forward to {target} timed out"))?
        .with_context(|| format!("forward to {target} failed"))?;

    Ok(ForwardOutcome::Forwarded)
}
