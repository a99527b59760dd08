use anyhow::Result;
use async_trait::async_trait;
use std::time::Duration;

use crate::core::channel::ChannelHandle;
use crate::core::forward::{ForwardOutcome, forward_pair};
use crate::core::platform::{ChannelClient, Message};
use crate::core::tests::support::{ScriptedClient, text_message};

const TIMEOUT: Duration = Duration::from_secs(5);

fn src() -> ChannelHandle {
    ChannelHandle::Id(100)
}

fn tgt() -> ChannelHandle {
    ChannelHandle::Id(300)
}

#[tokio::test]
async fn empty_source_skips_without_forwarding() {
    let client = ScriptedClient::default().with_history(src(), Vec::new());

    let outcome = forward_pair(&client, &src(), &tgt(), 30, TIMEOUT).await;

    assert_eq!(outcome, ForwardOutcome::SkippedEmptySource);
    assert!(client.forwarded().is_empty());
    // The target window is never fetched when the source is empty.
    assert_eq!(client.fetch_count(), 1);
}

#[tokio::test]
async fn duplicate_in_window_skips_without_forwarding() {
    let client = ScriptedClient::default()
        .with_history(src(), vec![text_message(9, "hello")])
        .with_history(tgt(), vec![text_message(1, "x"), text_message(2, "hello")]);

    let outcome = forward_pair(&client, &src(), &tgt(), 30, TIMEOUT).await;

    assert_eq!(outcome, ForwardOutcome::SkippedDuplicate);
    assert!(client.forwarded().is_empty());
}

#[tokio::test]
async fn fresh_message_is_forwarded_exactly_once() {
    let client = ScriptedClient::default()
        .with_history(src(), vec![text_message(9, "brand new")])
        .with_history(tgt(), vec![text_message(1, "unrelated")]);

    let outcome = forward_pair(&client, &src(), &tgt(), 30, TIMEOUT).await;

    assert_eq!(outcome, ForwardOutcome::Forwarded);
    let forwards = client.forwarded();
    assert_eq!(forwards.len(), 1);
    assert_eq!(forwards[0].0, tgt());
    assert_eq!(forwards[0].1, text_message(9, "brand new"));
}

#[tokio::test]
async fn window_fetch_honors_configured_size() {
    let client = ScriptedClient::default()
        .with_history(src(), vec![text_message(9, "msg")])
        .with_history(tgt(), Vec::new());

    forward_pair(&client, &src(), &tgt(), 50, TIMEOUT).await;

    let fetches = client.fetches.lock().unwrap().clone();
    assert_eq!(fetches, vec![(src(), 1), (tgt(), 50)]);
}

/// Client whose fetches never resolve, standing in for a wedged
/// platform call.
struct StalledClient;

#[async_trait]
impl ChannelClient for StalledClient {
    async fn fetch_latest(&self, _channel: &ChannelHandle, _count: usize) -> Result<Vec<Message>> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(Vec::new())
    }

    async fn forward(&self, _target: &ChannelHandle, _message: &Message) -> Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn hung_call_is_cut_off_and_reported_as_error() {
    let outcome = forward_pair(
        &StalledClient,
        &src(),
        &tgt(),
        30,
        Duration::from_millis(100),
    )
    .await;

    match outcome {
        ForwardOutcome::Error(e) => assert!(e.contains("timed out"), "got: {e}"),
        other => panic!("expected an error outcome, got {other:?}"),
    }
}

#[tokio::test]
async fn source_fetch_failure_is_captured_as_error() {
    let client = ScriptedClient::default().with_failing_channel(src());

    let outcome = forward_pair(&client, &src(), &tgt(), 30, TIMEOUT).await;

    assert!(matches!(outcome, ForwardOutcome::Error(_)));
    assert!(client.forwarded().is_empty());
}

#[tokio::test]
async fn target_fetch_failure_is_captured_as_error() {
    let client = ScriptedClient::default()
        .with_history(src(), vec![text_message(9, "msg")])
        .with_failing_channel(tgt());

    let outcome = forward_pair(&client, &src(), &tgt(), 30, TIMEOUT).await;

    assert!(matches!(outcome, ForwardOutcome::Error(_)));
    assert!(client.forwarded().is_empty());
}
