use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::core::channel::{ChannelHandle, normalize};
use crate::core::config::RelayConfig;
use crate::core::forward::{ForwardOutcome, forward_pair};
use crate::core::platform::{ChannelClient, PlatformGateway};
use crate::store::SessionStore;

/// One polling worker bound to one session token.
///
/// Connects once at startup; a connect failure terminates the worker for
/// the lifetime of the process. After that the worker polls forever:
/// every cycle re-reads the session record, so configuration edits made
/// through the HTTP surface apply without a restart, and no cycle fault
/// can kill the loop.
pub struct SessionWorker {
    token: String,
    store: Arc<dyn SessionStore>,
    gateway: Arc<dyn PlatformGateway>,
    config: RelayConfig,
}

impl SessionWorker {
    pub fn new(
        token: String,
        store: Arc<dyn SessionStore>,
        gateway: Arc<dyn PlatformGateway>,
        config: RelayConfig,
    ) -> Self {
        Self {
            token,
            store,
            gateway,
            config,
        }
    }

    pub async fn run(self) {
        let label = session_label(&self.token);

        let client = match self.gateway.connect(&self.token).await {
            Ok(client) => client,
            Err(e) => {
                error!("[{label}] platform connect failed, worker will not start: {e:#}");
                return;
            }
        };

        info!("[{label}] relay worker started");

        loop {
            if let Err(e) = self.cycle(client.as_ref()).await {
                warn!("[{label}] relay cycle failed: {e:#}");
            }
            tokio::time::sleep(self.config.poll_interval).await;
        }
    }

    /// One full pass over the session's configured pairs. A store read
    /// failure bubbles up as the cycle's error; everything narrower is
    /// handled in place.
    pub(crate) async fn cycle(&self, client: &dyn ChannelClient) -> Result<()> {
        let label = session_label(&self.token);

        let Some(record) = self.store.get_session_record(&self.token).await? else {
            warn!("[{label}] no session record found, idling this cycle");
            return Ok(());
        };

        if !record.automation_enabled() {
            info!("[{label}] automation disabled for user {}", record.user_id);
            return Ok(());
        }

        let pairs = pair_list(&record.source_channels, &record.target_channels);
        if pairs.is_empty() {
            debug!("[{label}] no source-target pairs for user {}", record.user_id);
            return Ok(());
        }

        for (idx, source, target) in pairs {
            let outcome = forward_pair(
                client,
                &source,
                &target,
                self.config.dedup_window,
                self.config.call_timeout,
            )
            .await;

            match outcome {
                ForwardOutcome::Forwarded => {
                    info!("[{label}] forwarded {source} -> {target} (pair {idx})");
                }
                ForwardOutcome::SkippedDuplicate => {
                    info!("[{label}] already present in {target}, skipping (pair {idx})");
                }
                ForwardOutcome::SkippedEmptySource => {
                    debug!("[{label}] no messages in source {source} (pair {idx})");
                }
                ForwardOutcome::Error(e) => {
                    warn!("[{label}] pair {idx} ({source} -> {target}) failed: {e}");
                }
            }
        }

        Ok(())
    }
}

/// Zip the two channel lists up to the shorter length and normalize both
/// sides, dropping pairs with an empty side. Original indices are kept
/// for logging.
pub(crate) fn pair_list(
    sources: &[String],
    targets: &[String],
) -> Vec<(usize, ChannelHandle, ChannelHandle)> {
    sources
        .iter()
        .zip(targets.iter())
        .enumerate()
        .filter_map(|(idx, (raw_src, raw_tgt))| {
            let src = normalize(raw_src)?;
            let tgt = normalize(raw_tgt)?;
            Some((idx, src, tgt))
        })
        .collect()
}

/// Session tokens are secrets; log only a short prefix.
fn session_label(token: &str) -> String {
    token.chars().take(8).collect()
}
