use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::core::config::RelayConfig;
use crate::core::lifecycle::LifecycleComponent;
use crate::core::platform::PlatformGateway;
use crate::core::worker::SessionWorker;
use crate::store::SessionStore;

/// Discovers sessions and keeps exactly one worker running per token.
///
/// The launch set is owned by the manager task alone and is never pruned:
/// once a worker exists for a token it runs for the lifetime of the
/// process, even if the record later disappears from the store (the
/// worker then idles on its missing-record branch).
pub struct SessionManager {
    store: Arc<dyn SessionStore>,
    gateway: Arc<dyn PlatformGateway>,
    config: RelayConfig,
}

impl SessionManager {
    pub fn new(
        store: Arc<dyn SessionStore>,
        gateway: Arc<dyn PlatformGateway>,
        config: RelayConfig,
    ) -> Self {
        Self {
            store,
            gateway,
            config,
        }
    }

    pub async fn run(self) {
        info!("session manager started, scanning for sessions");
        let mut started: HashSet<String> = HashSet::new();

        loop {
            match self.scan_once(&mut started).await {
                Ok(0) => {}
                Ok(n) => info!("launched {n} new relay worker(s), {} total", started.len()),
                // A store outage reads as "no sessions this scan", never fatal.
                Err(e) => warn!("session scan failed: {e:#}"),
            }
            tokio::time::sleep(self.config.scan_interval).await;
        }
    }

    /// One discovery pass: spawn a worker for every token not yet in
    /// `started`. Returns how many workers were launched.
    pub(crate) async fn scan_once(&self, started: &mut HashSet<String>) -> Result<usize> {
        let tokens = self.store.list_session_tokens().await?;

        let mut launched = 0;
        for token in tokens {
            if token.is_empty() || started.contains(&token) {
                continue;
            }
            let worker = SessionWorker::new(
                token.clone(),
                self.store.clone(),
                self.gateway.clone(),
                self.config.clone(),
            );
            tokio::spawn(worker.run());
            started.insert(token);
            launched += 1;
        }

        Ok(launched)
    }
}

/// Lifecycle wrapper that backs the relay side of the process. When a
/// collaborator is unconfigured the engine logs the gap and stays idle
/// instead of failing startup, so the HTTP surface remains usable.
pub struct RelayEngine {
    store: Option<Arc<dyn SessionStore>>,
    gateway: Option<Arc<dyn PlatformGateway>>,
    config: RelayConfig,
}

impl RelayEngine {
    pub fn new(
        store: Option<Arc<dyn SessionStore>>,
        gateway: Option<Arc<dyn PlatformGateway>>,
        config: RelayConfig,
    ) -> Self {
        Self {
            store,
            gateway,
            config,
        }
    }
}

#[async_trait]
impl LifecycleComponent for RelayEngine {
    async fn on_init(&mut self) -> Result<()> {
        info!("relay engine initializing");
        Ok(())
    }

    async fn on_start(&mut self) -> Result<()> {
        let (Some(store), Some(gateway)) = (self.store.clone(), self.gateway.clone()) else {
            error!("relay engine idle: session store and/or platform gateway not configured");
            return Ok(());
        };

        let manager = SessionManager::new(store, gateway, self.config.clone());
        tokio::spawn(manager.run());
        Ok(())
    }

    async fn on_shutdown(&mut self) -> Result<()> {
        info!("relay engine shutting down");
        Ok(())
    }
}
