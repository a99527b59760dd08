use anyhow::Result;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

/// Startup/shutdown hooks for the long-lived process components (the API
/// server and the relay engine). `on_start` is expected to spawn and
/// return, not block.
#[async_trait::async_trait]
pub trait LifecycleComponent {
    async fn on_init(&mut self) -> Result<()> {
        Ok(())
    }
    async fn on_start(&mut self) -> Result<()> {
        Ok(())
    }
    async fn on_shutdown(&mut self) -> Result<()> {
        Ok(())
    }
}

pub struct LifecycleManager {
    components: Vec<Arc<Mutex<dyn LifecycleComponent + Send + Sync>>>,
}

impl LifecycleManager {
    pub fn new() -> Self {
        Self {
            components: Vec::new(),
        }
    }

    pub fn attach(&mut self, component: Arc<Mutex<dyn LifecycleComponent + Send + Sync>>) {
        self.components.push(component);
    }

    pub async fn start(&mut self) -> Result<()> {
        info!("lifecycle phase: init");
        for comp in &self.components {
            comp.lock().await.on_init().await?;
        }

        info!("lifecycle phase: start");
        for comp in &self.components {
            comp.lock().await.on_start().await?;
        }

        info!("lifecycle phase: ready");
        Ok(())
    }

    /// Every component gets its shutdown hook; a failing one is logged
    /// and the rest still run.
    pub async fn shutdown(&mut self) -> Result<()> {
        info!("lifecycle phase: shutdown");
        for comp in &self.components {
            if let Err(e) = comp.lock().await.on_shutdown().await {
                warn!("component shutdown failed: {e:#}");
            }
        }
        Ok(())
    }
}
