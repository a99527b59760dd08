mod handlers;
mod router;


use anyhow::Result;
use async_trait::async_trait;
use axum::{
    extract::State,
    response::sse::{Event, Sse},
};
use std::convert::Infallible;
use std::sync::Arc;
use tokio_stream::{Stream, StreamExt, wrappers::BroadcastStream};
use tracing::info;

use crate::core::lifecycle::LifecycleComponent;
use crate::store::SessionStore;

pub(crate) use router::build_api_router;

/// Shared state of the HTTP surface. The store is optional on purpose:
/// the original service started its API even without store credentials
/// and surfaced the gap per request, and we keep that behavior.
#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) store: Option<Arc<dyn SessionStore>>,
    pub(crate) log_tx: tokio::sync::broadcast::Sender<String>,
}

pub struct ApiServer {
    store: Option<Arc<dyn SessionStore>>,
    log_tx: tokio::sync::broadcast::Sender<String>,
    api_host: String,
    api_port: u16,
}

impl ApiServer {
    pub fn new(
        store: Option<Arc<dyn SessionStore>>,
        log_tx: tokio::sync::broadcast::Sender<String>,
        api_host: String,
        api_port: u16,
    ) -> Self {
        Self {
            store,
            log_tx,
            api_host,
            api_port,
        }
    }
}

pub(crate) async fn sse_logs_endpoint(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let receiver = state.log_tx.subscribe();
    let stream = BroadcastStream::new(receiver).map(|msg| match msg {
        Ok(log) => Ok(Event::default().data(log)),
        Err(_) => Ok(Event::default().data("Log stream lagged")),
    });

    Sse::new(stream)
}

#[async_trait]
impl LifecycleComponent for ApiServer {
    async fn on_init(&mut self) -> Result<()> {
        info!("API server initializing");
        Ok(())
    }

    async fn on_start(&mut self) -> Result<()> {
        let state = AppState {
            store: self.store.clone(),
            log_tx: self.log_tx.clone(),
        };
        let addr = format!("{}:{}", self.api_host, self.api_port);

        tokio::spawn(async move {
            let app = build_api_router(state);
            match tokio::net::TcpListener::bind(&addr).await {
                Ok(listener) => {
                    info!("API server running at http://{addr}");
                    if let Err(e) = axum::serve(listener, app).await {
                        tracing::error!("API server crashed: {e}");
                    }
                }
                Err(e) => tracing::error!("API server could not bind {addr}: {e}"),
            }
        });
        Ok(())
    }

    async fn on_shutdown(&mut self) -> Result<()> {
        info!("API server shutting down");
        Ok(())
    }
}
