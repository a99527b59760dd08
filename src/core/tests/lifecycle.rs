use anyhow::{Result, bail};
use async_trait::async_trait;
use std::sync::{Arc, Mutex as StdMutex};
use tokio::sync::Mutex;

use crate::core::lifecycle::{LifecycleComponent, LifecycleManager};

/// Records which hooks ran, optionally failing its shutdown.
struct Recorder {
    name: &'static str,
    fail_shutdown: bool,
    calls: Arc<StdMutex<Vec<&'static str>>>,
}

#[async_trait]
impl LifecycleComponent for Recorder {
    async fn on_shutdown(&mut self) -> Result<()> {
        self.calls.lock().unwrap().push(self.name);
        if self.fail_shutdown {
            bail!("{} refused to shut down", self.name);
        }
        Ok(())
    }
}

#[tokio::test]
async fn shutdown_reaches_every_component_despite_a_failure() {
    let calls = Arc::new(StdMutex::new(Vec::new()));
    let mut lifecycle = LifecycleManager::new();
    lifecycle.attach(Arc::new(Mutex::new(Recorder {
        name: "first",
        fail_shutdown: true,
        calls: calls.clone(),
    })));
    lifecycle.attach(Arc::new(Mutex::new(Recorder {
        name: "second",
        fail_shutdown: false,
        calls: calls.clone(),
    })));

    lifecycle.shutdown().await.unwrap();

    assert_eq!(*calls.lock().unwrap(), vec!["first", "second"]);
}

#[tokio::test]
async fn start_runs_init_before_start_for_all_components() {
    struct PhaseRecorder {
        calls: Arc<StdMutex<Vec<&'static str>>>,
    }

    #[async_trait]
    impl LifecycleComponent for PhaseRecorder {
        async fn on_init(&mut self) -> Result<()> {
            self.calls.lock().unwrap().push("init");
            Ok(())
        }
        async fn on_start(&mut self) -> Result<()> {
            self.calls.lock().unwrap().push("start");
            Ok(())
        }
    }

    let calls = Arc::new(StdMutex::new(Vec::new()));
    let mut lifecycle = LifecycleManager::new();
    lifecycle.attach(Arc::new(Mutex::new(PhaseRecorder {
        calls: calls.clone(),
    })));
    lifecycle.attach(Arc::new(Mutex::new(PhaseRecorder {
        calls: calls.clone(),
    })));

    lifecycle.start().await.unwrap();

    assert_eq!(*calls.lock().unwrap(), vec!["init", "init", "start", "start"]);
}
