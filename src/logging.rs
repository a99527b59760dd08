use tracing::Level;
use tracing_subscriber::FmtSubscriber;
use tracing_subscriber::fmt::MakeWriter;

/// Duplicates every formatted log line onto a broadcast channel so the
/// `/api/logs` SSE endpoint can stream the live feed alongside stdout.
#[derive(Clone)]
pub(crate) struct FanoutMakeWriter {
    pub sender: tokio::sync::broadcast::Sender<String>,
}

impl<'a> MakeWriter<'a> for FanoutMakeWriter {
    type Writer = FanoutWriter;

    fn make_writer(&'a self) -> Self::Writer {
        FanoutWriter {
            sender: self.sender.clone(),
        }
    }
}

pub(crate) struct FanoutWriter {
    sender: tokio::sync::broadcast::Sender<String>,
}

impl std::io::Write for FanoutWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let line = String::from_utf8_lossy(buf).to_string();
        let _ = self.sender.send(line); // Ignored if no receivers
        std::io::stdout().write(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        std::io::stdout().flush()
    }
}

/// Install the global subscriber. Safe to call more than once; later calls
/// keep the first subscriber.
pub(crate) fn init(log_tx: tokio::sync::broadcast::Sender<String>) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_writer(FanoutMakeWriter { sender: log_tx })
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}
