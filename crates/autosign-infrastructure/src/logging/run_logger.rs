use bytes::Bytes;
use tokio::sync::mpsc;

use autosign_domain::{LogLevel, RunLog};

const RUN_TARGET: &str = "autosign::run";

/// Destination for run log lines
pub trait LogSink: Send + Sync {
    fn write(&self, level: LogLevel, message: &str);
}

/// Process sink: emits through the global `tracing` subscriber
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn write(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Info => tracing::info!(target: RUN_TARGET, "{}", message),
            LogLevel::Warn => tracing::warn!(target: RUN_TARGET, "{}", message),
            LogLevel::Error => tracing::error!(target: RUN_TARGET, "{}", message),
        }
    }
}

/// The reading half of a [`StreamSink`] went away
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("log stream receiver is closed")]
pub struct StreamClosed;

/// Stream sink: encodes `[LEVEL] message\n` lines onto a channel that feeds
/// an HTTP response body. Dropping the sink ends the body.
#[derive(Debug)]
pub struct StreamSink {
    tx: mpsc::UnboundedSender<Bytes>,
}

impl StreamSink {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Bytes>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn write(&self, level: LogLevel, message: &str) -> Result<(), StreamClosed> {
        let line = format!("[{}] {}\n", level, message);
        self.tx.send(Bytes::from(line)).map_err(|_| StreamClosed)
    }
}

/// Run logger: always writes to the process sink and, in streaming mode,
/// mirrors every line to the stream sink as well.
pub struct RunLogger {
    process: Box<dyn LogSink>,
    stream: Option<StreamSink>,
}

impl RunLogger {
    /// Plain process logger
    pub fn process_only() -> Self {
        Self {
            process: Box::new(TracingSink),
            stream: None,
        }
    }

    /// Process logger plus a live copy on `stream`
    pub fn streaming(stream: StreamSink) -> Self {
        Self {
            process: Box::new(TracingSink),
            stream: Some(stream),
        }
    }

    /// Replace the process sink
    pub fn with_process_sink(mut self, sink: impl LogSink + 'static) -> Self {
        self.process = Box::new(sink);
        self
    }
}

impl RunLog for RunLogger {
    fn log(&self, level: LogLevel, message: &str) {
        self.process.write(level, message);

        if let Some(stream) = &self.stream {
            if let Err(e) = stream.write(level, message) {
                self.process
                    .write(LogLevel::Error, &format!("Failed to stream log line: {}", e));
            }
        }
    }
}
