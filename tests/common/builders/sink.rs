use std::sync::Arc;

use heapwatch::logging::{LogData, LogSink};
use parking_lot::Mutex;

/// A single captured log call
#[derive(Debug, Clone)]
pub struct LogLine {
    pub message: String,
    pub data: LogData,
}

/// Log sink that records every call for later assertions
#[derive(Debug, Clone, Default)]
pub struct CaptureSink {
    lines: Arc<Mutex<Vec<LogLine>>>,
}

impl CaptureSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sink(&self) -> LogSink {
        let lines = Arc::clone(&self.lines);
        Arc::new(move |message: &str, data: &LogData| {
            lines.lock().push(LogLine {
                message: message.to_string(),
                data: data.clone(),
            });
        })
    }

    pub fn lines(&self) -> Vec<LogLine> {
        self.lines.lock().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.lines.lock().iter().map(|line| line.message.clone()).collect()
    }

    /// Number of lines whose message is exactly `message`
    pub fn count(&self, message: &str) -> usize {
        self.lines.lock().iter().filter(|line| line.message == message).count()
    }

    pub fn len(&self) -> usize {
        self.lines.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.lock().is_empty()
    }
}
