use std::sync::{Arc, RwLock};

use serde_json::Value;

use super::logger::{LogEntry, LogLevel, SagaLogger};

/// Logger that keeps every line in memory. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLogger {
    entries: Arc<RwLock<Vec<LogEntry>>>,
}

impl InMemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.read().expect("log entries lock").clone()
    }

    pub fn entries_at(&self, level: LogLevel) -> Vec<LogEntry> {
        self.entries
            .read()
            .expect("log entries lock")
            .iter()
            .filter(|entry| entry.level == level)
            .cloned()
            .collect()
    }

    /// Messages of every line tagged with the given step, in emission order.
    pub fn messages_for_step(&self, step: &str) -> Vec<String> {
        self.entries
            .read()
            .expect("log entries lock")
            .iter()
            .filter(|entry| entry.field("step").and_then(Value::as_str) == Some(step))
            .map(|entry| entry.message.clone())
            .collect()
    }

    pub fn clear(&self) {
        self.entries.write().expect("log entries lock").clear();
    }
}

impl SagaLogger for InMemoryLogger {
    fn record(&self, level: LogLevel, message: &str, metadata: &Value) {
        self.entries
            .write()
            .expect("log entries lock")
            .push(LogEntry {
                level,
                message: message.to_string(),
                metadata: metadata.clone(),
            });
    }
}
