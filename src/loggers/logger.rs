use std::{fmt, sync::Arc};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Structured logging collaborator injected into a saga run.
///
/// Metadata is expected to be a JSON object of fields such as `saga_id`,
/// `step` and `error`.
pub trait SagaLogger: Send + Sync {
    fn record(&self, level: LogLevel, message: &str, metadata: &Value);

    fn log(&self, message: &str, metadata: &Value) {
        self.record(LogLevel::Info, message, metadata)
    }

    fn debug(&self, message: &str, metadata: &Value) {
        self.record(LogLevel::Debug, message, metadata)
    }

    fn warn(&self, message: &str, metadata: &Value) {
        self.record(LogLevel::Warn, message, metadata)
    }

    fn error(&self, message: &str, metadata: &Value) {
        self.record(LogLevel::Error, message, metadata)
    }
}

impl<L: SagaLogger + ?Sized> SagaLogger for Arc<L> {
    fn record(&self, level: LogLevel, message: &str, metadata: &Value) {
        (**self).record(level, message, metadata)
    }
}

impl<L: SagaLogger + ?Sized> SagaLogger for &L {
    fn record(&self, level: LogLevel, message: &str, metadata: &Value) {
        (**self).record(level, message, metadata)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
}

impl From<LogLevel> for log::Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warn => write!(f, "warn"),
            Self::Info => write!(f, "info"),
            Self::Debug => write!(f, "debug"),
        }
    }
}

/// A single captured log line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    pub metadata: Value,
}

impl LogEntry {
    /// Looks up a top level metadata field.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.metadata.get(name)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use serde_json::json;

    use super::*;

    #[derive(Default)]
    struct Collect {
        levels: Mutex<Vec<LogLevel>>,
    }

    impl SagaLogger for Collect {
        fn record(&self, level: LogLevel, _message: &str, _metadata: &Value) {
            self.levels.lock().expect("levels lock").push(level);
        }
    }

    #[test]
    fn test_provided_methods_map_to_levels() {
        let logger = Collect::default();
        let metadata = json!({});
        logger.log("a", &metadata);
        logger.debug("b", &metadata);
        logger.warn("c", &metadata);
        logger.error("d", &metadata);
        assert_eq!(
            vec![
                LogLevel::Info,
                LogLevel::Debug,
                LogLevel::Warn,
                LogLevel::Error
            ],
            *logger.levels.lock().unwrap()
        );
    }

    #[test]
    fn test_shared_logger_forwards() {
        let logger = Arc::new(Collect::default());
        let shared: Arc<dyn SagaLogger> = logger.clone();
        shared.warn("shared", &json!({ "step": "a" }));
        (&*logger).error("borrowed", &json!({}));
        assert_eq!(2, logger.levels.lock().unwrap().len());
    }

    #[test]
    fn test_level_serializes_lowercase() {
        let entry = LogEntry {
            level: LogLevel::Warn,
            message: "m".to_string(),
            metadata: json!({ "step": "upload" }),
        };
        let serialized = serde_json::to_value(&entry).unwrap();
        assert_eq!(json!("warn"), serialized["level"]);
        assert_eq!(Some(&json!("upload")), entry.field("step"));
        assert_eq!(log::Level::Warn, log::Level::from(entry.level));
    }
}
