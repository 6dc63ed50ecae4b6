use serde_json::Value;

use super::logger::{LogLevel, SagaLogger};

pub const DEFAULT_TARGET: &str = "saga";

/// Forwards saga log lines to the `log` crate facade.
///
/// Metadata is appended to the message as compact JSON so any `log` backend
/// keeps the structured fields.
#[derive(Debug, Clone)]
pub struct LogFacade {
    target: String,
}

impl LogFacade {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }
}

impl Default for LogFacade {
    fn default() -> Self {
        Self::new(DEFAULT_TARGET)
    }
}

impl SagaLogger for LogFacade {
    fn record(&self, level: LogLevel, message: &str, metadata: &Value) {
        let level = log::Level::from(level);
        if !log::log_enabled!(target: self.target.as_str(), level) {
            return;
        }
        match metadata {
            Value::Null => log::log!(target: self.target.as_str(), level, "{message}"),
            Value::Object(fields) if fields.is_empty() => {
                log::log!(target: self.target.as_str(), level, "{message}")
            }
            _ => log::log!(target: self.target.as_str(), level, "{message} {metadata}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use serde_json::json;

    use super::*;

    struct Capture {
        lines: Mutex<Vec<(log::Level, String, String)>>,
    }

    impl log::Log for Capture {
        fn enabled(&self, _: &log::Metadata) -> bool {
            true
        }

        fn log(&self, record: &log::Record) {
            self.lines.lock().unwrap().push((
                record.level(),
                record.target().to_string(),
                record.args().to_string(),
            ));
        }

        fn flush(&self) {}
    }

    static CAPTURE: Capture = Capture {
        lines: Mutex::new(Vec::new()),
    };

    // tests share one global logger, so each filters on its own target
    fn captured(target: &str) -> Vec<(log::Level, String)> {
        CAPTURE
            .lines
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, line_target, _)| line_target == target)
            .map(|(level, _, message)| (*level, message.clone()))
            .collect()
    }

    fn install() {
        let _ = log::set_logger(&CAPTURE);
        log::set_max_level(log::LevelFilter::Trace);
    }

    #[test]
    fn test_default_target() {
        assert_eq!(DEFAULT_TARGET, LogFacade::default().target());
        assert_eq!("property", LogFacade::new("property").target());
    }

    #[test]
    fn test_metadata_is_appended_as_json() {
        install();
        LogFacade::new("property").warn("step failed", &json!({ "step": "a" }));

        assert_eq!(
            vec![(log::Level::Warn, r#"step failed {"step":"a"}"#.to_string())],
            captured("property")
        );
    }

    #[test]
    fn test_empty_metadata_logs_plain_message() {
        install();
        let logger = LogFacade::new("plain");
        logger.debug("saga started", &Value::Null);
        logger.error("step failed", &json!({}));

        assert_eq!(
            vec![
                (log::Level::Debug, "saga started".to_string()),
                (log::Level::Error, "step failed".to_string()),
            ],
            captured("plain")
        );
    }
}
