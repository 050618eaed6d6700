use serde::Serialize;
use std::sync::atomic::{AtomicU8, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug = 0,
    Info = 1,
    Warn = 2,
    Error = 3,
}

impl LogLevel {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => LogLevel::Debug,
            1 => LogLevel::Info,
            2 => LogLevel::Warn,
            _ => LogLevel::Error,
        }
    }
}

#[derive(Debug, Serialize)]
struct LogRecord<'a> {
    level: LogLevel,
    component: &'a str,
    message: &'a str,
}

static MIN_LEVEL: AtomicU8 = AtomicU8::new(LogLevel::Info as u8);

/// Component-tagged logging to the browser console
pub struct Logger;

impl Logger {
    /// Drop records below `level`
    pub fn init(level: LogLevel) {
        MIN_LEVEL.store(level as u8, Ordering::Relaxed);
    }

    pub fn enabled(level: LogLevel) -> bool {
        level >= LogLevel::from_u8(MIN_LEVEL.load(Ordering::Relaxed))
    }

    pub fn debug_with_component(component: &str, message: &str) {
        Self::log(LogLevel::Debug, component, message);
    }

    pub fn info_with_component(component: &str, message: &str) {
        Self::log(LogLevel::Info, component, message);
    }

    pub fn warn_with_component(component: &str, message: &str) {
        Self::log(LogLevel::Warn, component, message);
    }

    pub fn error_with_component(component: &str, message: &str) {
        Self::log(LogLevel::Error, component, message);
    }

    fn log(level: LogLevel, component: &str, message: &str) {
        if !Self::enabled(level) {
            return;
        }
        let record = LogRecord { level, component, message };
        let line = serde_json::to_string(&record)
            .unwrap_or_else(|_| format!("[{}] {}", component, message));

        match level {
            LogLevel::Debug => gloo::console::debug!(line),
            LogLevel::Info => gloo::console::info!(line),
            LogLevel::Warn => gloo::console::warn!(line),
            LogLevel::Error => gloo::console::error!(line),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_level_filter() {
        Logger::init(LogLevel::Warn);
        assert!(!Logger::enabled(LogLevel::Info));
        assert!(Logger::enabled(LogLevel::Error));
        Logger::init(LogLevel::Info);
        assert!(Logger::enabled(LogLevel::Info));
        assert!(!Logger::enabled(LogLevel::Debug));
    }

    #[wasm_bindgen_test]
    fn test_record_is_json() {
        let record = LogRecord { level: LogLevel::Warn, component: "api", message: "x" };
        assert_eq!(
            serde_json::to_string(&record).unwrap(),
            r#"{"level":"warn","component":"api","message":"x"}"#
        );
    }
}
