use crate::domain::logging::{LogEntry, LogLevel, Logger, TimeProvider, get_time_provider};
use web_sys::console;

/// Browser console implementation of the domain logger
pub struct ConsoleLogger {
    min_level: LogLevel,
}

impl ConsoleLogger {
    pub fn new(min_level: LogLevel) -> Self {
        Self { min_level }
    }

    pub fn new_development() -> Self {
        Self::new(LogLevel::Debug)
    }

    pub fn new_production() -> Self {
        Self::new(LogLevel::Info)
    }
}

impl Logger for ConsoleLogger {
    fn log(&self, entry: LogEntry) {
        if entry.level < self.min_level {
            return;
        }

        let formatted = format!(
            "[{}] {} {}: {}",
            get_time_provider().format_timestamp(entry.timestamp),
            entry.level,
            entry.component,
            entry.message
        );
        let message = wasm_bindgen::JsValue::from_str(&formatted);

        match entry.level {
            LogLevel::Debug => console::debug_1(&message),
            LogLevel::Info => console::log_1(&message),
            LogLevel::Warn => console::warn_1(&message),
            LogLevel::Error => console::error_1(&message),
        }
    }
}

/// `js_sys::Date`-backed time provider
pub struct BrowserTimeProvider;

impl BrowserTimeProvider {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BrowserTimeProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeProvider for BrowserTimeProvider {
    fn current_timestamp(&self) -> u64 {
        js_sys::Date::now() as u64
    }

    fn format_timestamp(&self, timestamp: u64) -> String {
        let secs = timestamp / 1000;
        format!("{:02}:{:02}:{:02}.{:03}", (secs / 3600) % 24, (secs / 60) % 60, secs % 60, timestamp % 1000)
    }
}
