use crate::domain::{
    logging::{LogEntry, LogLevel, Logger, TimeProvider},
    market_data::{BarTimestamp, DateFormatter},
};
use js_sys::Date;
use wasm_bindgen::JsValue;

/// Logger writing to the browser console
pub struct ConsoleLogger {
    min_level: LogLevel,
}

impl ConsoleLogger {
    pub fn new(min_level: LogLevel) -> Self {
        Self { min_level }
    }

    pub fn new_production() -> Self {
        Self::new(LogLevel::Info)
    }

    pub fn new_development() -> Self {
        Self::new(LogLevel::Debug)
    }
}

impl Logger for ConsoleLogger {
    fn log(&self, entry: LogEntry) {
        if entry.level < self.min_level {
            return;
        }
        let formatted = JsValue::from_str(&entry.format_line());
        match entry.level {
            LogLevel::Trace | LogLevel::Debug => web_sys::console::debug_1(&formatted),
            LogLevel::Info => web_sys::console::info_1(&formatted),
            LogLevel::Warn => web_sys::console::warn_1(&formatted),
            LogLevel::Error => web_sys::console::error_1(&formatted),
        }
    }
}

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
        Date::now() as u64
    }

    fn format_timestamp(&self, timestamp: u64) -> String {
        let date = Date::new(&JsValue::from_f64(timestamp as f64));
        format!(
            "{:02}:{:02}:{:02}.{:03}",
            date.get_hours(),
            date.get_minutes(),
            date.get_seconds(),
            date.get_milliseconds()
        )
    }
}

/// Date labels in the user's locale, e.g. `1/2/2024` for en-US
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserDateFormatter;

impl DateFormatter for BrowserDateFormatter {
    fn format_date(&self, timestamp: &BarTimestamp) -> String {
        let value = match timestamp {
            BarTimestamp::Millis(ms) => JsValue::from_f64(*ms),
            BarTimestamp::Text(text) => JsValue::from_str(text),
        };
        Date::new(&value).to_locale_date_string("default", &JsValue::UNDEFINED).into()
    }
}
