//! Structured logging behind a process-wide sink.
//!
//! Domain and application code only see [`Logger`]; the browser console
//! implementation is installed at start-up. Until then entries are dropped
//! and stamped by a sequence counter, which keeps native tests quiet.

use derive_more::Display;
use std::fmt;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};
use strum::AsRefStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, AsRefStr)]
#[strum(serialize_all = "UPPERCASE")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

/// Layer the log line originates from
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum LogComponent {
    #[display(fmt = "DOM:{}", _0)]
    Domain(&'static str),
    #[display(fmt = "APP:{}", _0)]
    Application(&'static str),
    #[display(fmt = "INF:{}", _0)]
    Infrastructure(&'static str),
    #[display(fmt = "PRE:{}", _0)]
    Presentation(&'static str),
}

/// `key=value` pair carried next to the message
#[derive(Debug, Clone, PartialEq, Display)]
#[display(fmt = "{}={}", key, value)]
pub struct LogField {
    pub key: &'static str,
    pub value: String,
}

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: u64,
    pub level: LogLevel,
    pub component: LogComponent,
    pub message: String,
    pub fields: Vec<LogField>,
}

impl LogEntry {
    pub fn new(level: LogLevel, component: LogComponent, message: impl Into<String>) -> Self {
        Self {
            timestamp: get_time_provider().current_timestamp(),
            level,
            component,
            message: message.into(),
            fields: Vec::new(),
        }
    }

    pub fn with_field(mut self, key: &'static str, value: impl fmt::Display) -> Self {
        self.fields.push(LogField { key, value: value.to_string() });
        self
    }

    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields.iter().find(|f| f.key == key).map(|f| f.value.as_str())
    }

    /// `[time] LEVEL COMPONENT | message key=value ...`
    pub fn format_line(&self) -> String {
        let mut line = format!(
            "[{}] {:>5} {} | {}",
            get_time_provider().format_timestamp(self.timestamp),
            self.level.as_ref(),
            self.component,
            self.message
        );
        for field in &self.fields {
            line.push(' ');
            line.push_str(&field.to_string());
        }
        line
    }
}

pub trait TimeProvider: Send + Sync {
    fn current_timestamp(&self) -> u64;
    fn format_timestamp(&self, timestamp: u64) -> String;
}

pub trait Logger: Send + Sync {
    fn log(&self, entry: LogEntry);

    fn trace(&self, component: LogComponent, message: &str) {
        self.log(LogEntry::new(LogLevel::Trace, component, message));
    }

    fn debug(&self, component: LogComponent, message: &str) {
        self.log(LogEntry::new(LogLevel::Debug, component, message));
    }

    fn info(&self, component: LogComponent, message: &str) {
        self.log(LogEntry::new(LogLevel::Info, component, message));
    }

    fn warn(&self, component: LogComponent, message: &str) {
        self.log(LogEntry::new(LogLevel::Warn, component, message));
    }

    fn error(&self, component: LogComponent, message: &str) {
        self.log(LogEntry::new(LogLevel::Error, component, message));
    }
}

static SINK: OnceLock<Box<dyn Logger>> = OnceLock::new();
static CLOCK: OnceLock<Box<dyn TimeProvider>> = OnceLock::new();

struct Discard;

impl Logger for Discard {
    fn log(&self, _: LogEntry) {}
}

struct SequenceClock(AtomicU64);

impl TimeProvider for SequenceClock {
    fn current_timestamp(&self) -> u64 {
        self.0.fetch_add(1, Ordering::Relaxed)
    }

    fn format_timestamp(&self, timestamp: u64) -> String {
        format!("#{:06}", timestamp)
    }
}

static FALLBACK_CLOCK: SequenceClock = SequenceClock(AtomicU64::new(0));

/// Install the sink. Returns `false` if one was already installed.
pub fn init_logger(logger: Box<dyn Logger>) -> bool {
    SINK.set(logger).is_ok()
}

pub fn init_time_provider(time_provider: Box<dyn TimeProvider>) -> bool {
    CLOCK.set(time_provider).is_ok()
}

pub fn get_logger() -> &'static dyn Logger {
    match SINK.get() {
        Some(logger) => logger.as_ref(),
        None => &Discard,
    }
}

pub fn get_time_provider() -> &'static dyn TimeProvider {
    match CLOCK.get() {
        Some(clock) => clock.as_ref(),
        None => &FALLBACK_CLOCK,
    }
}

#[doc(hidden)]
#[macro_export]
macro_rules! __log_at {
    ($level:ident, $component:expr, $($arg:tt)*) => {
        $crate::domain::logging::get_logger().log($crate::domain::logging::LogEntry::new(
            $crate::domain::logging::LogLevel::$level,
            $component,
            format!($($arg)*),
        ))
    };
}

/// Compiled out of release builds
#[macro_export]
macro_rules! log_trace {
    ($($arg:tt)*) => {{
        #[cfg(debug_assertions)]
        $crate::__log_at!(Trace, $($arg)*);
    }};
}

/// Compiled out of release builds
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {{
        #[cfg(debug_assertions)]
        $crate::__log_at!(Debug, $($arg)*);
    }};
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        $crate::__log_at!(Info, $($arg)*)
    };
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        $crate::__log_at!(Warn, $($arg)*)
    };
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        $crate::__log_at!(Error, $($arg)*)
    };
}
