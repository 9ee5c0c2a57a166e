use crate::domain::errors::AppError;
use derive_more::{Deref, Display};
use serde::{Deserialize, Serialize};

/// Value Object - Ticker symbol
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deref, Display, Serialize, Deserialize)]
#[display(fmt = "{}", _0)]
pub struct Symbol(String);

impl Symbol {
    pub fn new(symbol: String) -> Result<Self, AppError> {
        let trimmed = symbol.trim();
        if trimmed.is_empty() {
            return Err(AppError::Validation("Symbol cannot be empty".to_string()));
        }
        Ok(Self(trimmed.to_uppercase()))
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Symbol {
    fn from(value: &str) -> Self {
        Self(value.to_uppercase())
    }
}

/// Symbols offered by the selector
pub fn default_symbols() -> Vec<Symbol> {
    vec![
        Symbol::from("AAPL"),
        Symbol::from("MSFT"),
        Symbol::from("GOOGL"),
        Symbol::from("AMZN"),
        Symbol::from("TSLA"),
    ]
}

/// Value Object - Bar timestamp as the API sends it: epoch milliseconds or an
/// RFC 3339 string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BarTimestamp {
    Millis(f64),
    Text(String),
}

impl BarTimestamp {
    pub fn as_millis(&self) -> Option<f64> {
        match self {
            BarTimestamp::Millis(ms) => Some(*ms),
            BarTimestamp::Text(_) => None,
        }
    }
}

impl From<u64> for BarTimestamp {
    fn from(value: u64) -> Self {
        BarTimestamp::Millis(value as f64)
    }
}

impl From<&str> for BarTimestamp {
    fn from(value: &str) -> Self {
        BarTimestamp::Text(value.to_string())
    }
}

/// Turns a bar timestamp into the label shown on the time axis.
/// The browser implementation uses the user's locale.
pub trait DateFormatter {
    fn format_date(&self, timestamp: &BarTimestamp) -> String;
}
