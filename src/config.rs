use crate::domain::{
    market_data::{Symbol, default_symbols},
    state::RefreshPolicy,
};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_SYMBOL: &str = "AAPL";

/// Compile-time dashboard settings
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub api_base_url: String,
    pub default_symbol: Symbol,
    pub symbols: Vec<Symbol>,
    pub refresh_policy: RefreshPolicy,
    /// Canvas width until the panel container has a measured width
    pub fallback_panel_width: u32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            default_symbol: Symbol::from(DEFAULT_SYMBOL),
            symbols: default_symbols(),
            refresh_policy: RefreshPolicy::default(),
            fallback_panel_width: 960,
        }
    }
}

impl DashboardConfig {
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.api_base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Also adds the symbol to the selector when missing
    pub fn with_symbol(mut self, symbol: Symbol) -> Self {
        if !self.symbols.contains(&symbol) {
            self.symbols.insert(0, symbol.clone());
        }
        self.default_symbol = symbol;
        self
    }

    pub fn with_refresh_policy(mut self, policy: RefreshPolicy) -> Self {
        self.refresh_policy = policy;
        self
    }

    pub fn with_fallback_panel_width(mut self, width: u32) -> Self {
        self.fallback_panel_width = width;
        self
    }
}
