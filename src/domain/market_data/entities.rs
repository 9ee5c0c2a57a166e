pub use super::value_objects::{BarTimestamp, DateFormatter};
use serde::{Deserialize, Serialize};

/// One OHLCV observation as served by the chart API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawBar {
    pub timestamp: BarTimestamp,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BollingerBands {
    pub upper: Option<f64>,
    pub middle: Option<f64>,
    pub lower: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MacdValues {
    pub macd: Option<f64>,
    pub signal: Option<f64>,
    pub histogram: Option<f64>,
}

/// Precomputed indicators attached to a bar. Any part may be absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawIndicators {
    pub rsi: Option<f64>,
    pub sma_20: Option<f64>,
    pub ema_20: Option<f64>,
    pub bollinger_bands: Option<BollingerBands>,
    pub macd: Option<MacdValues>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawBarPoint {
    pub bar: RawBar,
    #[serde(default)]
    pub indicators: Option<RawIndicators>,
}

impl RawBarPoint {
    pub fn rsi(&self) -> Option<f64> {
        self.indicators.as_ref().and_then(|i| i.rsi)
    }

    pub fn sma_20(&self) -> Option<f64> {
        self.indicators.as_ref().and_then(|i| i.sma_20)
    }

    pub fn ema_20(&self) -> Option<f64> {
        self.indicators.as_ref().and_then(|i| i.ema_20)
    }

    fn bands(&self) -> Option<&BollingerBands> {
        self.indicators.as_ref().and_then(|i| i.bollinger_bands.as_ref())
    }

    fn macd_values(&self) -> Option<&MacdValues> {
        self.indicators.as_ref().and_then(|i| i.macd.as_ref())
    }

    /// Flattens the bar into the view model. Absent nested indicator
    /// objects resolve to `None`.
    pub fn to_chart_point(&self, formatter: &dyn DateFormatter) -> ChartPoint {
        ChartPoint {
            date: formatter.format_date(&self.bar.timestamp),
            open: self.bar.open,
            high: self.bar.high,
            low: self.bar.low,
            close: self.bar.close,
            volume: self.bar.volume,
            rsi: self.rsi(),
            sma_20: self.sma_20(),
            ema_20: self.ema_20(),
            upper_bb: self.bands().and_then(|b| b.upper),
            middle_bb: self.bands().and_then(|b| b.middle),
            lower_bb: self.bands().and_then(|b| b.lower),
            macd: self.macd_values().and_then(|m| m.macd),
            macd_signal: self.macd_values().and_then(|m| m.signal),
            macd_hist: self.macd_values().and_then(|m| m.histogram),
        }
    }
}

/// Flat per-bar record the chart panels bind to
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub date: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub rsi: Option<f64>,
    #[serde(rename = "sma20")]
    pub sma_20: Option<f64>,
    #[serde(rename = "ema20")]
    pub ema_20: Option<f64>,
    #[serde(rename = "upperBB")]
    pub upper_bb: Option<f64>,
    #[serde(rename = "middleBB")]
    pub middle_bb: Option<f64>,
    #[serde(rename = "lowerBB")]
    pub lower_bb: Option<f64>,
    pub macd: Option<f64>,
    #[serde(rename = "macdSignal")]
    pub macd_signal: Option<f64>,
    #[serde(rename = "macdHist")]
    pub macd_hist: Option<f64>,
}

impl ChartPoint {
    pub fn has_indicators(&self) -> bool {
        [
            self.rsi,
            self.sma_20,
            self.ema_20,
            self.upper_bb,
            self.middle_bb,
            self.lower_bb,
            self.macd,
            self.macd_signal,
            self.macd_hist,
        ]
        .iter()
        .any(Option::is_some)
    }
}
