use crate::domain::market_data::ChartPoint;
use derive_more::Display;
use strum::{AsRefStr, EnumIter, EnumString};

/// Value Object - One of the three stacked panels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, AsRefStr)]
pub enum PanelKind {
    #[display(fmt = "Price + Indicators")]
    #[strum(serialize = "price")]
    Price,
    #[display(fmt = "RSI (Relative Strength Index)")]
    #[strum(serialize = "rsi")]
    Rsi,
    #[display(fmt = "MACD (Moving Average Convergence Divergence)")]
    #[strum(serialize = "macd")]
    Macd,
}

/// How a series is drawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SeriesStyle {
    /// Line with the area under it filled
    Area { fill: &'static str, fill_opacity: f64 },
    Line,
    /// Vertical bars from the zero baseline
    Bar,
}

/// ChartPoint field a series is bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, AsRefStr)]
pub enum SeriesField {
    #[strum(serialize = "close")]
    Close,
    #[strum(serialize = "upperBB")]
    UpperBb,
    #[strum(serialize = "middleBB")]
    MiddleBb,
    #[strum(serialize = "lowerBB")]
    LowerBb,
    #[strum(serialize = "sma20")]
    Sma20,
    #[strum(serialize = "ema20")]
    Ema20,
    #[strum(serialize = "rsi")]
    Rsi,
    #[strum(serialize = "macd")]
    Macd,
    #[strum(serialize = "macdSignal")]
    MacdSignal,
    #[strum(serialize = "macdHist")]
    MacdHist,
}

impl SeriesField {
    pub fn value(&self, point: &ChartPoint) -> Option<f64> {
        let value = match self {
            SeriesField::Close => Some(point.close),
            SeriesField::UpperBb => point.upper_bb,
            SeriesField::MiddleBb => point.middle_bb,
            SeriesField::LowerBb => point.lower_bb,
            SeriesField::Sma20 => point.sma_20,
            SeriesField::Ema20 => point.ema_20,
            SeriesField::Rsi => point.rsi,
            SeriesField::Macd => point.macd,
            SeriesField::MacdSignal => point.macd_signal,
            SeriesField::MacdHist => point.macd_hist,
        };
        value.filter(|v| v.is_finite())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesSpec {
    pub field: SeriesField,
    pub style: SeriesStyle,
    pub color: &'static str,
    pub name: &'static str,
}

impl SeriesSpec {
    pub const fn line(field: SeriesField, color: &'static str, name: &'static str) -> Self {
        Self { field, style: SeriesStyle::Line, color, name }
    }
}

/// Value axis behaviour
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValueDomain {
    /// Fit to the data present
    Auto,
    Fixed { min: f64, max: f64 },
}

/// Declarative description of a panel: what to bind and how to draw it
#[derive(Debug, Clone, PartialEq)]
pub struct PanelSpec {
    pub kind: PanelKind,
    pub height: u32,
    pub domain: ValueDomain,
    pub series: Vec<SeriesSpec>,
    pub show_legend: bool,
}

impl PanelSpec {
    pub fn for_kind(kind: PanelKind) -> Self {
        match kind {
            PanelKind::Price => Self {
                kind,
                height: 400,
                domain: ValueDomain::Auto,
                series: vec![
                    SeriesSpec {
                        field: SeriesField::Close,
                        style: SeriesStyle::Area { fill: "#8884d8", fill_opacity: 0.2 },
                        color: "#000",
                        name: "Close",
                    },
                    SeriesSpec::line(SeriesField::UpperBb, "red", "Upper BB"),
                    SeriesSpec::line(SeriesField::MiddleBb, "orange", "Middle BB"),
                    SeriesSpec::line(SeriesField::LowerBb, "green", "Lower BB"),
                    SeriesSpec::line(SeriesField::Sma20, "blue", "SMA 20"),
                    SeriesSpec::line(SeriesField::Ema20, "purple", "EMA 20"),
                ],
                show_legend: true,
            },
            PanelKind::Rsi => Self {
                kind,
                height: 200,
                domain: ValueDomain::Fixed { min: 0.0, max: 100.0 },
                series: vec![SeriesSpec::line(SeriesField::Rsi, "purple", "RSI")],
                show_legend: false,
            },
            PanelKind::Macd => Self {
                kind,
                height: 250,
                domain: ValueDomain::Auto,
                series: vec![
                    SeriesSpec::line(SeriesField::Macd, "blue", "MACD"),
                    SeriesSpec::line(SeriesField::MacdSignal, "red", "Signal"),
                    SeriesSpec {
                        field: SeriesField::MacdHist,
                        style: SeriesStyle::Bar,
                        color: "gray",
                        name: "Histogram",
                    },
                ],
                show_legend: true,
            },
        }
    }

    pub fn title(&self) -> String {
        self.kind.to_string()
    }
}

/// Value Object - Inclusive value range of an axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}
