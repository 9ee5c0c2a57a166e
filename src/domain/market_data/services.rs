use crate::domain::{
    logging::{LogComponent, get_logger},
    market_data::{ChartPoint, DateFormatter, RawBarPoint},
};

/// Domain service turning API bars into chart points
pub struct ChartDataService<'a> {
    formatter: &'a dyn DateFormatter,
}

impl<'a> ChartDataService<'a> {
    pub fn new(formatter: &'a dyn DateFormatter) -> Self {
        Self { formatter }
    }

    /// One point per bar, in the order the API returned them.
    pub fn prepare(&self, bars: &[RawBarPoint]) -> Vec<ChartPoint> {
        let points: Vec<ChartPoint> =
            bars.iter().map(|bar| bar.to_chart_point(self.formatter)).collect();

        let without_indicators = points.iter().filter(|p| !p.has_indicators()).count();
        if without_indicators > 0 {
            get_logger().debug(
                LogComponent::Domain("ChartData"),
                &format!("{} of {} bars carry no indicators", without_indicators, points.len()),
            );
        }

        points
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::market_data::{BarTimestamp, BollingerBands, RawBar, RawIndicators};

    struct IsoDate;

    impl DateFormatter for IsoDate {
        fn format_date(&self, timestamp: &BarTimestamp) -> String {
            match timestamp {
                BarTimestamp::Millis(ms) => format!("t{}", ms),
                BarTimestamp::Text(text) => text[..10].to_string(),
            }
        }
    }

    fn bar(close: f64, indicators: Option<RawIndicators>) -> RawBarPoint {
        RawBarPoint {
            bar: RawBar {
                timestamp: BarTimestamp::from("2024-01-02T00:00:00Z"),
                open: 100.0,
                high: 105.0,
                low: 99.0,
                close,
                volume: 1000.0,
            },
            indicators,
        }
    }

    #[test]
    fn prepare_keeps_order() {
        let bars = vec![bar(1.0, None), bar(2.0, None), bar(3.0, None)];
        let points = ChartDataService::new(&IsoDate).prepare(&bars);
        let closes: Vec<f64> = points.iter().map(|p| p.close).collect();
        assert_eq!(closes, vec![1.0, 2.0, 3.0]);
        assert_eq!(points[0].date, "2024-01-02");
    }

    #[test]
    fn partial_bands_stay_partial() {
        let indicators = RawIndicators {
            bollinger_bands: Some(BollingerBands { upper: Some(110.0), ..Default::default() }),
            ..Default::default()
        };
        let points = ChartDataService::new(&IsoDate).prepare(&[bar(102.0, Some(indicators))]);
        assert_eq!(points[0].upper_bb, Some(110.0));
        assert_eq!(points[0].middle_bb, None);
        assert_eq!(points[0].lower_bb, None);
        assert_eq!(points[0].macd, None);
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert!(ChartDataService::new(&IsoDate).prepare(&[]).is_empty());
    }
}
