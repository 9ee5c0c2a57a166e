use super::{
    entities::{AxisScale, PanelLayout},
    value_objects::{PanelSpec, SeriesField, SeriesStyle, ValueDomain, ValueRange},
};
use crate::domain::market_data::ChartPoint;

/// Minimum horizontal gap between time-axis labels, in pixels
pub const MIN_TICK_GAP: f64 = 20.0;

/// Contiguous run of present values; a missing value ends the run.
pub type Segment = Vec<(usize, f64)>;

/// Domain service computing panel geometry from chart points
pub struct ChartGeometryService;

impl ChartGeometryService {
    pub fn new() -> Self {
        Self
    }

    /// Value axis for a panel. `None` when an auto-scaled panel has nothing
    /// to show.
    pub fn value_axis(&self, spec: &PanelSpec, points: &[ChartPoint], tick_count: usize) -> Option<AxisScale> {
        let tick_count = tick_count.max(2);
        match spec.domain {
            ValueDomain::Fixed { min, max } => {
                let range = ValueRange::new(min, max);
                Some(AxisScale { range, step: nice_step(range.span() / (tick_count - 1) as f64) })
            }
            ValueDomain::Auto => {
                let range = self.data_range(spec, points)?;
                nice_scale(range, tick_count)
            }
        }
    }

    /// Raw min/max over every bound series. Bar series pull in the zero
    /// baseline they are drawn from.
    pub fn data_range(&self, spec: &PanelSpec, points: &[ChartPoint]) -> Option<ValueRange> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut seen = false;

        for series in &spec.series {
            let mut series_seen = false;
            for point in points {
                if let Some(v) = series.field.value(point) {
                    min = min.min(v);
                    max = max.max(v);
                    series_seen = true;
                }
            }
            seen |= series_seen;
            if series.style == SeriesStyle::Bar && series_seen {
                min = min.min(0.0);
                max = max.max(0.0);
            }
        }

        seen.then(|| ValueRange::new(min, max))
    }

    /// Splits a series into drawable runs. Gaps are never interpolated.
    pub fn segments(&self, points: &[ChartPoint], field: SeriesField) -> Vec<Segment> {
        let mut segments = Vec::new();
        let mut current: Segment = Vec::new();

        for (i, point) in points.iter().enumerate() {
            match field.value(point) {
                Some(v) => current.push((i, v)),
                None => {
                    if !current.is_empty() {
                        segments.push(std::mem::take(&mut current));
                    }
                }
            }
        }
        if !current.is_empty() {
            segments.push(current);
        }

        segments
    }

    /// Indices of points that get a time-axis label, keeping labels at
    /// least `min_gap` pixels apart.
    pub fn time_tick_indices(&self, count: usize, layout: &PanelLayout, label_width: f64, min_gap: f64) -> Vec<usize> {
        if count == 0 {
            return Vec::new();
        }
        let band = layout.band_width(count);
        let every = if band <= 0.0 {
            count
        } else {
            ((label_width + min_gap) / band).ceil().max(1.0) as usize
        };
        (0..count).step_by(every).collect()
    }

    /// Rectangle `(x, y, width, height)` of a histogram bar
    pub fn bar_rect(&self, layout: &PanelLayout, index: usize, count: usize, value: f64, range: &ValueRange) -> (f64, f64, f64, f64) {
        let band = layout.band_width(count);
        let width = (band * 0.8).max(1.0);
        let x = layout.x_for(index, count) - width / 2.0;
        let zero = layout.y_for(0.0_f64.clamp(range.min, range.max), range);
        let top = layout.y_for(value, range);
        (x, zero.min(top), width, (zero - top).abs())
    }

    /// Tooltip body for one point: the date, then each series present.
    pub fn tooltip_lines(&self, spec: &PanelSpec, point: &ChartPoint) -> Vec<String> {
        let mut lines = vec![point.date.clone()];
        lines.extend(
            spec.series
                .iter()
                .filter_map(|s| s.field.value(point).map(|v| format!("{}: {}", s.name, format_value(v)))),
        );
        lines
    }
}

impl Default for ChartGeometryService {
    fn default() -> Self {
        Self::new()
    }
}

/// Round a raw step to 1, 2, 2.5 or 5 times a power of ten
pub fn nice_step(raw: f64) -> f64 {
    if !raw.is_finite() || raw <= 0.0 {
        return 1.0;
    }
    let magnitude = 10f64.powf(raw.log10().floor());
    let normalized = raw / magnitude;
    let nice = if normalized <= 1.0 {
        1.0
    } else if normalized <= 2.0 {
        2.0
    } else if normalized <= 2.5 {
        2.5
    } else if normalized <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

/// Expand a data range outward to whole tick steps. `None` when the span
/// overflows `f64`.
pub fn nice_scale(range: ValueRange, tick_count: usize) -> Option<AxisScale> {
    if !range.span().is_finite() {
        return None;
    }
    let (min, max) = if range.span() <= 0.0 {
        let pad = if range.min == 0.0 { 1.0 } else { range.min.abs() * 0.05 };
        (range.min - pad, range.max + pad)
    } else {
        (range.min, range.max)
    };
    let step = nice_step((max - min) / (tick_count.max(2) - 1) as f64);
    let scale = AxisScale {
        range: ValueRange::new((min / step).floor() * step, (max / step).ceil() * step),
        step,
    };
    scale.range.span().is_finite().then_some(scale)
}

/// Axis and tooltip number format
pub fn format_value(value: f64) -> String {
    if value.abs() >= 1_000_000.0 {
        format!("{:.2}M", value / 1_000_000.0)
    } else if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chart::PanelKind;

    fn point(close: f64, rsi: Option<f64>, hist: Option<f64>) -> ChartPoint {
        ChartPoint {
            date: "1/2/2024".into(),
            open: close,
            high: close,
            low: close,
            close,
            volume: 0.0,
            rsi,
            sma_20: None,
            ema_20: None,
            upper_bb: None,
            middle_bb: None,
            lower_bb: None,
            macd: None,
            macd_signal: None,
            macd_hist: hist,
        }
    }

    #[test]
    fn missing_values_split_segments() {
        let svc = ChartGeometryService::new();
        let points = vec![
            point(1.0, Some(40.0), None),
            point(2.0, None, None),
            point(3.0, Some(60.0), None),
            point(4.0, Some(70.0), None),
        ];
        let segs = svc.segments(&points, SeriesField::Rsi);
        assert_eq!(segs, vec![vec![(0, 40.0)], vec![(2, 60.0), (3, 70.0)]]);
        assert_eq!(svc.segments(&points, SeriesField::Close).len(), 1);
    }

    #[test]
    fn rsi_axis_ignores_data() {
        let svc = ChartGeometryService::new();
        let spec = PanelSpec::for_kind(PanelKind::Rsi);
        let points = vec![point(1.0, Some(55.0), None)];
        let scale = svc.value_axis(&spec, &points, 5).unwrap();
        assert_eq!(scale.range, ValueRange::new(0.0, 100.0));
        assert_eq!(scale.ticks(), vec![0.0, 25.0, 50.0, 75.0, 100.0]);
        assert!(svc.value_axis(&spec, &[], 5).is_some());
    }

    #[test]
    fn histogram_includes_zero_baseline() {
        let svc = ChartGeometryService::new();
        let spec = PanelSpec::for_kind(PanelKind::Macd);
        let points = vec![point(1.0, None, Some(2.0)), point(1.0, None, Some(3.0))];
        let range = svc.data_range(&spec, &points).unwrap();
        assert_eq!(range, ValueRange::new(0.0, 3.0));
    }

    #[test]
    fn auto_axis_without_data_is_none() {
        let svc = ChartGeometryService::new();
        let spec = PanelSpec::for_kind(PanelKind::Macd);
        let points = vec![point(1.0, None, None)];
        assert_eq!(svc.value_axis(&spec, &points, 5), None);
    }

    #[test]
    fn price_axis_rounds_outward() {
        let scale = nice_scale(ValueRange::new(99.0, 105.0), 5).unwrap();
        assert_eq!(scale.step, 2.0);
        assert_eq!(scale.range, ValueRange::new(98.0, 106.0));
    }

    #[test]
    fn overflowing_span_has_no_axis() {
        let svc = ChartGeometryService::new();
        let spec = PanelSpec::for_kind(PanelKind::Price);
        let points = vec![point(1e308, None, None), point(-1e308, None, None)];
        assert_eq!(svc.value_axis(&spec, &points, 5), None);
        assert_eq!(nice_scale(ValueRange::new(-f64::MAX, f64::MAX), 5), None);
    }

    #[test]
    fn flat_series_still_gets_a_span() {
        let scale = nice_scale(ValueRange::new(100.0, 100.0), 5).unwrap();
        assert!(scale.range.min < 100.0 && scale.range.max > 100.0);
    }

    #[test]
    fn labels_are_thinned() {
        let svc = ChartGeometryService::new();
        let layout = PanelLayout::new(880.0, 200.0, false);
        // 100 points over 800px -> 8px bands; 60px label + 20px gap -> every 10th
        let ticks = svc.time_tick_indices(100, &layout, 60.0, MIN_TICK_GAP);
        assert_eq!(ticks.len(), 10);
        assert_eq!(ticks[1], 10);
        assert_eq!(svc.time_tick_indices(2, &layout, 60.0, MIN_TICK_GAP), vec![0, 1]);
    }

    #[test]
    fn negative_bars_hang_below_zero() {
        let svc = ChartGeometryService::new();
        let layout = PanelLayout::new(880.0, 200.0, false);
        let range = ValueRange::new(-2.0, 2.0);
        let (_, y, _, h) = svc.bar_rect(&layout, 0, 4, -1.0, &range);
        assert_eq!(y, layout.y_for(0.0, &range));
        assert_eq!(h, layout.y_for(-1.0, &range) - y);
    }

    #[test]
    fn tooltip_lists_present_series_only() {
        let svc = ChartGeometryService::new();
        let spec = PanelSpec::for_kind(PanelKind::Price);
        let lines = svc.tooltip_lines(&spec, &point(102.5, None, None));
        assert_eq!(lines, vec!["1/2/2024".to_string(), "Close: 102.50".to_string()]);
    }

    #[test]
    fn values_are_formatted_compactly() {
        assert_eq!(format_value(55.0), "55");
        assert_eq!(format_value(0.1234), "0.12");
        assert_eq!(format_value(2_500_000.0), "2.50M");
    }
}
