use stock_dashboard_wasm::app::TooltipData;
use stock_dashboard_wasm::domain::chart::{
    ChartGeometryService, PanelKind, PanelLayout, PanelSpec, SeriesField, ValueRange,
};
use stock_dashboard_wasm::domain::market_data::ChartPoint;
use strum::IntoEnumIterator;

fn point(date: &str, close: f64) -> ChartPoint {
    ChartPoint {
        date: date.into(),
        open: close - 1.0,
        high: close + 2.0,
        low: close - 3.0,
        close,
        volume: 1000.0,
        rsi: None,
        sma_20: None,
        ema_20: None,
        upper_bb: None,
        middle_bb: None,
        lower_bb: None,
        macd: None,
        macd_signal: None,
        macd_hist: None,
    }
}

#[test]
fn price_tooltip_lists_present_series() {
    let mut p = point("1/2/2024", 102.0);
    p.upper_bb = Some(108.25);
    p.sma_20 = Some(101.5);

    let tooltip = TooltipData::new(&PanelSpec::for_kind(PanelKind::Price), 3, &p, 10.0, 20.0);
    insta::assert_snapshot!(tooltip.formatted_text(), @r"
    1/2/2024
    Close: 102
    Upper BB: 108.25
    SMA 20: 101.50
    ");
}

#[test]
fn macd_tooltip_names_signal_and_histogram() {
    let mut p = point("1/3/2024", 1.0);
    p.macd = Some(0.5);
    p.macd_signal = Some(0.25);
    p.macd_hist = Some(-0.25);

    let lines = ChartGeometryService::new().tooltip_lines(&PanelSpec::for_kind(PanelKind::Macd), &p);
    assert_eq!(lines, vec!["1/3/2024", "MACD: 0.50", "Signal: 0.25", "Histogram: -0.25"]);
}

#[test]
fn points_without_indicators_still_lay_out() {
    let svc = ChartGeometryService::new();
    let points: Vec<ChartPoint> = (0..30).map(|i| point(&format!("1/{}/2024", i + 1), 100.0 + i as f64)).collect();

    for kind in PanelKind::iter() {
        let spec = PanelSpec::for_kind(kind);
        let layout = PanelLayout::new(960.0, spec.height as f64, spec.show_legend);
        let axis = svc.value_axis(&spec, &points, 5);
        match kind {
            PanelKind::Price => assert!(axis.is_some()),
            PanelKind::Rsi => assert_eq!(axis.map(|a| a.range), Some(ValueRange::new(0.0, 100.0))),
            PanelKind::Macd => assert!(axis.is_none()),
        }
        for series in &spec.series {
            let segments = svc.segments(&points, series.field);
            if series.field != SeriesField::Close {
                assert!(segments.is_empty());
            }
        }
        assert!(!svc.time_tick_indices(points.len(), &layout, 63.0, 20.0).is_empty());
    }
}

#[test]
fn rsi_axis_ignores_data_extremes() {
    let mut p = point("1/2/2024", 1.0);
    p.rsi = Some(99.9);
    let axis = ChartGeometryService::new()
        .value_axis(&PanelSpec::for_kind(PanelKind::Rsi), &[p], 5)
        .unwrap();
    assert_eq!(axis.range, ValueRange::new(0.0, 100.0));
    assert_eq!(axis.ticks(), vec![0.0, 25.0, 50.0, 75.0, 100.0]);
}

#[test]
fn macd_axis_includes_zero_baseline() {
    let points: Vec<ChartPoint> = [0.4, 0.6, 0.8]
        .iter()
        .map(|h| {
            let mut p = point("d", 1.0);
            p.macd = Some(h + 1.0);
            p.macd_hist = Some(*h);
            p
        })
        .collect();
    let axis = ChartGeometryService::new()
        .value_axis(&PanelSpec::for_kind(PanelKind::Macd), &points, 5)
        .unwrap();
    assert!(axis.range.min <= 0.0);
    assert!(axis.range.max >= 1.8);
}

#[test]
fn time_labels_keep_their_distance() {
    let layout = PanelLayout::new(960.0, 400.0, true);
    let count = 250;
    let ticks = ChartGeometryService::new().time_tick_indices(count, &layout, 63.0, 20.0);
    let band = layout.band_width(count);
    for pair in ticks.windows(2) {
        assert!((pair[1] - pair[0]) as f64 * band >= 83.0);
    }
    assert_eq!(ticks[0], 0);
}
