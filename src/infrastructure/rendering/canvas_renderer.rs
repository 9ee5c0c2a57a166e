use js_sys::Array;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::domain::{
    chart::{
        AxisScale, ChartGeometryService, PanelLayout, PanelSpec, SeriesSpec, SeriesStyle, ValueRange,
        services::{MIN_TICK_GAP, format_value},
    },
    errors::{AppError, RenderingResult},
    logging::LogComponent,
    market_data::ChartPoint,
};

const VALUE_TICKS: usize = 5;
const GRID_COLOR: &str = "#cccccc";
const AXIS_TEXT_COLOR: &str = "#666666";
const FONT: &str = "12px sans-serif";

fn js_err(e: JsValue) -> AppError {
    AppError::Rendering(format!("{:?}", e))
}

/// Canvas 2D renderer for one chart panel
pub struct PanelRenderer {
    context: CanvasRenderingContext2d,
    layout: PanelLayout,
    geometry: ChartGeometryService,
}

impl PanelRenderer {
    /// Size the canvas for `spec` and grab its 2D context
    pub fn new(canvas: &HtmlCanvasElement, width: u32, spec: &PanelSpec) -> RenderingResult<Self> {
        canvas.set_width(width);
        canvas.set_height(spec.height);

        let context = canvas
            .get_context("2d")
            .map_err(js_err)?
            .ok_or_else(|| AppError::Rendering("2D context not available".to_string()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| AppError::Rendering("Failed to cast to 2D context".to_string()))?;

        Ok(Self {
            context,
            layout: PanelLayout::new(width as f64, spec.height as f64, spec.show_legend),
            geometry: ChartGeometryService::new(),
        })
    }

    pub fn layout(&self) -> &PanelLayout {
        &self.layout
    }

    /// Redraw the whole panel. `hover` highlights one point.
    pub fn render(&self, spec: &PanelSpec, points: &[ChartPoint], hover: Option<usize>) -> RenderingResult<()> {
        let ctx = &self.context;
        ctx.clear_rect(0.0, 0.0, self.layout.width, self.layout.height);
        ctx.set_font(FONT);

        let Some(axis) = self.geometry.value_axis(spec, points, VALUE_TICKS) else {
            self.render_no_data_message()?;
            if spec.show_legend {
                self.render_legend(&spec.series)?;
            }
            return Ok(());
        };

        self.render_grid(&axis, points)?;
        self.render_value_axis(&axis)?;
        self.render_time_axis(points)?;

        for series in &spec.series {
            match series.style {
                SeriesStyle::Area { fill, fill_opacity } => {
                    self.render_area(series, fill, fill_opacity, points, &axis.range)?;
                    self.render_line(series, points, &axis.range)?;
                }
                SeriesStyle::Line => self.render_line(series, points, &axis.range)?,
                SeriesStyle::Bar => self.render_bars(series, points, &axis.range),
            }
        }

        if let Some(index) = hover.filter(|i| *i < points.len()) {
            self.render_cursor(index, points.len())?;
        }
        if spec.show_legend {
            self.render_legend(&spec.series)?;
        }

        crate::log_trace!(
            LogComponent::Infrastructure("PanelRenderer"),
            "Rendered '{}' with {} points",
            spec.title(),
            points.len()
        );
        Ok(())
    }

    fn set_dash(&self, dash: &[f64]) -> RenderingResult<()> {
        let pattern = Array::new();
        for d in dash {
            pattern.push(&JsValue::from_f64(*d));
        }
        self.context.set_line_dash(&pattern).map_err(js_err)
    }

    fn render_grid(&self, axis: &AxisScale, points: &[ChartPoint]) -> RenderingResult<()> {
        let ctx = &self.context;
        let l = &self.layout;
        ctx.save();
        ctx.set_stroke_style_str(GRID_COLOR);
        ctx.set_line_width(1.0);
        self.set_dash(&[3.0, 3.0])?;

        ctx.begin_path();
        for tick in axis.ticks() {
            let y = l.y_for(tick, &axis.range).round() + 0.5;
            ctx.move_to(l.plot_left(), y);
            ctx.line_to(l.plot_right(), y);
        }
        for index in self.time_ticks(points) {
            let x = l.x_for(index, points.len()).round() + 0.5;
            ctx.move_to(x, l.plot_top());
            ctx.line_to(x, l.plot_bottom());
        }
        ctx.stroke();
        ctx.restore();
        Ok(())
    }

    fn render_value_axis(&self, axis: &AxisScale) -> RenderingResult<()> {
        let ctx = &self.context;
        let l = &self.layout;
        ctx.set_fill_style_str(AXIS_TEXT_COLOR);
        ctx.set_text_align("right");
        ctx.set_text_baseline("middle");
        for tick in axis.ticks() {
            ctx.fill_text(&format_value(tick), l.plot_left() - 6.0, l.y_for(tick, &axis.range))
                .map_err(js_err)?;
        }
        Ok(())
    }

    fn time_ticks(&self, points: &[ChartPoint]) -> Vec<usize> {
        let label_width = points
            .iter()
            .map(|p| p.date.len())
            .max()
            .map(|chars| chars as f64 * 7.0)
            .unwrap_or(0.0);
        self.geometry.time_tick_indices(points.len(), &self.layout, label_width, MIN_TICK_GAP)
    }

    fn render_time_axis(&self, points: &[ChartPoint]) -> RenderingResult<()> {
        let ctx = &self.context;
        let l = &self.layout;
        ctx.set_fill_style_str(AXIS_TEXT_COLOR);
        ctx.set_text_align("center");
        ctx.set_text_baseline("top");
        for index in self.time_ticks(points) {
            ctx.fill_text(&points[index].date, l.x_for(index, points.len()), l.plot_bottom() + 6.0)
                .map_err(js_err)?;
        }
        Ok(())
    }

    fn render_line(&self, series: &SeriesSpec, points: &[ChartPoint], range: &ValueRange) -> RenderingResult<()> {
        let ctx = &self.context;
        ctx.save();
        ctx.set_stroke_style_str(series.color);
        ctx.set_line_width(1.5);
        self.set_dash(&[])?;
        for segment in self.geometry.segments(points, series.field) {
            ctx.begin_path();
            for (n, (index, value)) in segment.iter().enumerate() {
                let x = self.layout.x_for(*index, points.len());
                let y = self.layout.y_for(*value, range);
                if n == 0 {
                    ctx.move_to(x, y);
                } else {
                    ctx.line_to(x, y);
                }
            }
            ctx.stroke();
        }
        ctx.restore();
        Ok(())
    }

    fn render_area(
        &self,
        series: &SeriesSpec,
        fill: &str,
        opacity: f64,
        points: &[ChartPoint],
        range: &ValueRange,
    ) -> RenderingResult<()> {
        let ctx = &self.context;
        let baseline = self.layout.y_for(range.min, range);
        ctx.save();
        ctx.set_fill_style_str(fill);
        ctx.set_global_alpha(opacity);
        for segment in self.geometry.segments(points, series.field) {
            let (Some(first), Some(last)) = (segment.first(), segment.last()) else {
                continue;
            };
            ctx.begin_path();
            ctx.move_to(self.layout.x_for(first.0, points.len()), baseline);
            for (index, value) in &segment {
                ctx.line_to(self.layout.x_for(*index, points.len()), self.layout.y_for(*value, range));
            }
            ctx.line_to(self.layout.x_for(last.0, points.len()), baseline);
            ctx.close_path();
            ctx.fill();
        }
        ctx.restore();
        Ok(())
    }

    fn render_bars(&self, series: &SeriesSpec, points: &[ChartPoint], range: &ValueRange) {
        let ctx = &self.context;
        ctx.set_fill_style_str(series.color);
        for (index, point) in points.iter().enumerate() {
            if let Some(value) = series.field.value(point) {
                let (x, y, w, h) = self.geometry.bar_rect(&self.layout, index, points.len(), value, range);
                ctx.fill_rect(x, y, w, h);
            }
        }
    }

    fn render_cursor(&self, index: usize, count: usize) -> RenderingResult<()> {
        let ctx = &self.context;
        let x = self.layout.x_for(index, count).round() + 0.5;
        ctx.save();
        ctx.set_stroke_style_str(AXIS_TEXT_COLOR);
        ctx.set_line_width(1.0);
        self.set_dash(&[])?;
        ctx.begin_path();
        ctx.move_to(x, self.layout.plot_top());
        ctx.line_to(x, self.layout.plot_bottom());
        ctx.stroke();
        ctx.restore();
        Ok(())
    }

    fn render_legend(&self, series: &[SeriesSpec]) -> RenderingResult<()> {
        let ctx = &self.context;
        let y = self.layout.height - PanelLayout::LEGEND_HEIGHT / 2.0;
        let widths: Vec<f64> = series
            .iter()
            .map(|s| ctx.measure_text(s.name).map(|m| m.width()).unwrap_or(s.name.len() as f64 * 7.0) + 28.0)
            .collect();
        let total: f64 = widths.iter().sum();
        let mut x = (self.layout.width - total) / 2.0;

        ctx.set_text_align("left");
        ctx.set_text_baseline("middle");
        for (s, width) in series.iter().zip(widths) {
            ctx.set_fill_style_str(s.color);
            ctx.fill_rect(x, y - 5.0, 10.0, 10.0);
            ctx.fill_text(s.name, x + 14.0, y).map_err(js_err)?;
            x += width;
        }
        Ok(())
    }

    fn render_no_data_message(&self) -> RenderingResult<()> {
        let ctx = &self.context;
        ctx.set_fill_style_str(AXIS_TEXT_COLOR);
        ctx.set_text_align("center");
        ctx.set_text_baseline("middle");
        ctx.fill_text(
            "No data",
            self.layout.plot_left() + self.layout.plot_width() / 2.0,
            self.layout.plot_top() + self.layout.plot_height() / 2.0,
        )
        .map_err(js_err)
    }
}
