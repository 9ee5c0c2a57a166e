use super::value_objects::ValueRange;

/// Pixel frame of one panel: outer size and the plot area inside the margins
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelLayout {
    pub width: f64,
    pub height: f64,
    pub margin_left: f64,
    pub margin_right: f64,
    pub margin_top: f64,
    pub margin_bottom: f64,
}

impl PanelLayout {
    pub const LEGEND_HEIGHT: f64 = 22.0;

    pub fn new(width: f64, height: f64, with_legend: bool) -> Self {
        let legend = if with_legend { Self::LEGEND_HEIGHT } else { 0.0 };
        Self {
            width,
            height,
            margin_left: 60.0,
            margin_right: 20.0,
            margin_top: 10.0,
            margin_bottom: 30.0 + legend,
        }
    }

    /// Canvas width for a container `container_px` wide. Falls back while
    /// the container has not been laid out yet.
    pub fn fitted_width(container_px: i32, fallback: u32) -> u32 {
        u32::try_from(container_px).ok().filter(|w| *w > 0).unwrap_or(fallback)
    }

    pub fn plot_left(&self) -> f64 {
        self.margin_left
    }

    pub fn plot_right(&self) -> f64 {
        self.width - self.margin_right
    }

    pub fn plot_top(&self) -> f64 {
        self.margin_top
    }

    pub fn plot_bottom(&self) -> f64 {
        self.height - self.margin_bottom
    }

    pub fn plot_width(&self) -> f64 {
        (self.plot_right() - self.plot_left()).max(0.0)
    }

    pub fn plot_height(&self) -> f64 {
        (self.plot_bottom() - self.plot_top()).max(0.0)
    }

    /// Width of the band each point occupies on the time axis
    pub fn band_width(&self, count: usize) -> f64 {
        if count == 0 {
            return 0.0;
        }
        self.plot_width() / count as f64
    }

    /// Horizontal center of point `index`
    pub fn x_for(&self, index: usize, count: usize) -> f64 {
        self.plot_left() + (index as f64 + 0.5) * self.band_width(count)
    }

    pub fn y_for(&self, value: f64, range: &ValueRange) -> f64 {
        let span = range.span();
        if span <= 0.0 {
            return self.plot_top() + self.plot_height() / 2.0;
        }
        self.plot_top() + (range.max - value) / span * self.plot_height()
    }

    /// Point under a horizontal pixel position, if any
    pub fn index_at(&self, x: f64, count: usize) -> Option<usize> {
        if count == 0 || x < self.plot_left() || x >= self.plot_right() {
            return None;
        }
        let idx = ((x - self.plot_left()) / self.band_width(count)).floor() as usize;
        Some(idx.min(count - 1))
    }
}

/// Value axis after rounding to tick steps
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisScale {
    pub range: ValueRange,
    pub step: f64,
}

impl AxisScale {
    pub const MAX_TICKS: usize = 64;

    /// Tick values from `min` upward, at most [`Self::MAX_TICKS`] + 1 of them
    pub fn ticks(&self) -> Vec<f64> {
        let steps = self.range.span() / self.step;
        if self.step <= 0.0 || !steps.is_finite() {
            return vec![self.range.min];
        }
        let count = (steps.round() as usize).min(Self::MAX_TICKS);
        (0..=count).map(|i| self.range.min + i as f64 * self.step).collect()
    }
}
