use crate::domain::{
    errors::AppError,
    logging::LogComponent,
    market_data::{
        ChartPoint, DateFormatter, Symbol, repositories::ChartDataRepository,
        services::ChartDataService,
    },
};

/// Use Case: fetch a symbol's bars and reshape them for the panels
pub struct LoadChartDataUseCase<R: ChartDataRepository, F: DateFormatter> {
    repository: R,
    formatter: F,
}

impl<R: ChartDataRepository, F: DateFormatter> LoadChartDataUseCase<R, F> {
    pub fn new(repository: R, formatter: F) -> Self {
        Self { repository, formatter }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// One fetch, no retry. Any failure comes back as `Err`.
    pub async fn execute(&self, symbol: &Symbol) -> Result<Vec<ChartPoint>, AppError> {
        crate::log_debug!(LogComponent::Application("LoadChartData"), "📊 Loading chart data for {}", symbol);

        let bars = self.repository.fetch_bars(symbol).await?;
        let points = ChartDataService::new(&self.formatter).prepare(&bars);

        crate::log_debug!(LogComponent::Application("LoadChartData"), "✅ {} points ready for {}", points.len(), symbol);
        Ok(points)
    }
}
