use crate::domain::{
    errors::NetworkResult,
    market_data::{RawBarPoint, Symbol},
};

/// Source of historical bars for a symbol
#[allow(async_fn_in_trait)]
pub trait ChartDataRepository {
    /// Fetch every bar the backend has for `symbol`, chronological.
    async fn fetch_bars(&self, symbol: &Symbol) -> NetworkResult<Vec<RawBarPoint>>;
}
