pub mod dto;

use crate::domain::{
    errors::{AppError, NetworkResult},
    logging::{LogComponent, get_logger},
    market_data::{RawBarPoint, Symbol, repositories::ChartDataRepository},
};
use dto::{ChartResponseDto, HealthResponseDto};
use gloo::net::http::Request;

/// HTTP client for the chart backend
#[derive(Debug, Clone)]
pub struct ChartApiClient {
    base_url: String,
}

impl ChartApiClient {
    pub fn new(base_url: &str) -> Self {
        Self { base_url: base_url.trim_end_matches('/').to_string() }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn chart_url(&self, symbol: &Symbol) -> String {
        format!("{}/api/v1/chart/{}", self.base_url, HttpUtils::url_encode(symbol.value()))
    }

    pub fn health_url(&self) -> String {
        format!("{}/api/v1/health", self.base_url)
    }

    /// GET a URL and return the body of a 2xx response
    async fn get_text(&self, url: &str) -> NetworkResult<String> {
        get_logger().debug(LogComponent::Infrastructure("HTTP"), &format!("🌐 GET: {}", url));

        let response = Request::get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| AppError::Network(format!("Request failed: {}", e)))?;

        if !response.ok() {
            return Err(AppError::HttpStatus { status: response.status(), status_text: response.status_text() });
        }

        let text = response
            .text()
            .await
            .map_err(|e| AppError::Network(format!("Failed to read response: {}", e)))?;

        get_logger().debug(
            LogComponent::Infrastructure("HTTP"),
            &format!("✅ GET response: {} bytes", text.len()),
        );

        Ok(text)
    }

    pub async fn get_chart(&self, symbol: &Symbol) -> NetworkResult<ChartResponseDto> {
        let body = self.get_text(&self.chart_url(symbol)).await?;
        let dto = ChartResponseDto::parse(&body)?;

        if let Some(echoed) = dto.symbol.as_deref() {
            if !echoed.eq_ignore_ascii_case(symbol.value()) {
                get_logger().warn(
                    LogComponent::Infrastructure("ChartApiClient"),
                    &format!("Requested {} but backend answered for {}", symbol, echoed),
                );
            }
        }

        Ok(dto)
    }

    /// Check `/api/v1/health`. Failures are logged, never raised.
    pub async fn health_check(&self) -> bool {
        let result = match self.get_text(&self.health_url()).await {
            Ok(body) => serde_json::from_str::<HealthResponseDto>(&body).map_err(AppError::from),
            Err(e) => Err(e),
        };

        match result {
            Ok(health) if health.is_healthy() => {
                get_logger().info(
                    LogComponent::Infrastructure("HTTP"),
                    &format!("✅ Backend healthy at {}", self.base_url),
                );
                true
            }
            Ok(health) => {
                get_logger().warn(
                    LogComponent::Infrastructure("HTTP"),
                    &format!("Backend reports status '{}'", health.status),
                );
                false
            }
            Err(e) => {
                get_logger().warn(
                    LogComponent::Infrastructure("HTTP"),
                    &format!("❌ Health check failed: {}", e),
                );
                false
            }
        }
    }
}

impl ChartDataRepository for ChartApiClient {
    async fn fetch_bars(&self, symbol: &Symbol) -> NetworkResult<Vec<RawBarPoint>> {
        Ok(self.get_chart(symbol).await?.data)
    }
}

pub struct HttpUtils;

impl HttpUtils {
    /// Percent-encode the characters that would break a path segment
    pub fn url_encode(input: &str) -> String {
        input
            .replace('%', "%25")
            .replace(' ', "%20")
            .replace('/', "%2F")
            .replace('&', "%26")
            .replace('=', "%3D")
            .replace('?', "%3F")
            .replace('#', "%23")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chart_url_uses_versioned_path() {
        let client = ChartApiClient::new("http://localhost:8080/");
        assert_eq!(client.chart_url(&Symbol::from("AAPL")), "http://localhost:8080/api/v1/chart/AAPL");
        assert_eq!(client.health_url(), "http://localhost:8080/api/v1/health");
    }

    #[test]
    fn symbol_is_path_safe() {
        let client = ChartApiClient::new("http://localhost:8080");
        assert_eq!(client.chart_url(&Symbol::from("brk/b")), "http://localhost:8080/api/v1/chart/BRK%2FB");
    }

    #[test]
    fn url_encoding() {
        assert_eq!(HttpUtils::url_encode("hello world"), "hello%20world");
        assert_eq!(HttpUtils::url_encode("a&b=c"), "a%26b%3Dc");
    }
}
