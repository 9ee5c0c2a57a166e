use crate::domain::{
    errors::{AppError, NetworkResult},
    market_data::RawBarPoint,
};
use serde::{Deserialize, Serialize};

/// Body of `GET /api/v1/chart/{symbol}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartResponseDto {
    #[serde(default)]
    pub symbol: Option<String>,
    pub data: Vec<RawBarPoint>,
}

impl ChartResponseDto {
    pub fn parse(body: &str) -> NetworkResult<Self> {
        serde_json::from_str(body).map_err(|e| AppError::Decode(format!("Failed to parse chart response: {}", e)))
    }
}

/// Body of `GET /api/v1/health`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponseDto {
    pub status: String,
    #[serde(default)]
    pub time: Option<String>,
}

impl HealthResponseDto {
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy")
    }
}
