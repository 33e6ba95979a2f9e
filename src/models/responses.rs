use serde::{Deserialize, Serialize};
use crate::models::domain::{MatchResult, PricingStats};

/// Response for the comparable scoring endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchesResponse {
    pub matches: Vec<MatchResult>,
    #[serde(rename = "totalComparables")]
    pub total_comparables: usize,
}

/// Response for the pricing statistics endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingResponse {
    pub stats: Option<PricingStats>,
    #[serde(rename = "validSamples")]
    pub valid_samples: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(rename = "statusCode")]
    pub status_code: u16,
}
