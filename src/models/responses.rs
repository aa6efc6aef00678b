use serde::{Deserialize, Serialize};
use crate::models::domain::{RelevanceTier, ScoredItem};

/// Feed entry with its relevance bucket
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedEntry {
    #[serde(flatten)]
    pub item: ScoredItem,
    pub tier: RelevanceTier,
}

impl From<ScoredItem> for FeedEntry {
    fn from(item: ScoredItem) -> Self {
        let tier = item.tier();
        Self { item, tier }
    }
}

/// Response for the feed endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedResponse {
    pub items: Vec<FeedEntry>,
    #[serde(rename = "totalCandidates")]
    pub total_candidates: usize,
}

/// Fair price for a single item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricedItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub title: String,
    #[serde(rename = "originalPrice")]
    pub original_price: f64,
    #[serde(rename = "fairPrice")]
    pub fair_price: i64,
}

/// Response for the fair price endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FairPriceResponse {
    #[serde(rename = "currentYear")]
    pub current_year: i32,
    pub prices: Vec<PricedItem>,
}

/// Response for the list items endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListItemsResponse {
    pub inserted: u64,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub database: bool,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(rename = "statusCode")]
    pub status_code: u16,
}
