use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::domain::{CatalogItem, UserProfile};

/// Request for a personalized feed
///
/// When `inventory` is omitted the catalog store is queried instead.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FeedRequest {
    pub user: UserProfile,
    #[serde(default)]
    pub inventory: Option<Vec<CatalogItem>>,
    #[validate(range(min = 1))]
    pub limit: Option<u16>,
}

/// Request to estimate fair prices for a batch of items
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FairPriceRequest {
    #[validate(length(min = 1))]
    pub items: Vec<CatalogItem>,
    #[serde(alias = "current_year", rename = "currentYear")]
    pub current_year: Option<i32>,
}

/// Request to list new items in the catalog
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ListItemsRequest {
    #[validate(length(min = 1, max = 500))]
    pub items: Vec<CatalogItem>,
}
