// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    CatalogItem, CategoryRule, CategoryRules, RelevanceTier, RuleTableError, ScoredItem, TagCasing,
    UserProfile, DEFAULT_CONDITION_WEIGHT, FALLBACK_CATEGORY,
};
pub use requests::{FairPriceRequest, FeedRequest, ListItemsRequest};
pub use responses::{
    ErrorResponse, FairPriceResponse, FeedEntry, FeedResponse, HealthResponse, ListItemsResponse,
    PricedItem,
};
