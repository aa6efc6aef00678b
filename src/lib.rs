//! UniTrade - recommendation and fair-price service for a campus marketplace
//!
//! The core is two pure scoring algorithms: a Jaccard tag-overlap feed ranker
//! and a depreciation-based fair price estimator.

pub mod config;
pub mod core;
pub mod generator;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{estimate, rank, score, FairPriceEstimator, FeedRanker};
pub use models::{CatalogItem, CategoryRule, CategoryRules, ScoredItem, TagCasing, UserProfile};
