use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Category used when an item's category is missing or unknown
pub const FALLBACK_CATEGORY: &str = "General";

/// Condition multiplier applied when the condition is not in the rule
pub const DEFAULT_CONDITION_WEIGHT: f64 = 0.5;

/// A shopper's interest profile
///
/// Explicit tags come from signup (branch, semester), implicit tags from
/// browsing history.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "explicitTags", alias = "signupTags")]
    pub explicit_tags: Vec<String>,
    #[serde(rename = "implicitTags", alias = "viewHistoryTags", default)]
    pub implicit_tags: Vec<String>,
}

impl UserProfile {
    pub fn new(explicit_tags: Vec<String>, implicit_tags: Vec<String>) -> Self {
        Self {
            name: None,
            explicit_tags,
            implicit_tags,
        }
    }

    /// Explicit tags followed by implicit tags, duplicates kept
    pub fn profile_tags(&self) -> Vec<&str> {
        self.explicit_tags
            .iter()
            .chain(self.implicit_tags.iter())
            .map(String::as_str)
            .collect()
    }
}

/// A listing in the marketplace catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub title: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(alias = "fairPrice", default)]
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(rename = "originalPrice", default)]
    pub original_price: f64,
    #[serde(rename = "purchaseYear", default)]
    pub purchase_year: i32,
    #[serde(default)]
    pub condition: String,
}

/// Catalog item annotated with its relevance to a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredItem {
    #[serde(flatten)]
    pub item: CatalogItem,
    #[serde(rename = "relevanceScore")]
    pub relevance_score: f64,
}

impl ScoredItem {
    pub fn tier(&self) -> RelevanceTier {
        RelevanceTier::from_score(self.relevance_score)
    }
}

/// Coarse bucket for a relevance score, as shown in feed diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelevanceTier {
    HighlyRelevant,
    Moderate,
    Irrelevant,
}

impl RelevanceTier {
    pub fn from_score(score: f64) -> Self {
        if score >= 0.5 {
            RelevanceTier::HighlyRelevant
        } else if score >= 0.2 {
            RelevanceTier::Moderate
        } else {
            RelevanceTier::Irrelevant
        }
    }
}

/// How tag casing is treated when building the Jaccard union
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagCasing {
    /// Union over tags as written; "CSE" and "cse" are two members.
    #[default]
    Raw,
    /// Union over lowercased tags.
    Normalized,
}

/// Depreciation rule for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRule {
    #[serde(alias = "depreciationRate")]
    pub depreciation_rate: f64,
    #[serde(alias = "conditionWeights")]
    pub condition_weights: HashMap<String, f64>,
}

impl CategoryRule {
    pub fn new(depreciation_rate: f64, weights: &[(&str, f64)]) -> Self {
        Self {
            depreciation_rate,
            condition_weights: weights
                .iter()
                .map(|(condition, weight)| (condition.to_string(), *weight))
                .collect(),
        }
    }

    pub fn condition_weight(&self, condition: &str) -> f64 {
        self.condition_weights
            .get(condition)
            .copied()
            .unwrap_or(DEFAULT_CONDITION_WEIGHT)
    }
}

/// Errors raised while building a rule table
#[derive(Debug, Error, PartialEq)]
pub enum RuleTableError {
    #[error("rule table has no \"General\" fallback entry")]
    MissingFallback,

    #[error("depreciation rate {rate} for category {category} is outside [0, 1]")]
    InvalidRate { category: String, rate: f64 },

    #[error("condition weight {weight} for {category}/{condition} is outside [0, 1]")]
    InvalidWeight {
        category: String,
        condition: String,
        weight: f64,
    },
}

/// Immutable category rule table with a guaranteed fallback entry
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryRules {
    rules: HashMap<String, CategoryRule>,
    fallback: CategoryRule,
}

impl CategoryRules {
    /// Build a table, checking that the fallback exists and that every rate
    /// and condition weight lies in [0, 1]. NaN fails both range checks.
    pub fn new(rules: HashMap<String, CategoryRule>) -> Result<Self, RuleTableError> {
        for (category, rule) in &rules {
            if !(0.0..=1.0).contains(&rule.depreciation_rate) {
                return Err(RuleTableError::InvalidRate {
                    category: category.clone(),
                    rate: rule.depreciation_rate,
                });
            }

            if let Some((condition, weight)) = rule
                .condition_weights
                .iter()
                .find(|(_, weight)| !(0.0..=1.0).contains(*weight))
            {
                return Err(RuleTableError::InvalidWeight {
                    category: category.clone(),
                    condition: condition.clone(),
                    weight: *weight,
                });
            }
        }

        let fallback = rules
            .get(FALLBACK_CATEGORY)
            .cloned()
            .ok_or(RuleTableError::MissingFallback)?;

        Ok(Self { rules, fallback })
    }

    /// The table used by the campus marketplace
    pub fn standard() -> Self {
        let fallback = CategoryRule::new(
            0.15,
            &[("New", 1.0), ("Like New", 0.8), ("Good", 0.6), ("Fair", 0.5), ("Poor", 0.2)],
        );

        let mut rules = HashMap::new();
        rules.insert(
            "Books".to_string(),
            CategoryRule::new(
                0.10,
                &[("New", 1.0), ("Like New", 0.9), ("Good", 0.7), ("Fair", 0.5), ("Poor", 0.2)],
            ),
        );
        rules.insert(
            "Electronics".to_string(),
            CategoryRule::new(
                0.20,
                &[("New", 1.0), ("Like New", 0.8), ("Good", 0.6), ("Fair", 0.4), ("Poor", 0.1)],
            ),
        );
        rules.insert(
            "Furniture".to_string(),
            CategoryRule::new(
                0.05,
                &[("New", 1.0), ("Like New", 0.9), ("Good", 0.8), ("Fair", 0.6), ("Poor", 0.4)],
            ),
        );
        rules.insert(FALLBACK_CATEGORY.to_string(), fallback.clone());

        Self { rules, fallback }
    }

    /// Rule for a category, falling back to "General"
    pub fn rule_for(&self, category: Option<&str>) -> &CategoryRule {
        category
            .and_then(|c| self.rules.get(c))
            .unwrap_or(&self.fallback)
    }

    pub fn contains(&self, category: &str) -> bool {
        self.rules.contains_key(category)
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    pub fn into_inner(self) -> HashMap<String, CategoryRule> {
        self.rules
    }
}

impl Default for CategoryRules {
    fn default() -> Self {
        Self::standard()
    }
}
