use crate::models::{CatalogItem, CategoryRules};

/// Estimate the resale value of an item in `current_year`
///
/// Pricing formula:
/// fair_price = floor(
///     original_price
///     * (1 - depreciation_rate) ^ age     # exponential yearly decay
///     * condition_weight                  # 0.5 for unknown conditions
/// )
///
/// Age is clamped at 0, so purchase years in the future are treated as
/// bought this year. Unknown categories use the "General" rule.
pub fn estimate(item: &CatalogItem, rules: &CategoryRules, current_year: i32) -> i64 {
    let rule = rules.rule_for(item.category.as_deref());
    let age = item_age(item.purchase_year, current_year);

    let base_value = item.original_price * (1.0 - rule.depreciation_rate).powi(age);
    let condition_factor = rule.condition_weight(&item.condition);

    tracing::trace!(
        "Pricing {:?}: category={:?} age={} condition_factor={}",
        item.title,
        item.category,
        age,
        condition_factor
    );

    (base_value * condition_factor).floor() as i64
}

#[inline]
fn item_age(purchase_year: i32, current_year: i32) -> i32 {
    current_year.saturating_sub(purchase_year).max(0)
}

/// Fair price estimator bound to one rule table
#[derive(Debug, Clone, Default)]
pub struct FairPriceEstimator {
    rules: CategoryRules,
}

impl FairPriceEstimator {
    pub fn new(rules: CategoryRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &CategoryRules {
        &self.rules
    }

    pub fn estimate(&self, item: &CatalogItem, current_year: i32) -> i64 {
        estimate(item, &self.rules, current_year)
    }

    /// Copy of the inventory with every `price` set to its fair price
    pub fn price_inventory(&self, inventory: &[CatalogItem], current_year: i32) -> Vec<CatalogItem> {
        inventory
            .iter()
            .map(|item| CatalogItem {
                price: self.estimate(item, current_year) as f64,
                ..item.clone()
            })
            .collect()
    }
}
