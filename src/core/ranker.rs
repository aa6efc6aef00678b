use crate::models::{CatalogItem, ScoredItem, TagCasing, UserProfile};
use crate::core::similarity::jaccard_score;

/// Result of ranking a feed
#[derive(Debug)]
pub struct FeedResult {
    pub items: Vec<ScoredItem>,
    pub total_candidates: usize,
}

/// Builds personalized feeds from a user's tag profile
///
/// # Pipeline Stages
/// 1. Combine explicit and implicit tags into one profile
/// 2. Score every catalog item against the profile
/// 3. Drop items with no overlap
/// 4. Sort by relevance, cheapest first on ties
#[derive(Debug, Clone, Copy, Default)]
pub struct FeedRanker {
    casing: TagCasing,
}

impl FeedRanker {
    pub fn new(casing: TagCasing) -> Self {
        Self { casing }
    }

    pub fn casing(&self) -> TagCasing {
        self.casing
    }

    /// Rank the whole inventory for a user
    ///
    /// The catalog records are cloned, never modified. Items scoring 0 are
    /// excluded. Ordering is by score (descending) then price (ascending);
    /// the sort is stable so full ties keep inventory order.
    pub fn rank(&self, user: &UserProfile, inventory: &[CatalogItem]) -> Vec<ScoredItem> {
        let profile_tags = user.profile_tags();

        let mut scored: Vec<ScoredItem> = inventory
            .iter()
            .filter_map(|item| {
                let relevance_score = jaccard_score(&profile_tags, &item.tags, self.casing);

                if relevance_score > 0.0 {
                    Some(ScoredItem {
                        item: item.clone(),
                        relevance_score,
                    })
                } else {
                    None
                }
            })
            .collect();

        scored.sort_by(|a, b| {
            b.relevance_score
                .partial_cmp(&a.relevance_score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| {
                    a.item
                        .price
                        .partial_cmp(&b.item.price)
                        .unwrap_or(std::cmp::Ordering::Equal)
                })
        });

        tracing::debug!(
            "Ranked {} of {} items for {} profile tags",
            scored.len(),
            inventory.len(),
            profile_tags.len()
        );

        scored
    }

    /// Rank and keep at most `limit` items
    pub fn rank_with_limit(
        &self,
        user: &UserProfile,
        inventory: &[CatalogItem],
        limit: usize,
    ) -> FeedResult {
        let mut items = self.rank(user, inventory);
        items.truncate(limit);

        FeedResult {
            items,
            total_candidates: inventory.len(),
        }
    }
}

/// Rank with the default casing behaviour
pub fn rank(user: &UserProfile, inventory: &[CatalogItem]) -> Vec<ScoredItem> {
    FeedRanker::default().rank(user, inventory)
}
