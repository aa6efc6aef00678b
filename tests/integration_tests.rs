// Integration tests for UniTrade

use unitrade::core::{FairPriceEstimator, FeedRanker};
use unitrade::generator::generate_inventory;
use unitrade::models::{CatalogItem, UserProfile};

fn load_fixture_inventory() -> Vec<CatalogItem> {
    let json = include_str!("fixtures/inventory.json");
    serde_json::from_str(json).expect("fixture inventory should parse")
}

fn create_user(explicit: &[&str], implicit: &[&str]) -> UserProfile {
    UserProfile::new(
        explicit.iter().map(|t| t.to_string()).collect(),
        implicit.iter().map(|t| t.to_string()).collect(),
    )
}

#[test]
fn test_fixture_fair_prices_for_2025() {
    let inventory = load_fixture_inventory();
    let estimator = FairPriceEstimator::default();

    let prices: Vec<i64> = inventory
        .iter()
        .map(|item| estimator.estimate(item, 2025))
        .collect();

    let expected = vec![
        901, 73, 2565, 862, 1372, 375, 964, 2062, 555, 3223, 377, 2564, 2331, 439, 705, 590,
        1115, 1233, 2773, 256, 3014, 1962, 717, 1361, 701, 518, 918, 569, 886, 206, 236, 1638,
        290, 543, 354, 206, 97, 1258, 114, 1768, 2491, 371, 520, 105, 634, 1903, 435, 2169,
        1895, 1088,
    ];

    assert_eq!(prices, expected);
}

#[test]
fn test_integration_price_then_rank() {
    let estimator = FairPriceEstimator::default();
    let inventory = estimator.price_inventory(&load_fixture_inventory(), 2025);
    let user = create_user(&["ECE", "Sem 5"], &["Tech"]);

    let feed = FeedRanker::default().rank(&user, &inventory);

    assert!(!feed.is_empty());

    // Every result overlaps the profile
    for entry in &feed {
        assert!(entry.relevance_score > 0.0);
        assert!(entry
            .item
            .tags
            .iter()
            .any(|t| ["ece", "sem 5", "tech"].contains(&t.to_lowercase().as_str())));
    }

    // Sorted by score, cheapest first on ties
    for pair in feed.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        assert!(
            a.relevance_score > b.relevance_score
                || (a.relevance_score == b.relevance_score && a.item.price <= b.item.price),
            "feed out of order: {:?} before {:?}",
            a.item.title,
            b.item.title
        );
    }

    // Both books tagged (ECE, Sem 5) score 2/3; the cheaper one leads
    assert_eq!(feed[0].item.title, "Data Structures");
    assert_eq!(feed[0].item.price, 97.0);
    assert_eq!(feed[1].item.title, "Digital Logic");
    assert_eq!(feed[0].relevance_score, 2.0 / 3.0);
    assert_eq!(feed[1].relevance_score, 2.0 / 3.0);
}

#[test]
fn test_generated_inventory_end_to_end() {
    let inventory = generate_inventory(500, 2024);
    let estimator = FairPriceEstimator::default();
    let priced = estimator.price_inventory(&inventory, 2025);

    for (original, priced) in inventory.iter().zip(&priced) {
        assert!(priced.price >= 0.0);
        assert!(priced.price <= original.original_price);
        assert_eq!(priced.title, original.title);
    }

    let user = create_user(&["General"], &[]);
    let result = FeedRanker::default().rank_with_limit(&user, &priced, 10);

    assert!(result.items.len() <= 10);
    assert_eq!(result.total_candidates, 500);
    for entry in &result.items {
        assert_eq!(entry.item.tags, vec!["General"]);
        assert_eq!(entry.relevance_score, 1.0);
    }
}
