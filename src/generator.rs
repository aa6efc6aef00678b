//! Synthetic inventory for demos, benchmarks and tests
//!
//! Mirrors what a campus marketplace typically lists: textbooks tagged by
//! branch and semester, hostel electronics, and a long tail of generic items.

use crate::models::CatalogItem;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const BRANCHES: &[&str] = &["CSE", "ECE", "ME", "CE"];
pub const CONDITIONS: &[&str] = &["New", "Like New", "Good", "Fair", "Poor"];
pub const CATEGORIES: &[&str] = &["Books", "Electronics", "Furniture", "Sports"];
pub const BOOK_TITLES: &[&str] = &[
    "Engineering Physics", "Data Structures", "Mechanics", "Calculus", "Digital Logic",
];
pub const ELECTRONICS_TITLES: &[&str] = &[
    "Scientific Calculator", "Kettle", "Extension Board", "Mouse", "Keyboard",
];

const MIN_ORIGINAL_PRICE: u32 = 500;
const MAX_ORIGINAL_PRICE: u32 = 5000;
const MIN_PURCHASE_YEAR: i32 = 2018;
const MAX_PURCHASE_YEAR: i32 = 2025;

/// Seedable random inventory generator
///
/// Two generators built from the same seed produce identical inventories.
pub struct InventoryGenerator {
    rng: StdRng,
}

impl InventoryGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generate `count` items with ids `1..=count`
    pub fn generate(&mut self, count: usize) -> Vec<CatalogItem> {
        (0..count).map(|i| self.item(i as i64 + 1)).collect()
    }

    fn item(&mut self, id: i64) -> CatalogItem {
        let category = self.pick(CATEGORIES);

        let (title, tags) = match category {
            "Books" => {
                let title = self.pick(BOOK_TITLES).to_string();
                let branch = self.pick(BRANCHES).to_string();
                let semester = format!("Sem {}", self.rng.gen_range(1..=8));
                (title, vec![branch, semester])
            }
            "Electronics" => (
                self.pick(ELECTRONICS_TITLES).to_string(),
                vec!["Tech".to_string(), "Hostel Life".to_string()],
            ),
            other => (format!("Used {} Item", other), vec!["General".to_string()]),
        };

        let original_price = self.rng.gen_range(MIN_ORIGINAL_PRICE..=MAX_ORIGINAL_PRICE) as f64;

        CatalogItem {
            id: Some(id),
            title,
            tags,
            price: original_price,
            category: Some(category.to_string()),
            original_price,
            purchase_year: self.rng.gen_range(MIN_PURCHASE_YEAR..=MAX_PURCHASE_YEAR),
            condition: self.pick(CONDITIONS).to_string(),
        }
    }

    fn pick(&mut self, options: &[&'static str]) -> &'static str {
        options[self.rng.gen_range(0..options.len())]
    }
}

/// Generate an inventory in one call
pub fn generate_inventory(count: usize, seed: u64) -> Vec<CatalogItem> {
    InventoryGenerator::new(seed).generate(count)
}
