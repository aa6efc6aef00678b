// Criterion benchmarks for UniTrade

use criterion::{black_box, criterion_group, criterion_main, Criterion, BenchmarkId};
use unitrade::core::{similarity::score, FairPriceEstimator, FeedRanker};
use unitrade::generator::generate_inventory;
use unitrade::models::UserProfile;

fn create_user() -> UserProfile {
    UserProfile::new(
        vec!["CSE".to_string(), "Sem 6".to_string()],
        vec!["Tech".to_string(), "Cricket".to_string()],
    )
}

fn bench_similarity(c: &mut Criterion) {
    let user = ["CSE", "Sem 6", "Tech", "Cricket"];
    let item = ["Tech", "Hostel Life"];

    c.bench_function("jaccard_score", |b| {
        b.iter(|| score(black_box(&user), black_box(&item)));
    });
}

fn bench_ranking(c: &mut Criterion) {
    let ranker = FeedRanker::default();
    let user = create_user();

    let mut group = c.benchmark_group("ranking");

    for item_count in [10, 50, 100, 500, 1000].iter() {
        let inventory = generate_inventory(*item_count, 42);

        group.bench_with_input(
            BenchmarkId::new("rank", item_count),
            item_count,
            |b, _| {
                b.iter(|| ranker.rank(black_box(&user), black_box(&inventory)));
            },
        );
    }

    group.finish();
}

fn bench_pricing(c: &mut Criterion) {
    let estimator = FairPriceEstimator::default();
    let inventory = generate_inventory(1000, 42);

    c.bench_function("price_inventory_1000_items", |b| {
        b.iter(|| estimator.price_inventory(black_box(&inventory), black_box(2025)));
    });
}

criterion_group!(
    benches,
    bench_similarity,
    bench_ranking,
    bench_pricing
);

criterion_main!(benches);
