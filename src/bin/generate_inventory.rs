/// Synthetic inventory generator for UniTrade
///
/// Prints a JSON array of catalog items to stdout.
///
/// Run: cargo run --bin generate-inventory -- [count] [seed] [current_year]
///
/// When `current_year` is given, every item's price is set to its fair price
/// for that year using the standard rule table.

use unitrade::core::FairPriceEstimator;
use unitrade::generator::generate_inventory;

const DEFAULT_COUNT: usize = 50;
const DEFAULT_SEED: u64 = 42;

fn parse_arg<T: std::str::FromStr>(value: Option<String>, name: &str) -> Result<Option<T>, String> {
    match value {
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| format!("invalid {}: {}", name, raw)),
        None => Ok(None),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);

    let count = parse_arg(args.next(), "count")?.unwrap_or(DEFAULT_COUNT);
    let seed = parse_arg(args.next(), "seed")?.unwrap_or(DEFAULT_SEED);
    let current_year: Option<i32> = parse_arg(args.next(), "current_year")?;

    let mut inventory = generate_inventory(count, seed);

    if let Some(year) = current_year {
        inventory = FairPriceEstimator::default().price_inventory(&inventory, year);
    }

    eprintln!("Generated {} items (seed {})", inventory.len(), seed);
    println!("{}", serde_json::to_string_pretty(&inventory)?);

    Ok(())
}
