// Core algorithm exports
pub mod clock;
pub mod pricing;
pub mod ranker;
pub mod similarity;

pub use clock::{Clock, FixedClock, SystemClock};
pub use pricing::{estimate, FairPriceEstimator};
pub use ranker::{rank, FeedRanker, FeedResult};
pub use similarity::{jaccard_score, score};
