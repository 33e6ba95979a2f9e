// Core algorithm exports
pub mod location;
pub mod matcher;
pub mod pricing;
pub mod scoring;
pub mod similarity;

pub use location::weighted_location_similarity;
pub use matcher::{compute_matches, Matcher};
pub use pricing::{compute_pricing_stats, quartile, PriceArea};
pub use scoring::{compute_key_similarity, compute_secondary_similarity};
pub use similarity::{binary_similarity, relative_similarity_score};
