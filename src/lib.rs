//! Comparables Engine - similarity scoring and pricing for comparable real-estate listings
//!
//! This library ranks comparable listings against a base property and reduces
//! them to price-per-area statistics from which a suggested price range is derived.

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod routes;

// Re-export commonly used types
pub use crate::core::{compute_matches, compute_pricing_stats, Matcher, PriceArea};
pub use error::{ParseError, ScoringError};
pub use models::{
    ComparableAnalysis, Location, MatchResult, PriceRange, PricingStats, Property, PropertyType,
    RawProperty, ScoringConfig, SkippedComparable,
};
