// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    ComparableAnalysis, FeatureTolerance, KeyTolerances, KeyWeights, Location, LocationWeights,
    MatchResult, PriceRange, PricingStats, Property, PropertyType, ScoringConfig,
    SecondaryTolerances, SecondaryWeights, SkippedComparable,
};
pub use requests::{PricingRequest, RawNumber, RawProperty, ScoreComparablesRequest};
pub use responses::{ErrorResponse, HealthResponse, MatchesResponse, PricingResponse};
