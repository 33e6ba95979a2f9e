use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ParseError, ScoringError};

/// Kind of property a listing describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    House,
    Apartment,
    ResidentialLand,
    CommercialIndustrial,
}

impl FromStr for PropertyType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-' | '/'))
            .collect();

        match normalized.as_str() {
            "house" => Ok(PropertyType::House),
            "apartment" => Ok(PropertyType::Apartment),
            "residentialland" => Ok(PropertyType::ResidentialLand),
            "commercialindustrial" => Ok(PropertyType::CommercialIndustrial),
            _ => Err(ParseError::UnknownPropertyType(s.to_string())),
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyType::House => write!(f, "house"),
            PropertyType::Apartment => write!(f, "apartment"),
            PropertyType::ResidentialLand => write!(f, "residential_land"),
            PropertyType::CommercialIndustrial => write!(f, "commercial_industrial"),
        }
    }
}

/// Administrative location of a listing, from broadest to narrowest level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub province: String,
    pub canton: String,
    pub district: String,
}

impl Location {
    pub fn new(
        province: impl Into<String>,
        canton: impl Into<String>,
        district: impl Into<String>,
    ) -> Self {
        Self {
            province: province.into(),
            canton: canton.into(),
            district: district.into(),
        }
    }
}

/// A listing, either the base property or one of its comparables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    #[serde(rename = "listingName")]
    pub listing_name: String,
    #[serde(rename = "propertyType")]
    pub property_type: PropertyType,
    pub bedrooms: u32,
    pub bathrooms: f64,
    /// Display only, never scored
    pub price: f64,
    pub size: f64,
    #[serde(rename = "amenityCount")]
    pub amenity_count: u32,
    /// Years since construction
    pub age: u32,
    #[serde(rename = "parkingSpots")]
    pub parking_spots: u32,
    /// Ordinal 1 (poor) to 4 (excellent)
    pub condition: u8,
    #[serde(flatten)]
    pub location: Location,
}

/// Similarity of one comparable against the base property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    #[serde(rename = "listingName")]
    pub listing_name: String,
    #[serde(rename = "primaryScore")]
    pub primary_score: f64,
    #[serde(rename = "secondaryScore")]
    pub secondary_score: f64,
    #[serde(rename = "finalScore")]
    pub final_score: f64,
}

impl MatchResult {
    /// Build a result whose final score is the plain mean of the two group scores
    pub fn new(listing_name: impl Into<String>, primary_score: f64, secondary_score: f64) -> Self {
        Self {
            listing_name: listing_name.into(),
            primary_score,
            secondary_score,
            final_score: (primary_score + secondary_score) / 2.0,
        }
    }
}

/// Price-per-area statistics over the valid comparables
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingStats {
    #[serde(rename = "lowerQuartile")]
    pub lower_quartile: f64,
    pub median: f64,
    #[serde(rename = "upperQuartile")]
    pub upper_quartile: f64,
    pub min: f64,
    pub max: f64,
    pub average: f64,
}

impl PricingStats {
    /// Scale the interquartile band to a property of `base_size` area units
    pub fn suggested_range(&self, base_size: f64) -> Option<PriceRange> {
        if !base_size.is_finite() || base_size <= 0.0 {
            return None;
        }

        Some(PriceRange {
            low: self.lower_quartile * base_size,
            mid: self.median * base_size,
            high: self.upper_quartile * base_size,
        })
    }
}

/// Suggested asking price band for the base property
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub low: f64,
    pub mid: f64,
    pub high: f64,
}

/// Scores and pricing for one base property, computed independently
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparableAnalysis {
    pub matches: Vec<MatchResult>,
    pub pricing: Option<PricingStats>,
    #[serde(rename = "suggestedRange")]
    pub suggested_range: Option<PriceRange>,
    /// Comparables left out of `matches` because they could not be parsed
    #[serde(default)]
    pub skipped: Vec<SkippedComparable>,
}

/// A comparable that could not be scored, with its position in the request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedComparable {
    pub index: usize,
    #[serde(rename = "listingName")]
    pub listing_name: Option<String>,
    pub reason: String,
}

/// Drop-off curve parameters for a single numeric feature, as fractions of the base value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureTolerance {
    pub tolerance_percentage: f64,
    pub max_diff_percentage: f64,
}

impl FeatureTolerance {
    pub const fn new(tolerance_percentage: f64, max_diff_percentage: f64) -> Self {
        Self {
            tolerance_percentage,
            max_diff_percentage,
        }
    }

    fn validate(&self, feature: &str) -> Result<(), ScoringError> {
        let ok = |v: f64| v.is_finite() && v >= 0.0;
        if !ok(self.tolerance_percentage) || !ok(self.max_diff_percentage) {
            return Err(ScoringError::InvalidConfig(format!(
                "{} tolerance must be finite and non-negative (got {} / {})",
                feature, self.tolerance_percentage, self.max_diff_percentage
            )));
        }
        if self.tolerance_percentage == self.max_diff_percentage {
            return Err(ScoringError::InvalidConfig(format!(
                "{} tolerance and max diff are both {}",
                feature, self.tolerance_percentage
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyTolerances {
    pub bedrooms: FeatureTolerance,
    pub size: FeatureTolerance,
}

impl Default for KeyTolerances {
    fn default() -> Self {
        Self {
            bedrooms: FeatureTolerance::new(0.66, 1.0),
            size: FeatureTolerance::new(0.25, 0.75),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecondaryTolerances {
    pub bathrooms: FeatureTolerance,
    pub parking_spots: FeatureTolerance,
    pub amenity_count: FeatureTolerance,
    pub condition: FeatureTolerance,
    pub age: FeatureTolerance,
}

impl Default for SecondaryTolerances {
    fn default() -> Self {
        Self {
            bathrooms: FeatureTolerance::new(0.5, 1.0),
            parking_spots: FeatureTolerance::new(0.5, 1.0),
            amenity_count: FeatureTolerance::new(0.5, 1.0),
            condition: FeatureTolerance::new(0.25, 0.75),
            age: FeatureTolerance::new(0.3, 1.0),
        }
    }
}

/// Key-group weights
///
/// The default weighs bedrooms only. Size, location and property type are still
/// computed for every comparable but contribute nothing until given a weight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyWeights {
    pub bedrooms: f64,
    pub size: f64,
    pub location: f64,
    pub property_type: f64,
}

impl Default for KeyWeights {
    fn default() -> Self {
        Self {
            bedrooms: 1.0,
            size: 0.0,
            location: 0.0,
            property_type: 0.0,
        }
    }
}

impl KeyWeights {
    pub fn total(&self) -> f64 {
        self.bedrooms + self.size + self.location + self.property_type
    }

    fn values(&self) -> [(&'static str, f64); 4] {
        [
            ("bedrooms", self.bedrooms),
            ("size", self.size),
            ("location", self.location),
            ("property_type", self.property_type),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecondaryWeights {
    pub bathrooms: f64,
    pub parking_spots: f64,
    pub amenity_count: f64,
    pub condition: f64,
    pub age: f64,
}

impl Default for SecondaryWeights {
    fn default() -> Self {
        Self {
            bathrooms: 0.30,
            parking_spots: 0.20,
            amenity_count: 0.15,
            condition: 0.20,
            age: 0.15,
        }
    }
}

impl SecondaryWeights {
    pub fn total(&self) -> f64 {
        self.bathrooms + self.parking_spots + self.amenity_count + self.condition + self.age
    }

    fn values(&self) -> [(&'static str, f64); 5] {
        [
            ("bathrooms", self.bathrooms),
            ("parking_spots", self.parking_spots),
            ("amenity_count", self.amenity_count),
            ("condition", self.condition),
            ("age", self.age),
        ]
    }
}

/// Share of the location score awarded per matching administrative level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationWeights {
    pub province: f64,
    pub canton: f64,
    pub district: f64,
}

impl Default for LocationWeights {
    fn default() -> Self {
        Self {
            province: 0.45,
            canton: 0.35,
            district: 0.20,
        }
    }
}

/// All tunable tables used by the similarity engine
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub key_tolerances: KeyTolerances,
    pub secondary_tolerances: SecondaryTolerances,
    pub key_weights: KeyWeights,
    pub secondary_weights: SecondaryWeights,
    pub location_weights: LocationWeights,
}

impl ScoringConfig {
    /// Reject tables that would make a score undefined or leave [0, 100]
    pub fn validate(&self) -> Result<(), ScoringError> {
        self.key_tolerances.bedrooms.validate("bedrooms")?;
        self.key_tolerances.size.validate("size")?;

        let secondary = &self.secondary_tolerances;
        secondary.bathrooms.validate("bathrooms")?;
        secondary.parking_spots.validate("parking_spots")?;
        secondary.amenity_count.validate("amenity_count")?;
        secondary.condition.validate("condition")?;
        secondary.age.validate("age")?;

        validate_weights("key", &self.key_weights.values(), self.key_weights.total())?;
        validate_weights(
            "secondary",
            &self.secondary_weights.values(),
            self.secondary_weights.total(),
        )?;

        let location = &self.location_weights;
        let location_total = location.province + location.canton + location.district;
        validate_weights(
            "location",
            &[
                ("province", location.province),
                ("canton", location.canton),
                ("district", location.district),
            ],
            location_total,
        )?;
        if (location_total - 1.0).abs() > 1e-9 {
            return Err(ScoringError::InvalidConfig(format!(
                "location weights must sum to 1.0, got {}",
                location_total
            )));
        }

        Ok(())
    }
}

fn validate_weights(group: &str, weights: &[(&str, f64)], total: f64) -> Result<(), ScoringError> {
    for (name, weight) in weights {
        if !weight.is_finite() || *weight < 0.0 {
            return Err(ScoringError::InvalidConfig(format!(
                "{} weight `{}` must be finite and non-negative, got {}",
                group, name, weight
            )));
        }
    }
    if total <= 0.0 {
        return Err(ScoringError::InvalidConfig(format!(
            "{} weights must not all be zero",
            group
        )));
    }
    Ok(())
}
