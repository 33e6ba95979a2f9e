use crate::core::{
    location::weighted_location_similarity,
    similarity::{binary_similarity, feature_similarity},
};
use crate::error::ScoringError;
use crate::models::{Property, ScoringConfig};

/// Calculate the key-group similarity (0-100) of a comparable
///
/// Scoring formula:
/// score = (
///     bedrooms_score * w.bedrooms +            # Relative tolerance curve
///     size_score * w.size +                    # Relative tolerance curve
///     location_score * w.location +            # Province / canton / district
///     property_type_score * w.property_type    # Exact type match
/// ) / (w.bedrooms + w.size + w.location + w.property_type)
pub fn compute_key_similarity(
    base: &Property,
    comp: &Property,
    config: &ScoringConfig,
) -> Result<f64, ScoringError> {
    let tolerances = &config.key_tolerances;
    let weights = &config.key_weights;

    let bedrooms_score = feature_similarity(
        "bedrooms",
        base.bedrooms as f64,
        comp.bedrooms as f64,
        &tolerances.bedrooms,
    )?;
    let size_score = feature_similarity("size", base.size, comp.size, &tolerances.size)?;
    let location_score =
        weighted_location_similarity(&base.location, &comp.location, &config.location_weights);
    let property_type_score = binary_similarity(base.property_type == comp.property_type);

    weighted_average(&[
        (bedrooms_score, weights.bedrooms),
        (size_score, weights.size),
        (location_score, weights.location),
        (property_type_score, weights.property_type),
    ])
}

/// Calculate the secondary-group similarity (0-100) of a comparable
///
/// Bathrooms, parking spots, amenity count, condition and age each run
/// through their own tolerance curve before the weighted average.
pub fn compute_secondary_similarity(
    base: &Property,
    comp: &Property,
    config: &ScoringConfig,
) -> Result<f64, ScoringError> {
    let tolerances = &config.secondary_tolerances;
    let weights = &config.secondary_weights;

    let bathrooms_score = feature_similarity(
        "bathrooms",
        base.bathrooms,
        comp.bathrooms,
        &tolerances.bathrooms,
    )?;
    let parking_score = feature_similarity(
        "parking_spots",
        base.parking_spots as f64,
        comp.parking_spots as f64,
        &tolerances.parking_spots,
    )?;
    let amenity_score = feature_similarity(
        "amenity_count",
        base.amenity_count as f64,
        comp.amenity_count as f64,
        &tolerances.amenity_count,
    )?;
    let condition_score = feature_similarity(
        "condition",
        base.condition as f64,
        comp.condition as f64,
        &tolerances.condition,
    )?;
    let age_score = feature_similarity("age", base.age as f64, comp.age as f64, &tolerances.age)?;

    weighted_average(&[
        (bathrooms_score, weights.bathrooms),
        (parking_score, weights.parking_spots),
        (amenity_score, weights.amenity_count),
        (condition_score, weights.condition),
        (age_score, weights.age),
    ])
}

/// Weighted mean of `(score, weight)` pairs, normalized by the weight total
pub fn weighted_average(pairs: &[(f64, f64)]) -> Result<f64, ScoringError> {
    let total_weight: f64 = pairs.iter().map(|(_, w)| w).sum();
    if total_weight <= 0.0 || !total_weight.is_finite() {
        return Err(ScoringError::InvalidConfig(format!(
            "weight total must be positive, got {}",
            total_weight
        )));
    }

    let weighted: f64 = pairs.iter().map(|(score, weight)| score * weight).sum();

    Ok((weighted / total_weight).clamp(0.0, 100.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{KeyWeights, Location, PropertyType};

    fn create_test_property(name: &str, bedrooms: u32, size: f64) -> Property {
        Property {
            listing_name: name.to_string(),
            property_type: PropertyType::House,
            bedrooms,
            bathrooms: 2.0,
            price: 200_000.0,
            size,
            amenity_count: 3,
            age: 10,
            parking_spots: 2,
            condition: 3,
            location: Location::new("San José", "Escazú", "San Rafael"),
        }
    }

    #[test]
    fn test_identical_properties_score_100() {
        let base = create_test_property("base", 3, 150.0);
        let config = ScoringConfig::default();

        let key = compute_key_similarity(&base, &base, &config).unwrap();
        let secondary = compute_secondary_similarity(&base, &base, &config).unwrap();

        assert!((key - 100.0).abs() < 1e-9);
        assert!((secondary - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_default_key_score_tracks_bedrooms_only() {
        let config = ScoringConfig::default();
        let base = create_test_property("base", 4, 150.0);

        let mut comp = create_test_property("comp", 6, 900.0);
        comp.property_type = PropertyType::Apartment;
        comp.location = Location::new("Heredia", "Belén", "La Ribera");

        // size, location and type all differ but carry zero weight by default
        let key = compute_key_similarity(&base, &comp, &config).unwrap();
        assert!((key - 56.896_551_724).abs() < 1e-6, "got {}", key);
    }

    #[test]
    fn test_enabled_key_weights_use_all_features() {
        let config = ScoringConfig {
            key_weights: KeyWeights {
                bedrooms: 1.0,
                size: 1.0,
                location: 1.0,
                property_type: 1.0,
            },
            ..ScoringConfig::default()
        };
        let base = create_test_property("base", 3, 150.0);

        let mut comp = create_test_property("comp", 3, 150.0);
        comp.property_type = PropertyType::Apartment;

        // three perfect features plus a type mismatch
        let key = compute_key_similarity(&base, &comp, &config).unwrap();
        assert!((key - 75.0).abs() < 1e-9, "got {}", key);
    }

    #[test]
    fn test_secondary_drops_with_differences() {
        let config = ScoringConfig::default();
        let base = create_test_property("base", 3, 150.0);

        let mut comp = create_test_property("comp", 3, 150.0);
        comp.bathrooms = 1.0;
        comp.age = 40;

        let secondary = compute_secondary_similarity(&base, &comp, &config).unwrap();
        assert!(secondary > 0.0 && secondary < 100.0);
    }

    #[test]
    fn test_degenerate_tolerance_propagates() {
        let mut config = ScoringConfig::default();
        config.secondary_tolerances.condition.max_diff_percentage =
            config.secondary_tolerances.condition.tolerance_percentage;

        let base = create_test_property("base", 3, 150.0);
        let mut comp = create_test_property("comp", 3, 150.0);
        comp.condition = 2;
        let result = compute_secondary_similarity(&base, &comp, &config);

        assert!(matches!(
            result,
            Err(ScoringError::DegenerateTolerance { feature: "condition", .. })
        ));
    }

    #[test]
    fn test_weighted_average() {
        let avg = weighted_average(&[(100.0, 3.0), (0.0, 1.0)]).unwrap();
        assert!((avg - 75.0).abs() < 1e-9);

        assert!(weighted_average(&[(100.0, 0.0), (50.0, 0.0)]).is_err());
        assert!(weighted_average(&[]).is_err());
    }
}
