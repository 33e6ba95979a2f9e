use crate::models::{Location, LocationWeights};

/// Calculate location similarity (0-100) from exact matches per administrative level
///
/// Each matching level (province, canton, district) awards its weight; levels
/// are compared with case-sensitive string equality and never partially.
#[inline]
pub fn weighted_location_similarity(
    base: &Location,
    comp: &Location,
    weights: &LocationWeights,
) -> f64 {
    let mut score = 0.0;

    if base.province == comp.province {
        score += weights.province;
    }
    if base.canton == comp.canton {
        score += weights.canton;
    }
    if base.district == comp.district {
        score += weights.district;
    }

    score * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn similarity(base: &Location, comp: &Location) -> f64 {
        weighted_location_similarity(base, comp, &LocationWeights::default())
    }

    #[test]
    fn test_same_canton_different_district() {
        let base = Location::new("A", "A", "A");
        let comp = Location::new("A", "A", "B");

        assert!((similarity(&base, &comp) - 80.0).abs() < 1e-9);
    }

    #[test]
    fn test_full_and_no_match() {
        let base = Location::new("San José", "Escazú", "San Rafael");

        assert!((similarity(&base, &base) - 100.0).abs() < 1e-9);
        assert_eq!(
            similarity(&base, &Location::new("Heredia", "Belén", "La Ribera")),
            0.0
        );
    }

    #[test]
    fn test_case_sensitive() {
        let base = Location::new("San José", "Escazú", "San Rafael");
        let comp = Location::new("san josé", "Escazú", "San Rafael");

        assert!((similarity(&base, &comp) - 55.0).abs() < 1e-9);
    }

    #[test]
    fn test_only_subset_sums_possible() {
        let expected = [0.0, 20.0, 35.0, 45.0, 55.0, 65.0, 80.0, 100.0];
        let base = Location::new("P", "C", "D");

        for mask in 0..8u8 {
            let comp = Location::new(
                if mask & 1 != 0 { "P" } else { "x" },
                if mask & 2 != 0 { "C" } else { "x" },
                if mask & 4 != 0 { "D" } else { "x" },
            );
            let value = similarity(&base, &comp);
            assert!(
                expected.iter().any(|e| (e - value).abs() < 1e-9),
                "unexpected location score {}",
                value
            );
        }
    }
}
