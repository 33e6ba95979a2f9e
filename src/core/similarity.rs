use crate::error::ScoringError;
use crate::models::FeatureTolerance;

/// Calculate the similarity (0-100) of a comparable's feature value against the base value
///
/// Within `base * tolerance_percentage` the score follows a smooth asymptotic curve:
/// `100 * (1 - diff / (tolerance + diff))`
///
/// Between the tolerance and `base * max_diff_percentage` that curve is scaled
/// linearly down to zero, and from the max diff onwards the score is 0.
///
/// A comparable reporting 0 for a feature the base has is treated as missing the
/// feature and scores 0. Identical values, zeros included, are a perfect match
/// under any tolerance.
///
/// # Errors
/// `ScoringError::DegenerateTolerance` when the values differ, the base value is
/// positive and the two percentages are equal, since the interpolation interval
/// would be empty.
pub fn relative_similarity_score(
    feature: &'static str,
    base: f64,
    comp: f64,
    tolerance_percentage: f64,
    max_diff_percentage: f64,
) -> Result<f64, ScoringError> {
    if base > 0.0 && comp == 0.0 {
        return Ok(0.0);
    }
    if base == 0.0 && comp == 0.0 {
        return Ok(100.0);
    }

    let diff = (base - comp).abs();
    if diff == 0.0 {
        return Ok(100.0);
    }

    if base > 0.0 && tolerance_percentage == max_diff_percentage {
        return Err(ScoringError::DegenerateTolerance {
            feature,
            base,
            tolerance_percentage,
        });
    }

    let tolerance = base * tolerance_percentage;
    let max_diff = base * max_diff_percentage;

    if diff >= max_diff {
        return Ok(0.0);
    }

    let smooth = 100.0 * (1.0 - diff / (tolerance + diff));
    if diff <= tolerance {
        return Ok(smooth);
    }

    let factor = (max_diff - diff) / (max_diff - tolerance);
    Ok(smooth * factor)
}

/// Same as [`relative_similarity_score`] with the percentages taken from a tolerance entry
#[inline]
pub fn feature_similarity(
    feature: &'static str,
    base: f64,
    comp: f64,
    tolerance: &FeatureTolerance,
) -> Result<f64, ScoringError> {
    relative_similarity_score(
        feature,
        base,
        comp,
        tolerance.tolerance_percentage,
        tolerance.max_diff_percentage,
    )
}

/// 100 for a match, 0 otherwise
#[inline]
pub fn binary_similarity(matched: bool) -> f64 {
    if matched {
        100.0
    } else {
        0.0
    }
}
