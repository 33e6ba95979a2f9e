use crate::core::{
    pricing::compute_pricing_stats,
    scoring::{compute_key_similarity, compute_secondary_similarity},
};
use crate::error::ScoringError;
use crate::models::{
    ComparableAnalysis, MatchResult, Property, RawProperty, ScoringConfig, SkippedComparable,
};

/// Score every comparable against the base property
///
/// Results keep the input order; each comparable is scored independently.
pub fn compute_matches(
    base: &Property,
    comparables: &[Property],
    config: &ScoringConfig,
) -> Result<Vec<MatchResult>, ScoringError> {
    comparables
        .iter()
        .map(|comp| {
            let primary_score = compute_key_similarity(base, comp, config)?;
            let secondary_score = compute_secondary_similarity(base, comp, config)?;
            Ok(MatchResult::new(
                comp.listing_name.clone(),
                primary_score,
                secondary_score,
            ))
        })
        .collect()
}

/// Comparable scoring orchestrator
///
/// Holds a validated `ScoringConfig` so callers can score repeatedly
/// without re-checking the tables.
#[derive(Debug, Clone)]
pub struct Matcher {
    config: ScoringConfig,
}

impl Matcher {
    /// Build a matcher, rejecting configurations that cannot produce a score
    pub fn new(config: ScoringConfig) -> Result<Self, ScoringError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn with_default_config() -> Self {
        Self {
            config: ScoringConfig::default(),
        }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Score comparables against the base property
    ///
    /// # Arguments
    /// * `base` - The property being priced
    /// * `comparables` - Candidate listings, in display order
    ///
    /// # Returns
    /// One `MatchResult` per comparable, in input order
    pub fn score(
        &self,
        base: &Property,
        comparables: &[Property],
    ) -> Result<Vec<MatchResult>, ScoringError> {
        tracing::debug!(
            "Scoring {} comparables against {}",
            comparables.len(),
            base.listing_name
        );

        let matches = compute_matches(base, comparables, &self.config)?;

        if let Some(best) = matches
            .iter()
            .max_by(|a, b| a.final_score.total_cmp(&b.final_score))
        {
            tracing::debug!(
                "Best comparable for {}: {} ({:.2})",
                base.listing_name,
                best.listing_name,
                best.final_score
            );
        }

        Ok(matches)
    }

    /// Score comparables and derive price-per-area statistics from the same list
    pub fn analyze(
        &self,
        base: &Property,
        comparables: &[Property],
    ) -> Result<ComparableAnalysis, ScoringError> {
        let matches = self.score(base, comparables)?;
        let pricing = compute_pricing_stats(comparables);
        let suggested_range = pricing.and_then(|stats| stats.suggested_range(base.size));

        Ok(ComparableAnalysis {
            matches,
            pricing,
            suggested_range,
            skipped: Vec::new(),
        })
    }

    /// Analyze loosely-typed comparables
    ///
    /// Comparables that fail to parse are reported in `skipped` and left out of
    /// the matches. Pricing reads price and size straight from the raw records,
    /// so a listing with an unusable field elsewhere still counts as a sample.
    pub fn analyze_raw(
        &self,
        base: &Property,
        comparables: &[RawProperty],
    ) -> Result<ComparableAnalysis, ScoringError> {
        let mut parsed = Vec::with_capacity(comparables.len());
        let mut skipped = Vec::new();

        for (index, raw) in comparables.iter().enumerate() {
            match raw.parse() {
                Ok(property) => parsed.push(property),
                Err(e) => {
                    tracing::info!(
                        "Skipping comparable #{} for {}: {}",
                        index + 1,
                        base.listing_name,
                        e
                    );
                    skipped.push(SkippedComparable {
                        index,
                        listing_name: raw.listing_name.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        let matches = self.score(base, &parsed)?;
        let pricing = compute_pricing_stats(comparables);
        let suggested_range = pricing.and_then(|stats| stats.suggested_range(base.size));

        Ok(ComparableAnalysis {
            matches,
            pricing,
            suggested_range,
            skipped,
        })
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_config()
    }
}
