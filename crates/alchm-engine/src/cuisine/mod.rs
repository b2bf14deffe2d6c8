//! Cuisine-level statistical aggregation.
//!
//! Properties are independent, so the heavy lifting is map-reduce per
//! property: recipes are partitioned, partial sums accumulate per
//! partition, and partials merge. Rayon drives the partitioning.
//!
//! Signatures come from comparing a cuisine's per-property means against a
//! global baseline computed once across the whole corpus: any property
//! whose z-score magnitude exceeds the significance threshold is what
//! makes the cuisine statistically distinctive.

mod stats;

use std::collections::BTreeMap;

use chrono::Utc;
use rayon::prelude::*;
use tracing::debug;
use uuid::Uuid;

use alchm_core::config::EngineConfig;
use alchm_core::error::{EngineResult, ValidationError};
use alchm_core::tables::ZodiacElementTable;
use alchm_core::types::{
    CuisineComputedProperties, CuisineSignature, PlanetaryPattern, PropertyKey, PropertyStats,
    RecipeComputedProperties, SNAPSHOT_VERSION,
};

use stats::PartialSums;

/// Corpus-wide per-property means and standard deviations.
///
/// Computed once across the entire recipe corpus and refreshed
/// periodically by the caller; aggregation borrows it read-only.
#[derive(Debug, Clone, Default)]
pub struct GlobalBaseline {
    stats: BTreeMap<PropertyKey, PropertyStats>,
}

impl GlobalBaseline {
    /// Build the baseline from the full corpus.
    pub fn from_corpus(corpus: &[RecipeComputedProperties]) -> Self {
        let stats = PropertyKey::ALL
            .into_iter()
            .filter_map(|key| {
                let partial = partial_for(corpus, key, None);
                partial.finish().map(|stats| (key, stats))
            })
            .collect();
        Self { stats }
    }

    pub fn stats_for(&self, key: PropertyKey) -> Option<&PropertyStats> {
        self.stats.get(&key)
    }

    /// Z-score of a value against this baseline.
    ///
    /// Defined as 0.0 when the baseline has no spread (or no samples):
    /// in a uniform corpus nothing is distinctive.
    pub fn z_score(&self, key: PropertyKey, value: f64) -> f64 {
        let Some(stats) = self.stats.get(&key) else {
            return 0.0;
        };
        let std_dev = stats.variance.sqrt();
        if std_dev <= 0.0 {
            return 0.0;
        }
        (value - stats.mean) / std_dev
    }
}

/// Aggregates member recipes into a cuisine's statistical signature.
pub struct CuisineAggregator {
    baseline: GlobalBaseline,
    zodiac: ZodiacElementTable,
    significance_threshold: f64,
    pattern_recurrence_ratio: f64,
}

impl CuisineAggregator {
    pub fn new(baseline: GlobalBaseline, zodiac: ZodiacElementTable, config: &EngineConfig) -> Self {
        Self {
            baseline,
            zodiac,
            significance_threshold: config.significance_threshold,
            pattern_recurrence_ratio: config.pattern_recurrence_ratio,
        }
    }

    /// Aggregate member recipes, optionally popularity-weighted.
    ///
    /// Weights apply to the means; variance is the plain sample variance
    /// of the member values. A property absent on some members (counts of
    /// untimed recipes, undefined Monica) shrinks that property's sample
    /// rather than contributing a silent zero.
    pub fn aggregate(
        &self,
        cuisine_id: Uuid,
        name: &str,
        members: &[RecipeComputedProperties],
        weights: Option<&[f64]>,
    ) -> EngineResult<CuisineComputedProperties> {
        if let Some(weights) = weights {
            if weights.len() != members.len() {
                return Err(ValidationError::WeightCountMismatch {
                    weights: weights.len(),
                    records: members.len(),
                }
                .into());
            }
        }

        // Properties are independent: compute each one's partial sums over
        // the member set in parallel.
        let properties: BTreeMap<PropertyKey, PropertyStats> = PropertyKey::ALL
            .into_par_iter()
            .filter_map(|key| {
                partial_for(members, key, weights)
                    .finish()
                    .map(|stats| (key, stats))
            })
            .collect::<Vec<_>>()
            .into_iter()
            .collect();

        let mut signatures: Vec<CuisineSignature> = properties
            .iter()
            .filter_map(|(&property, stats)| {
                let global = self.baseline.stats_for(property)?;
                let z_score = self.baseline.z_score(property, stats.mean);
                (z_score.abs() > self.significance_threshold).then_some(CuisineSignature {
                    property,
                    cuisine_mean: stats.mean,
                    global_mean: global.mean,
                    z_score,
                })
            })
            .collect();
        signatures.sort_by(|a, b| {
            b.z_score
                .abs()
                .partial_cmp(&a.z_score.abs())
                .expect("z-scores are finite")
        });

        let patterns = self.recurring_patterns(members);

        debug!(
            cuisine = name,
            members = members.len(),
            signatures = signatures.len(),
            patterns = patterns.len(),
            "aggregated cuisine"
        );

        Ok(CuisineComputedProperties {
            cuisine_id,
            name: name.to_string(),
            recipe_count: members.len(),
            properties,
            signatures,
            patterns,
            computed_at: Utc::now(),
            version: SNAPSHOT_VERSION,
        })
    }

    /// Planetary placements recurring across the timed members.
    ///
    /// A placement recurs when it appears in at least the configured
    /// fraction of timed members, with an absolute floor of two.
    fn recurring_patterns(&self, members: &[RecipeComputedProperties]) -> Vec<PlanetaryPattern> {
        let timed: Vec<_> = members
            .iter()
            .filter_map(|record| record.timing.as_ref())
            .collect();
        if timed.len() < 2 {
            return Vec::new();
        }

        let mut occurrences = BTreeMap::new();
        for positions in &timed {
            for (planet, placement) in positions.iter() {
                *occurrences.entry((planet, placement.sign)).or_insert(0usize) += 1;
            }
        }

        let floor = ((timed.len() as f64 * self.pattern_recurrence_ratio).ceil() as usize).max(2);
        let mut patterns: Vec<PlanetaryPattern> = occurrences
            .into_iter()
            .filter(|&(_, count)| count >= floor)
            .map(|((planet, sign), count)| PlanetaryPattern {
                planet,
                sign,
                element: self.zodiac.element_of(sign),
                occurrences: count,
            })
            .collect();
        patterns.sort_by(|a, b| b.occurrences.cmp(&a.occurrences));
        patterns
    }
}

fn partial_for(
    members: &[RecipeComputedProperties],
    key: PropertyKey,
    weights: Option<&[f64]>,
) -> PartialSums {
    members
        .par_iter()
        .enumerate()
        .fold(PartialSums::default, |mut acc, (index, record)| {
            if let Some(value) = key.value_in(record) {
                let weight = weights.map_or(1.0, |w| w[index]);
                acc.push(value, weight);
            }
            acc
        })
        .reduce(PartialSums::default, PartialSums::merge)
}
