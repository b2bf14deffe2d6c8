//! Chart comparison and personalization scoring.
//!
//! Compares a user's fixed natal snapshot against a freshly computed
//! moment snapshot and produces harmony scores plus the personalization
//! boost the recommendation layer multiplies into its base score.
//!
//! Moment charts are cached for a short TTL: planetary positions change
//! slowly relative to query frequency, so the cache key buckets time by
//! the TTL width.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use alchm_core::calc::{AlchemicalDeriver, ElementalAggregator};
use alchm_core::config::{BoostRange, EngineConfig, HarmonyWeights};
use alchm_core::error::EngineResult;
use alchm_core::tables::ZodiacElementTable;
use alchm_core::types::{MomentChart, NatalChart, PlanetaryPositions};

use crate::cache::ResultCache;
use crate::positions::ChainedPositionSource;

/// Resonance scores for planet-pair placement comparison.
const RESONANCE_SAME_SIGN: f64 = 1.0;
const RESONANCE_SAME_ELEMENT: f64 = 0.8;
const RESONANCE_COMPATIBLE_ELEMENT: f64 = 0.6;
const RESONANCE_BASELINE: f64 = 0.3;
/// Neutral resonance when the charts share no planets.
const RESONANCE_NEUTRAL: f64 = 0.5;

/// Result of comparing a natal chart against a moment chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HarmonyScores {
    /// Cosine similarity of the elemental vectors, rescaled to [0, 1].
    pub elemental_harmony: f64,
    /// Cosine similarity of the normalized alchemical counts, rescaled to
    /// [0, 1].
    pub alchemical_alignment: f64,
    /// Average per-planet placement resonance over shared planets.
    pub planetary_resonance: f64,
    /// Weighted combination of the three components.
    pub overall_harmony: f64,
    /// Personalization multiplier applied externally as
    /// `finalScore = baseScore × boost`.
    pub boost: f64,
}

/// Compares chart snapshots and builds them from position feeds.
pub struct ChartComparisonService {
    aggregator: ElementalAggregator,
    deriver: AlchemicalDeriver,
    zodiac: ZodiacElementTable,
    weights: HarmonyWeights,
    boost: BoostRange,
    positions: Arc<ChainedPositionSource>,
    cache: Arc<ResultCache>,
    moment_ttl: std::time::Duration,
}

impl ChartComparisonService {
    pub fn new(
        aggregator: ElementalAggregator,
        deriver: AlchemicalDeriver,
        zodiac: ZodiacElementTable,
        positions: Arc<ChainedPositionSource>,
        cache: Arc<ResultCache>,
        config: &EngineConfig,
    ) -> Self {
        Self {
            aggregator,
            deriver,
            zodiac,
            weights: config.harmony,
            boost: config.boost,
            positions,
            cache,
            moment_ttl: config.moment_ttl,
        }
    }

    /// Build the immutable natal snapshot from birth positions.
    ///
    /// Called once at profile creation; the result is stored by the
    /// caller and never recomputed.
    pub fn natal_chart(&self, positions: PlanetaryPositions) -> NatalChart {
        let elemental = self.aggregator.zodiac_elemental(&positions);
        let alchemical = self.deriver.derive(&positions);
        NatalChart {
            positions,
            elemental,
            alchemical,
        }
    }

    /// The moment chart for a query time, cached per TTL-wide time bucket.
    pub async fn moment_chart(&self, moment: DateTime<Utc>) -> EngineResult<MomentChart> {
        let bucket = moment.timestamp() / self.moment_ttl.as_secs().max(1) as i64;
        let key = format!("chart:moment:{bucket}");

        if let Some(cached) = self.cache.get_as::<MomentChart>(&key) {
            return Ok(cached);
        }

        let snapshot = self.positions.fetch(moment).await?;
        let elemental = self.aggregator.zodiac_elemental(&snapshot.positions);
        let alchemical = self.deriver.derive(&snapshot.positions);
        let chart = MomentChart {
            positions: snapshot.positions,
            elemental,
            alchemical,
            tier: snapshot.tier,
            computed_at: Utc::now(),
        };

        self.cache.put(&key, &chart, self.moment_ttl);
        debug!(key = %key, tier = ?chart.tier, "computed moment chart");
        Ok(chart)
    }

    /// Compare a natal chart against a moment chart.
    pub fn compare(&self, natal: &NatalChart, moment: &MomentChart) -> HarmonyScores {
        let elemental_harmony = rescale(natal.elemental.cosine_similarity(&moment.elemental));
        let alchemical_alignment =
            rescale(natal.alchemical.cosine_similarity(&moment.alchemical));
        let planetary_resonance = self.resonance(&natal.positions, &moment.positions);

        let overall_harmony = self.weights.elemental * elemental_harmony
            + self.weights.alchemical * alchemical_alignment
            + self.weights.planetary * planetary_resonance;

        HarmonyScores {
            elemental_harmony,
            alchemical_alignment,
            planetary_resonance,
            overall_harmony,
            boost: self.boost.boost_for(overall_harmony),
        }
    }

    /// Per-planet placement resonance, averaged over the planets present
    /// in both charts.
    fn resonance(&self, natal: &PlanetaryPositions, moment: &PlanetaryPositions) -> f64 {
        let mut total = 0.0;
        let mut compared = 0usize;

        for (planet, natal_placement) in natal.iter() {
            let Some(moment_placement) = moment.get(planet) else {
                continue;
            };
            compared += 1;

            if natal_placement.sign == moment_placement.sign {
                total += RESONANCE_SAME_SIGN;
                continue;
            }
            let natal_element = self.zodiac.element_of(natal_placement.sign);
            let moment_element = self.zodiac.element_of(moment_placement.sign);
            if natal_element == moment_element {
                total += RESONANCE_SAME_ELEMENT;
            } else if self.zodiac.compatible(natal_element, moment_element) {
                total += RESONANCE_COMPATIBLE_ELEMENT;
            } else {
                total += RESONANCE_BASELINE;
            }
        }

        if compared == 0 {
            return RESONANCE_NEUTRAL;
        }
        total / compared as f64
    }
}

/// Rescale a cosine similarity from [-1, 1] to [0, 1].
fn rescale(similarity: f64) -> f64 {
    (similarity + 1.0) / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use alchm_core::stubs::FixedPositionProvider;
    use alchm_core::types::{Planet, PlanetPlacement, PositionSourceTier, ZodiacSign};
    use std::time::Duration;

    fn service_with(positions: PlanetaryPositions) -> ChartComparisonService {
        let provider = Arc::new(FixedPositionProvider::new("fixed", positions));
        let chain = Arc::new(ChainedPositionSource::new(provider, Duration::from_millis(100)));
        ChartComparisonService::new(
            ElementalAggregator::default(),
            AlchemicalDeriver::default(),
            ZodiacElementTable::default(),
            chain,
            Arc::new(ResultCache::new(64)),
            &EngineConfig::default(),
        )
    }

    fn full_chart_positions() -> PlanetaryPositions {
        let mut positions = PlanetaryPositions::new();
        let signs = [
            ZodiacSign::Leo,
            ZodiacSign::Cancer,
            ZodiacSign::Virgo,
            ZodiacSign::Libra,
            ZodiacSign::Aries,
            ZodiacSign::Sagittarius,
            ZodiacSign::Capricorn,
            ZodiacSign::Taurus,
            ZodiacSign::Pisces,
            ZodiacSign::Scorpio,
        ];
        for (planet, sign) in Planet::ALL.into_iter().zip(signs) {
            positions.insert(planet, PlanetPlacement::direct(sign));
        }
        positions
    }

    #[tokio::test]
    async fn identical_charts_score_perfect_harmony() {
        let positions = full_chart_positions();
        let service = service_with(positions.clone());

        let natal = service.natal_chart(positions);
        let moment = service.moment_chart(Utc::now()).await.unwrap();

        let scores = service.compare(&natal, &moment);
        assert!((scores.elemental_harmony - 1.0).abs() < 1e-9);
        assert!((scores.alchemical_alignment - 1.0).abs() < 1e-9);
        assert!((scores.planetary_resonance - 1.0).abs() < 1e-9);
        assert!((scores.overall_harmony - 1.0).abs() < 1e-9);
        assert!((scores.boost - 1.3).abs() < 1e-9);
    }

    #[test]
    fn resonance_ladder_scores_each_relation() {
        let service = service_with(PlanetaryPositions::new());

        // Same sign: 1.0
        let natal = PlanetaryPositions::new()
            .with(Planet::Sun, PlanetPlacement::direct(ZodiacSign::Leo));
        let moment = natal.clone();
        assert!((service.resonance(&natal, &moment) - 1.0).abs() < 1e-9);

        // Same element, different sign: 0.8
        let moment = PlanetaryPositions::new()
            .with(Planet::Sun, PlanetPlacement::direct(ZodiacSign::Aries));
        assert!((service.resonance(&natal, &moment) - 0.8).abs() < 1e-9);

        // Compatible elements (Fire–Air): 0.6
        let moment = PlanetaryPositions::new()
            .with(Planet::Sun, PlanetPlacement::direct(ZodiacSign::Gemini));
        assert!((service.resonance(&natal, &moment) - 0.6).abs() < 1e-9);

        // Incompatible elements (Fire–Water): 0.3
        let moment = PlanetaryPositions::new()
            .with(Planet::Sun, PlanetPlacement::direct(ZodiacSign::Cancer));
        assert!((service.resonance(&natal, &moment) - 0.3).abs() < 1e-9);
    }

    #[test]
    fn disjoint_charts_get_neutral_resonance() {
        let service = service_with(PlanetaryPositions::new());
        let natal = PlanetaryPositions::new()
            .with(Planet::Sun, PlanetPlacement::direct(ZodiacSign::Leo));
        let moment = PlanetaryPositions::new()
            .with(Planet::Moon, PlanetPlacement::direct(ZodiacSign::Leo));
        assert!((service.resonance(&natal, &moment) - RESONANCE_NEUTRAL).abs() < 1e-9);
    }

    #[test]
    fn boost_increases_with_harmony() {
        let service = service_with(PlanetaryPositions::new());
        let fiery = service.natal_chart(
            PlanetaryPositions::new()
                .with(Planet::Sun, PlanetPlacement::direct(ZodiacSign::Aries))
                .with(Planet::Moon, PlanetPlacement::direct(ZodiacSign::Leo)),
        );
        let fiery_moment = MomentChart {
            positions: fiery.positions.clone(),
            elemental: fiery.elemental,
            alchemical: fiery.alchemical,
            tier: PositionSourceTier::Primary,
            computed_at: Utc::now(),
        };
        let watery = service.natal_chart(
            PlanetaryPositions::new()
                .with(Planet::Sun, PlanetPlacement::direct(ZodiacSign::Cancer))
                .with(Planet::Moon, PlanetPlacement::direct(ZodiacSign::Pisces)),
        );

        let aligned = service.compare(&fiery, &fiery_moment);
        let opposed = service.compare(&watery, &fiery_moment);
        assert!(aligned.overall_harmony > opposed.overall_harmony);
        assert!(aligned.boost > opposed.boost);
        assert!(opposed.boost >= 0.7 && aligned.boost <= 1.3);
    }

    #[tokio::test]
    async fn moment_chart_is_cached_within_ttl() {
        let positions = full_chart_positions();
        let provider = Arc::new(FixedPositionProvider::new("fixed", positions));
        let counter = provider.clone();
        let chain = Arc::new(ChainedPositionSource::new(provider, Duration::from_millis(100)));
        let service = ChartComparisonService::new(
            ElementalAggregator::default(),
            AlchemicalDeriver::default(),
            ZodiacElementTable::default(),
            chain,
            Arc::new(ResultCache::new(64)),
            &EngineConfig::default(),
        );

        let moment = Utc::now();
        service.moment_chart(moment).await.unwrap();
        service.moment_chart(moment).await.unwrap();
        // The second call served from cache without touching the feed.
        assert_eq!(counter.fetch_count(), 1);
    }
}
