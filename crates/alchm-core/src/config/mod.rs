//! Engine configuration.
//!
//! Everything tunable lives here and is injected at construction time.
//! Defaults reproduce production behavior; tests and exotic deployments
//! override individual fields.

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub use crate::calc::QuantityScaling;

/// Weights for the three harmony components in chart comparison.
///
/// The 0.4/0.3/0.3 split is a tuning constant, asserted by practice rather
/// than derived; treat it as adjustable, not proven-optimal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HarmonyWeights {
    pub elemental: f64,
    pub alchemical: f64,
    pub planetary: f64,
}

impl Default for HarmonyWeights {
    fn default() -> Self {
        Self {
            elemental: 0.4,
            alchemical: 0.3,
            planetary: 0.3,
        }
    }
}

/// Range of the personalization boost multiplier.
///
/// The boost grows monotonically with overall harmony and is applied by
/// the downstream recommendation scorer as `finalScore = baseScore ×
/// boost`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoostRange {
    pub min: f64,
    pub max: f64,
}

impl Default for BoostRange {
    fn default() -> Self {
        Self { min: 0.7, max: 1.3 }
    }
}

impl BoostRange {
    /// Linear map of a [0, 1] harmony score into the boost range.
    pub fn boost_for(&self, overall_harmony: f64) -> f64 {
        let clamped = overall_harmony.clamp(0.0, 1.0);
        self.min + (self.max - self.min) * clamped
    }
}

/// Capacity and TTL for one cache tier usage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CacheTierConfig {
    pub capacity: usize,
    pub ttl: Duration,
}

/// Top-level engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Quantity scaling for ingredient aggregation.
    pub quantity_scaling: QuantityScaling,
    /// Blend weight of the ingredient vector against the zodiac vector.
    pub ingredient_blend: f64,
    /// Harmony component weights for chart comparison.
    pub harmony: HarmonyWeights,
    /// Personalization boost range.
    pub boost: BoostRange,
    /// |z| above which a property becomes a cuisine signature.
    pub significance_threshold: f64,
    /// Fraction of timed members a placement must appear in to count as a
    /// recurring planetary pattern.
    pub pattern_recurrence_ratio: f64,
    /// TTL of the cached moment chart.
    pub moment_ttl: Duration,
    /// Hot-tier settings for cached recipe computations.
    pub recipe_cache: CacheTierConfig,
    /// Timeout applied to each network position-provider tier.
    pub fetch_timeout: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            quantity_scaling: QuantityScaling::default(),
            ingredient_blend: 0.7,
            harmony: HarmonyWeights::default(),
            boost: BoostRange::default(),
            significance_threshold: 1.5,
            pattern_recurrence_ratio: 0.5,
            moment_ttl: Duration::from_secs(300),
            recipe_cache: CacheTierConfig {
                capacity: 2048,
                ttl: Duration::from_secs(3600),
            },
            fetch_timeout: Duration::from_secs(5),
        }
    }
}
