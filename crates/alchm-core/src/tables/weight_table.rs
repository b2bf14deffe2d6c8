//! Per-planet chart weights.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::Planet;

/// Configurable per-planet weights for zodiac-elemental aggregation.
///
/// Luminaries dominate a chart, personal planets matter more than social
/// ones, and the outer planets color rather than drive. These are tuning
/// constants, not hard business logic; the whole table is replaceable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanetWeightTable {
    weights: BTreeMap<Planet, f64>,
    /// Weight for planets absent from the table.
    default_weight: f64,
}

impl Default for PlanetWeightTable {
    fn default() -> Self {
        use Planet::*;
        let weights = [
            (Sun, 3.0),
            (Moon, 3.0),
            (Mercury, 1.5),
            (Venus, 1.5),
            (Mars, 1.5),
            (Jupiter, 1.0),
            (Saturn, 1.0),
            (Uranus, 0.5),
            (Neptune, 0.5),
            (Pluto, 0.5),
        ]
        .into_iter()
        .collect();
        Self {
            weights,
            default_weight: 1.0,
        }
    }
}

impl PlanetWeightTable {
    /// Equal weighting for every planet.
    pub fn uniform() -> Self {
        Self {
            weights: BTreeMap::new(),
            default_weight: 1.0,
        }
    }

    pub fn weight(&self, planet: Planet) -> f64 {
        self.weights
            .get(&planet)
            .copied()
            .unwrap_or(self.default_weight)
    }
}
