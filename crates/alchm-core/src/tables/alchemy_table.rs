//! Planet → alchemical contribution weights.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{AlchemicalCounts, Planet};

/// The four contribution weights one planet adds to the alchemical counts.
pub type AlchemicalContribution = AlchemicalCounts;

/// Fixed per-planet alchemical contributions.
///
/// The default table carries the canonical alchemizer weights: luminaries
/// and personal planets contribute whole units to their quantities, e.g.
/// the Sun contributes pure Spirit and the Moon contributes Essence and
/// Matter. The table is injected into [`crate::calc::AlchemicalDeriver`];
/// replacing it replaces the derivation, with no ambient state involved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanetaryAlchemyTable {
    contributions: BTreeMap<Planet, AlchemicalContribution>,
}

impl Default for PlanetaryAlchemyTable {
    fn default() -> Self {
        use Planet::*;
        // (Spirit, Essence, Matter, Substance) per planet.
        let rows = [
            (Sun, (1.0, 0.0, 0.0, 0.0)),
            (Moon, (0.0, 1.0, 1.0, 0.0)),
            (Mercury, (1.0, 0.0, 0.0, 1.0)),
            (Venus, (0.0, 1.0, 1.0, 0.0)),
            (Mars, (0.0, 1.0, 1.0, 0.0)),
            (Jupiter, (1.0, 1.0, 0.0, 0.0)),
            (Saturn, (1.0, 0.0, 1.0, 0.0)),
            (Uranus, (0.0, 1.0, 1.0, 0.0)),
            (Neptune, (0.0, 1.0, 0.0, 1.0)),
            (Pluto, (0.0, 1.0, 1.0, 0.0)),
        ];
        let contributions = rows
            .into_iter()
            .map(|(planet, (s, e, m, sub))| (planet, AlchemicalCounts::new(s, e, m, sub)))
            .collect();
        Self { contributions }
    }
}

impl PlanetaryAlchemyTable {
    /// Build a custom table from explicit rows.
    pub fn from_rows(
        rows: impl IntoIterator<Item = (Planet, AlchemicalContribution)>,
    ) -> Self {
        Self {
            contributions: rows.into_iter().collect(),
        }
    }

    /// Contribution for a planet; `None` for planets the table omits.
    pub fn contribution(&self, planet: Planet) -> Option<&AlchemicalContribution> {
        self.contributions.get(&planet)
    }
}
