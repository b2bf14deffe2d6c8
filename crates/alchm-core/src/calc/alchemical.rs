//! Derivation of alchemical counts from planetary positions.

use crate::tables::PlanetaryAlchemyTable;
use crate::types::{AlchemicalCounts, PlanetaryPositions};

/// Sums per-planet alchemical contributions over a position snapshot.
///
/// This is the only legitimate source of [`AlchemicalCounts`]. There is
/// deliberately no elemental-to-alchemical approximation anywhere in the
/// engine: a caller without planetary positions gets "counts unavailable"
/// (`None` on the computed record), not a heuristic guess.
#[derive(Debug, Clone, Default)]
pub struct AlchemicalDeriver {
    table: PlanetaryAlchemyTable,
}

impl AlchemicalDeriver {
    pub fn new(table: PlanetaryAlchemyTable) -> Self {
        Self { table }
    }

    /// Component-wise sum of table contributions over the planets present
    /// in the snapshot. A subset of planets is legal; absent planets and
    /// planets the table omits simply do not contribute.
    pub fn derive(&self, positions: &PlanetaryPositions) -> AlchemicalCounts {
        let mut counts = AlchemicalCounts::zero();
        for (planet, _placement) in positions.iter() {
            if let Some(contribution) = self.table.contribution(planet) {
                counts.accumulate(contribution);
            }
        }
        counts
    }
}
