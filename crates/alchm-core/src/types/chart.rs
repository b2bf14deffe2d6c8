//! Chart snapshots: fixed natal charts and short-lived moment charts.
//!
//! Both carry the same computed triple {positions, elemental vector,
//! alchemical counts}; the distinct types tag the role. A natal chart is
//! computed once at profile creation and immutable thereafter. A moment
//! chart is recomputed from the current position feed and cached with a
//! short TTL, since planetary positions change slowly relative to query
//! frequency.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::alchemy::AlchemicalCounts;
use super::celestial::{PlanetaryPositions, PositionSourceTier};
use super::elements::ElementalVector;

/// Fixed birth snapshot: positions and derived properties at the
/// reference moment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NatalChart {
    pub positions: PlanetaryPositions,
    pub elemental: ElementalVector,
    pub alchemical: AlchemicalCounts,
}

/// Recomputed-per-query snapshot for the current moment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MomentChart {
    pub positions: PlanetaryPositions,
    pub elemental: ElementalVector,
    pub alchemical: AlchemicalCounts,
    /// Fallback tier that served the underlying positions; anything other
    /// than a fresh tier marks the chart as stale data.
    pub tier: PositionSourceTier,
    pub computed_at: DateTime<Utc>,
}
