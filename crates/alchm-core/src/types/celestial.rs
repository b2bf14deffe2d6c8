//! Planets, zodiac signs, and planetary-position snapshots.
//!
//! A [`PlanetaryPositions`] value maps each of the ten scoring bodies to a
//! zodiac placement. It is created per astronomical query and immutable
//! once fetched; the engine never mutates a snapshot in place.
//!
//! Wire names are lowercase (`"sun"`, `"aries"`) to match the position
//! feed.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The ten scoring bodies.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Planet {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
}

impl Planet {
    /// All ten bodies, luminaries first.
    pub const ALL: [Planet; 10] = [
        Planet::Sun,
        Planet::Moon,
        Planet::Mercury,
        Planet::Venus,
        Planet::Mars,
        Planet::Jupiter,
        Planet::Saturn,
        Planet::Uranus,
        Planet::Neptune,
        Planet::Pluto,
    ];
}

impl std::fmt::Display for Planet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// The twelve zodiac signs.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

impl ZodiacSign {
    /// All twelve signs in zodiacal order.
    pub const ALL: [ZodiacSign; 12] = [
        ZodiacSign::Aries,
        ZodiacSign::Taurus,
        ZodiacSign::Gemini,
        ZodiacSign::Cancer,
        ZodiacSign::Leo,
        ZodiacSign::Virgo,
        ZodiacSign::Libra,
        ZodiacSign::Scorpio,
        ZodiacSign::Sagittarius,
        ZodiacSign::Capricorn,
        ZodiacSign::Aquarius,
        ZodiacSign::Pisces,
    ];
}

impl std::fmt::Display for ZodiacSign {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// A single body's placement: sign plus retrograde flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanetPlacement {
    pub sign: ZodiacSign,
    /// Whether the body is in apparent retrograde motion.
    #[serde(default, rename = "isRetrograde")]
    pub retrograde: bool,
}

impl PlanetPlacement {
    pub fn direct(sign: ZodiacSign) -> Self {
        Self {
            sign,
            retrograde: false,
        }
    }

    pub fn retrograde(sign: ZodiacSign) -> Self {
        Self {
            sign,
            retrograde: true,
        }
    }
}

/// Mapping from bodies to placements for one astronomical moment.
///
/// A subset of the ten bodies is legal; absent bodies simply do not
/// contribute to any derivation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlanetaryPositions {
    placements: BTreeMap<Planet, PlanetPlacement>,
}

impl PlanetaryPositions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insertion, used by tests and the default chart.
    pub fn with(mut self, planet: Planet, placement: PlanetPlacement) -> Self {
        self.placements.insert(planet, placement);
        self
    }

    pub fn insert(&mut self, planet: Planet, placement: PlanetPlacement) {
        self.placements.insert(planet, placement);
    }

    pub fn get(&self, planet: Planet) -> Option<&PlanetPlacement> {
        self.placements.get(&planet)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Planet, &PlanetPlacement)> {
        self.placements.iter().map(|(p, pl)| (*p, pl))
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }
}

/// Which fallback tier served a position snapshot.
///
/// Ordered from freshest to stalest; anything past `Secondary` means the
/// data did not come from a live astronomical service.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PositionSourceTier {
    /// Primary astronomical service.
    Primary,
    /// Secondary public service.
    Secondary,
    /// Last-known cached positions from an earlier successful fetch.
    LastKnown,
    /// Hardcoded safe default chart; used only when all else fails.
    DefaultChart,
}

impl PositionSourceTier {
    /// Whether the snapshot came from a live fetch rather than a fallback.
    pub fn is_fresh(&self) -> bool {
        matches!(self, PositionSourceTier::Primary | PositionSourceTier::Secondary)
    }
}

/// A served position snapshot with its provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionsSnapshot {
    pub positions: PlanetaryPositions,
    /// Fallback tier that produced this snapshot.
    pub tier: PositionSourceTier,
    /// When the underlying positions were actually fetched. For the
    /// last-known tier this is the original fetch time, not the serve time.
    pub fetched_at: DateTime<Utc>,
}
