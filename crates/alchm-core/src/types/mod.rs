//! Domain types for the alchm engine.
//!
//! Types are organized per tier:
//!
//! - Tier 1: [`IngredientRecord`] — immutable reference data from the
//!   ingredient catalog
//! - Tier 2: [`RecipeDefinition`] (supplied) and
//!   [`RecipeComputedProperties`] (derived, cached, never the source of
//!   truth)
//! - Tier 3: [`CuisineComputedProperties`] — statistical aggregate over
//!   member recipes
//!
//! Charts ([`NatalChart`], [`MomentChart`]) are computed-property snapshots
//! tagged by role: fixed birth snapshot vs recomputed-per-query snapshot.
//!
//! Every type here has a fixed, validated shape; external payloads are
//! rejected or coerced where they enter, never carried as untyped bags.

mod alchemy;
mod celestial;
mod chart;
mod cuisine;
mod elements;
mod ingredient;
mod property;
mod recipe;

pub use alchemy::{AlchemicalCounts, AlchemicalProperty};
pub use celestial::{
    Planet, PlanetPlacement, PlanetaryPositions, PositionSourceTier, PositionsSnapshot,
    ZodiacSign,
};
pub use chart::{MomentChart, NatalChart};
pub use cuisine::{
    CuisineComputedProperties, CuisineSignature, PlanetaryPattern, PropertyStats,
};
pub use elements::{Element, ElementalVector, NORMALIZATION_TOLERANCE};
pub use ingredient::IngredientRecord;
pub use property::PropertyKey;
pub use recipe::{
    QuantityUnit, RecipeComputedProperties, RecipeDefinition, RecipeIngredient,
    ThermodynamicMetrics, SNAPSHOT_VERSION,
};
