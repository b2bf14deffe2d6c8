//! Tier 3: cuisine-level statistical aggregates.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::celestial::{Planet, ZodiacSign};
use super::elements::Element;
use super::property::PropertyKey;

/// Weighted mean and sample variance of one property across a recipe set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PropertyStats {
    pub mean: f64,
    pub variance: f64,
    /// Recipes that actually carried this property. Smaller than the
    /// member count when a property was absent on some records.
    pub samples: usize,
}

/// A property whose cuisine mean deviates significantly from the global
/// baseline (|z| > the configured threshold).
///
/// This is what makes a cuisine statistically distinctive: high Essence
/// from oil extraction, low Entropy from minimal transformation, and so on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CuisineSignature {
    pub property: PropertyKey,
    pub cuisine_mean: f64,
    pub global_mean: f64,
    pub z_score: f64,
}

/// A planetary placement recurring across a cuisine's timed members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanetaryPattern {
    pub planet: Planet,
    pub sign: ZodiacSign,
    pub element: Element,
    /// Number of timed member recipes carrying this placement.
    pub occurrences: usize,
}

/// Tier 3 aggregate: a cuisine's statistical signature over its member
/// recipes, exposed to the recommendation layer as a read-only versioned
/// snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CuisineComputedProperties {
    pub cuisine_id: Uuid,
    pub name: String,
    /// Member recipes that fed the aggregate.
    pub recipe_count: usize,
    /// Per-property weighted means and sample variances.
    pub properties: BTreeMap<PropertyKey, PropertyStats>,
    /// Significant deviations from the global baseline, sorted by |z|
    /// descending.
    pub signatures: Vec<CuisineSignature>,
    /// Recurring planetary placements among timed members.
    pub patterns: Vec<PlanetaryPattern>,
    pub computed_at: DateTime<Utc>,
    pub version: u32,
}
