//! Tier 1: ingredient reference data.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

use super::celestial::Planet;
use super::elements::ElementalVector;

/// An ingredient as supplied by the catalog collaborator.
///
/// Immutable reference data: the engine reads these, never writes them.
/// The elemental vector is validated where the record enters the engine;
/// a record that fails validation is rejected, not coerced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientRecord {
    pub id: Uuid,
    pub name: String,
    /// Catalog category ("vegetable", "spice", "oil", ...).
    pub category: String,
    /// Normalized elemental profile of the ingredient itself.
    pub elemental: ElementalVector,
    /// Optional astrological affinity tags from the catalog.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub affinities: Vec<Planet>,
}

impl IngredientRecord {
    /// Construct a validated record at the catalog boundary.
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        elemental: ElementalVector,
    ) -> Result<Self, ValidationError> {
        elemental.validate("ingredient.elemental")?;
        Ok(Self {
            id: Uuid::new_v4(),
            name: name.into(),
            category: category.into(),
            elemental,
            affinities: Vec::new(),
        })
    }

    /// Attach astrological affinity tags.
    pub fn with_affinities(mut self, affinities: Vec<Planet>) -> Self {
        self.affinities = affinities;
        self
    }
}
