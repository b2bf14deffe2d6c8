//! Tier 2: recipe definitions (supplied) and computed properties (derived).
//!
//! A [`RecipeDefinition`] is owned by the recipe catalog; the engine derives
//! a [`RecipeComputedProperties`] record from it on demand. Computed records
//! are cached and never persisted as a source of truth: they are invalidated
//! whenever the definition or the cooking-method table changes, which the
//! pipeline encodes by keying its cache on [`RecipeDefinition::content_hash`]
//! plus the method-table fingerprint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::error::ValidationError;

use super::alchemy::AlchemicalCounts;
use super::celestial::PlanetaryPositions;
use super::elements::ElementalVector;
use super::ingredient::IngredientRecord;

/// Schema version stamped on computed snapshots exposed to the
/// recommendation layer.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Unit basis for recipe quantities.
///
/// The quantity scaling reference (default 100) is interpreted on the same
/// unit basis as the recipe, so the engine only needs the unit for identity
/// and display, not for conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuantityUnit {
    Grams,
    Milliliters,
    Pieces,
}

/// One ingredient line of a recipe: record reference, quantity, unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeIngredient {
    pub ingredient: IngredientRecord,
    pub quantity: f64,
    pub unit: QuantityUnit,
}

impl RecipeIngredient {
    pub fn new(ingredient: IngredientRecord, quantity: f64, unit: QuantityUnit) -> Self {
        Self {
            ingredient,
            quantity,
            unit,
        }
    }
}

/// A recipe as supplied by the recipe catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeDefinition {
    pub id: Uuid,
    pub name: String,
    /// Ordered ingredient lines.
    pub ingredients: Vec<RecipeIngredient>,
    /// Cooking methods in application order. Order is semantic:
    /// grill-then-steam is not steam-then-grill.
    pub methods: Vec<String>,
    /// Planetary positions at time of preparation, when the catalog
    /// captured them. Absent timing means alchemical counts are
    /// unavailable for this recipe — never approximated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timing: Option<PlanetaryPositions>,
}

/// Content view hashed for cache identity: everything that affects the
/// computed result, nothing that doesn't (id and display name are
/// excluded).
#[derive(Serialize)]
struct ContentView<'a> {
    ingredients: Vec<(Uuid, f64, QuantityUnit)>,
    methods: &'a [String],
    timing: &'a Option<PlanetaryPositions>,
}

impl RecipeDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            ingredients: Vec::new(),
            methods: Vec::new(),
            timing: None,
        }
    }

    pub fn with_ingredient(
        mut self,
        ingredient: IngredientRecord,
        quantity: f64,
        unit: QuantityUnit,
    ) -> Self {
        self.ingredients
            .push(RecipeIngredient::new(ingredient, quantity, unit));
        self
    }

    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.methods.push(method.into());
        self
    }

    pub fn with_timing(mut self, timing: PlanetaryPositions) -> Self {
        self.timing = Some(timing);
        self
    }

    /// Validate quantities at the catalog boundary.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for line in &self.ingredients {
            if !line.quantity.is_finite() {
                return Err(ValidationError::NonFinite {
                    field: "recipe.quantity",
                });
            }
            if line.quantity < 0.0 {
                return Err(ValidationError::Negative {
                    field: "recipe.quantity",
                    value: line.quantity,
                });
            }
            line.ingredient
                .elemental
                .validate("ingredient.elemental")?;
        }
        Ok(())
    }

    /// Content hash over ingredients, quantities, units, methods, and
    /// timing. Stable across processes: the underlying serialization uses
    /// ordered maps throughout.
    pub fn content_hash(&self) -> String {
        let view = ContentView {
            ingredients: self
                .ingredients
                .iter()
                .map(|line| (line.ingredient.id, line.quantity, line.unit))
                .collect(),
            methods: &self.methods,
            timing: &self.timing,
        };
        let json = serde_json::to_vec(&view).expect("content view serialization is infallible");
        let mut hasher = Sha256::new();
        hasher.update(&json);
        hex::encode(hasher.finalize())
    }
}

/// Thermodynamic metrics derived from alchemical counts and an elemental
/// vector.
///
/// `monica` is `None` whenever the system has no stable dynamic
/// equilibrium (Kalchm ≤ 0, or a vanishing denominator). Its absence is
/// itself meaningful and must never be coerced to a number.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThermodynamicMetrics {
    pub heat: f64,
    pub entropy: f64,
    pub reactivity: f64,
    pub gregs_energy: f64,
    pub kalchm: f64,
    pub monica: Option<f64>,
}

/// Tier 2 derived record: the full computed-property snapshot for one
/// recipe.
///
/// `alchemical` is present only when the definition carried planetary
/// timing; an untimed recipe has explicitly-absent counts, not a heuristic
/// guess. `timing` is retained on the record so the cuisine tier can
/// observe recurring planetary placements across members.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeComputedProperties {
    pub recipe_id: Uuid,
    /// Final post-cooking-method elemental vector, normalized.
    pub elemental: ElementalVector,
    /// Alchemical counts; `None` when the recipe has no planetary timing.
    pub alchemical: Option<AlchemicalCounts>,
    pub thermodynamics: ThermodynamicMetrics,
    /// Whether astrological timing contributed to the elemental blend.
    pub has_astrological_timing: bool,
    /// Planetary timing carried through for cuisine-level pattern analysis.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timing: Option<PlanetaryPositions>,
    pub computed_at: DateTime<Utc>,
    /// Snapshot schema version for the read-only consumer surface.
    pub version: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Planet, PlanetPlacement, ZodiacSign};

    fn ingredient(name: &str) -> IngredientRecord {
        IngredientRecord::new(name, "test", ElementalVector::new(0.4, 0.3, 0.2, 0.1)).unwrap()
    }

    #[test]
    fn content_hash_ignores_display_name() {
        let garlic = ingredient("garlic");
        let a = RecipeDefinition::new("aioli")
            .with_ingredient(garlic.clone(), 20.0, QuantityUnit::Grams)
            .with_method("raw");
        let mut b = a.clone();
        b.name = "allioli".into();
        assert_eq!(a.content_hash(), b.content_hash());
    }

    #[test]
    fn content_hash_tracks_quantity_methods_and_timing() {
        let garlic = ingredient("garlic");
        let base = RecipeDefinition::new("aioli")
            .with_ingredient(garlic.clone(), 20.0, QuantityUnit::Grams)
            .with_method("raw");

        let mut more_garlic = base.clone();
        more_garlic.ingredients[0].quantity = 40.0;
        assert_ne!(base.content_hash(), more_garlic.content_hash());

        let grilled = base.clone().with_method("grilling");
        assert_ne!(base.content_hash(), grilled.content_hash());

        let timed = base.clone().with_timing(
            PlanetaryPositions::new()
                .with(Planet::Sun, PlanetPlacement::direct(ZodiacSign::Aries)),
        );
        assert_ne!(base.content_hash(), timed.content_hash());
    }

    #[test]
    fn method_order_changes_the_hash() {
        let garlic = ingredient("garlic");
        let a = RecipeDefinition::new("x")
            .with_ingredient(garlic.clone(), 10.0, QuantityUnit::Grams)
            .with_method("grilling")
            .with_method("steaming");
        let b = RecipeDefinition::new("x")
            .with_ingredient(garlic, 10.0, QuantityUnit::Grams)
            .with_method("steaming")
            .with_method("grilling");
        assert_ne!(a.content_hash(), b.content_hash());
    }

    #[test]
    fn validate_rejects_negative_quantity() {
        let recipe = RecipeDefinition::new("bad")
            .with_ingredient(ingredient("salt"), -5.0, QuantityUnit::Grams);
        assert!(matches!(
            recipe.validate(),
            Err(ValidationError::Negative { .. })
        ));
    }
}
