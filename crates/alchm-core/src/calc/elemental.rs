//! Elemental aggregation: ingredient-elemental, zodiac-elemental, and the
//! blend between them.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::tables::{PlanetWeightTable, ZodiacElementTable};
use crate::types::{ElementalVector, PlanetaryPositions, RecipeIngredient};

/// Quantity scaling parameters.
///
/// Larger quantities contribute more, but with diminishing marginal
/// contribution and no hard ceiling:
///
/// ```text
/// s = ln(1 + q/R) / ln(1 + Qmax/R)
/// ```
///
/// where `R` is the reference quantity and `Qmax` the maximum expected
/// quantity, both on the recipe's unit basis. At `q = Qmax` the factor is
/// exactly 1.0; beyond it the factor keeps growing slowly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuantityScaling {
    pub reference_qty: f64,
    pub max_expected_qty: f64,
}

impl Default for QuantityScaling {
    fn default() -> Self {
        Self {
            reference_qty: 100.0,
            max_expected_qty: 1000.0,
        }
    }
}

impl QuantityScaling {
    /// Scaling factor for a quantity. Zero quantity scales to zero.
    pub fn factor(&self, quantity: f64) -> f64 {
        if quantity <= 0.0 {
            return 0.0;
        }
        let numerator = (1.0 + quantity / self.reference_qty).ln();
        let denominator = (1.0 + self.max_expected_qty / self.reference_qty).ln();
        numerator / denominator
    }
}

/// Aggregates elemental vectors from ingredients and from planetary
/// positions, and blends the two.
#[derive(Debug, Clone)]
pub struct ElementalAggregator {
    zodiac: ZodiacElementTable,
    weights: PlanetWeightTable,
    scaling: QuantityScaling,
    /// Blend weight of the ingredient vector when zodiac data is present;
    /// the zodiac vector takes the complement.
    ingredient_blend: f64,
}

impl Default for ElementalAggregator {
    fn default() -> Self {
        Self::new(
            ZodiacElementTable::default(),
            PlanetWeightTable::default(),
            QuantityScaling::default(),
            0.7,
        )
    }
}

impl ElementalAggregator {
    pub fn new(
        zodiac: ZodiacElementTable,
        weights: PlanetWeightTable,
        scaling: QuantityScaling,
        ingredient_blend: f64,
    ) -> Self {
        Self {
            zodiac,
            weights,
            scaling,
            ingredient_blend: ingredient_blend.clamp(0.0, 1.0),
        }
    }

    /// Zodiac-elemental aggregation: accumulate each planet's element,
    /// weighted by the chart weight table, then normalize.
    ///
    /// An empty snapshot recovers to the neutral uniform vector.
    pub fn zodiac_elemental(&self, positions: &PlanetaryPositions) -> ElementalVector {
        let mut accumulated = ElementalVector::zero();
        for (planet, placement) in positions.iter() {
            let element = self.zodiac.element_of(placement.sign);
            *accumulated.get_mut(element) += self.weights.weight(planet);
        }
        if accumulated.sum() <= 0.0 {
            debug!("empty planetary snapshot, recovering to uniform elemental vector");
        }
        accumulated.normalized()
    }

    /// Ingredient-elemental aggregation with quantity scaling.
    ///
    /// Each ingredient's vector is scaled by the diminishing quantity
    /// factor and accumulated; the combined vector is renormalized. A
    /// recipe with no ingredients recovers to the neutral uniform vector
    /// rather than dividing by zero.
    pub fn ingredient_elemental(&self, ingredients: &[RecipeIngredient]) -> ElementalVector {
        if ingredients.is_empty() {
            debug!("recipe has no ingredients, recovering to uniform elemental vector");
            return ElementalVector::uniform();
        }
        let mut accumulated = ElementalVector::zero();
        for line in ingredients {
            let factor = self.scaling.factor(line.quantity);
            accumulated = accumulated.add(&line.ingredient.elemental.scale(factor));
        }
        accumulated.normalized()
    }

    /// Final pre-cooking-method blend.
    ///
    /// With zodiac data: `ingredient_blend × ingredient + (1 − blend) ×
    /// zodiac`. Without it the ingredient vector stands alone and the
    /// returned flag records that the recipe has no astrological timing.
    pub fn combine(
        &self,
        ingredient: &ElementalVector,
        zodiac: Option<&ElementalVector>,
    ) -> (ElementalVector, bool) {
        match zodiac {
            Some(zodiac) => {
                let blended = ingredient
                    .scale(self.ingredient_blend)
                    .add(&zodiac.scale(1.0 - self.ingredient_blend));
                (blended.normalized(), true)
            }
            None => (ingredient.normalized(), false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        Element, IngredientRecord, Planet, PlanetPlacement, QuantityUnit, ZodiacSign,
    };

    fn line(elemental: ElementalVector, quantity: f64) -> RecipeIngredient {
        RecipeIngredient::new(
            IngredientRecord::new("x", "test", elemental).unwrap(),
            quantity,
            QuantityUnit::Grams,
        )
    }

    #[test]
    fn scaling_factor_is_one_at_max_expected_quantity() {
        let scaling = QuantityScaling::default();
        assert!((scaling.factor(1000.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn scaling_has_diminishing_marginal_contribution() {
        let scaling = QuantityScaling::default();
        let small_gain = scaling.factor(200.0) - scaling.factor(100.0);
        let large_gain = scaling.factor(1000.0) - scaling.factor(900.0);
        assert!(small_gain > large_gain);
        // No hard ceiling: factors keep growing past Qmax.
        assert!(scaling.factor(2000.0) > scaling.factor(1000.0));
    }

    #[test]
    fn empty_recipe_recovers_to_uniform() {
        let aggregator = ElementalAggregator::default();
        assert_eq!(
            aggregator.ingredient_elemental(&[]),
            ElementalVector::uniform()
        );
    }

    #[test]
    fn ingredient_aggregation_is_normalized() {
        let aggregator = ElementalAggregator::default();
        let lines = vec![
            line(ElementalVector::new(0.8, 0.1, 0.05, 0.05), 300.0),
            line(ElementalVector::new(0.1, 0.6, 0.2, 0.1), 50.0),
        ];
        let combined = aggregator.ingredient_elemental(&lines);
        assert!(combined.is_normalized());
        // The heavier fiery ingredient dominates.
        assert!(combined.fire > combined.water);
    }

    #[test]
    fn zodiac_aggregation_weights_luminaries_higher() {
        let aggregator = ElementalAggregator::default();
        // Sun in a fire sign vs Pluto in a water sign: Sun carries 3.0
        // against Pluto's 0.5.
        let positions = PlanetaryPositions::new()
            .with(Planet::Sun, PlanetPlacement::direct(ZodiacSign::Aries))
            .with(Planet::Pluto, PlanetPlacement::direct(ZodiacSign::Scorpio));
        let vector = aggregator.zodiac_elemental(&positions);
        assert!(vector.is_normalized());
        assert!((vector.get(Element::Fire) - 3.0 / 3.5).abs() < 1e-9);
        assert!((vector.get(Element::Water) - 0.5 / 3.5).abs() < 1e-9);
    }

    #[test]
    fn empty_snapshot_recovers_to_uniform() {
        let aggregator = ElementalAggregator::default();
        assert_eq!(
            aggregator.zodiac_elemental(&PlanetaryPositions::new()),
            ElementalVector::uniform()
        );
    }

    #[test]
    fn combine_blends_seventy_thirty() {
        let aggregator = ElementalAggregator::default();
        let ingredient = ElementalVector::new(1.0, 0.0, 0.0, 0.0);
        let zodiac = ElementalVector::new(0.0, 1.0, 0.0, 0.0);
        let (blended, timed) = aggregator.combine(&ingredient, Some(&zodiac));
        assert!(timed);
        assert!((blended.fire - 0.7).abs() < 1e-9);
        assert!((blended.water - 0.3).abs() < 1e-9);
    }

    #[test]
    fn combine_without_zodiac_uses_ingredient_alone() {
        let aggregator = ElementalAggregator::default();
        let ingredient = ElementalVector::new(0.4, 0.3, 0.2, 0.1);
        let (blended, timed) = aggregator.combine(&ingredient, None);
        assert!(!timed);
        assert_eq!(blended, ingredient.normalized());
    }
}
