//! Thermodynamic metrics from alchemical counts and an elemental vector.
//!
//! The six metrics, with S/E/M/U the counts (U = Substance) and
//! F/W/Er/A the elemental components:
//!
//! ```text
//! Heat       = (S² + F²) / (U + E + M + W + A + Er)²
//! Entropy    = (S² + U² + F² + A²) / (E + M + Er + W)²
//! Reactivity = (S² + U² + E² + F² + A² + W²) / (M + Er)²
//! GregsEnergy = Heat − Entropy × Reactivity
//! Kalchm     = (S^S × E^E) / (M^M × U^U)
//! Monica     = −GregsEnergy / (Reactivity × ln Kalchm)   when defined
//! ```
//!
//! Every ratio short-circuits to 0.0 on a zero denominator instead of
//! propagating a division fault, `0^0` is 1 by convention, and Monica is an
//! explicit `None` whenever Kalchm ≤ 0 or its own denominator vanishes.

use crate::types::{AlchemicalCounts, ElementalVector, ThermodynamicMetrics};

/// Pure function set for the thermodynamic metrics.
///
/// Stateless; exposed as a unit struct so call sites read as a component.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThermodynamicCalculator;

impl ThermodynamicCalculator {
    /// Compute all six metrics.
    pub fn compute(
        counts: &AlchemicalCounts,
        elements: &ElementalVector,
    ) -> ThermodynamicMetrics {
        let AlchemicalCounts {
            spirit,
            essence,
            matter,
            substance,
        } = *counts;
        let ElementalVector {
            fire,
            water,
            earth,
            air,
        } = *elements;

        let heat = ratio(
            spirit * spirit + fire * fire,
            substance + essence + matter + water + air + earth,
        );
        let entropy = ratio(
            spirit * spirit + substance * substance + fire * fire + air * air,
            essence + matter + earth + water,
        );
        let reactivity = ratio(
            spirit * spirit
                + substance * substance
                + essence * essence
                + fire * fire
                + air * air
                + water * water,
            matter + earth,
        );
        let gregs_energy = heat - entropy * reactivity;

        let kalchm =
            (self_pow(spirit) * self_pow(essence)) / (self_pow(matter) * self_pow(substance));

        let monica = monica(gregs_energy, reactivity, kalchm);

        ThermodynamicMetrics {
            heat,
            entropy,
            reactivity,
            gregs_energy,
            kalchm,
            monica,
        }
    }
}

/// `numerator / base²`, short-circuiting to 0.0 when the base is zero.
fn ratio(numerator: f64, base: f64) -> f64 {
    let denominator = base * base;
    if denominator == 0.0 {
        return 0.0;
    }
    numerator / denominator
}

/// Self-exponentiation with the `0^0 = 1` convention.
fn self_pow(x: f64) -> f64 {
    if x == 0.0 {
        1.0
    } else {
        x.powf(x)
    }
}

/// Monica is defined only when Kalchm is positive and the denominator
/// `Reactivity × ln Kalchm` is nonzero and the result is finite.
fn monica(gregs_energy: f64, reactivity: f64, kalchm: f64) -> Option<f64> {
    if kalchm <= 0.0 {
        return None;
    }
    let denominator = reactivity * kalchm.ln();
    if denominator == 0.0 {
        return None;
    }
    let value = -gregs_energy / denominator;
    value.is_finite().then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heat_matches_worked_example() {
        // Counts {3,5,4,2}, elements {0.4,0.3,0.2,0.1}:
        // Heat = (9 + 0.16) / (2+5+4+0.3+0.1+0.2)² = 9.16 / 136.89
        let counts = AlchemicalCounts::new(3.0, 5.0, 4.0, 2.0);
        let elements = ElementalVector::new(0.4, 0.3, 0.2, 0.1);
        let metrics = ThermodynamicCalculator::compute(&counts, &elements);
        assert!((metrics.heat - 9.16 / 136.89).abs() < 1e-4);
    }

    #[test]
    fn zero_denominators_short_circuit_to_zero() {
        let metrics = ThermodynamicCalculator::compute(
            &AlchemicalCounts::zero(),
            &ElementalVector::zero(),
        );
        assert_eq!(metrics.heat, 0.0);
        assert_eq!(metrics.entropy, 0.0);
        assert_eq!(metrics.reactivity, 0.0);
        assert_eq!(metrics.gregs_energy, 0.0);
    }

    #[test]
    fn kalchm_survives_zero_counts_via_zero_pow_zero() {
        // Matter = 0 and Substance = 0 must not raise: 0^0 = 1.
        let counts = AlchemicalCounts::new(2.0, 3.0, 0.0, 0.0);
        let elements = ElementalVector::uniform();
        let metrics = ThermodynamicCalculator::compute(&counts, &elements);
        assert!((metrics.kalchm - 4.0 * 27.0).abs() < 1e-9);
    }

    #[test]
    fn all_zero_counts_give_kalchm_one_and_no_monica() {
        // Kalchm = (1 × 1)/(1 × 1) = 1, ln 1 = 0, so Monica's denominator
        // vanishes and no stable equilibrium exists.
        let metrics = ThermodynamicCalculator::compute(
            &AlchemicalCounts::zero(),
            &ElementalVector::uniform(),
        );
        assert_eq!(metrics.kalchm, 1.0);
        assert_eq!(metrics.monica, None);
    }

    #[test]
    fn monica_is_defined_for_positive_kalchm_with_nonzero_denominator() {
        let counts = AlchemicalCounts::new(3.0, 5.0, 4.0, 2.0);
        let elements = ElementalVector::new(0.4, 0.3, 0.2, 0.1);
        let metrics = ThermodynamicCalculator::compute(&counts, &elements);
        assert!(metrics.kalchm > 0.0);
        let monica = metrics.monica.expect("monica should be defined");
        let expected =
            -metrics.gregs_energy / (metrics.reactivity * metrics.kalchm.ln());
        assert!((monica - expected).abs() < 1e-12);
    }

    #[test]
    fn entropy_and_reactivity_match_hand_computation() {
        let counts = AlchemicalCounts::new(3.0, 5.0, 4.0, 2.0);
        let elements = ElementalVector::new(0.4, 0.3, 0.2, 0.1);
        let metrics = ThermodynamicCalculator::compute(&counts, &elements);

        // Entropy = (9 + 4 + 0.16 + 0.01) / (5 + 4 + 0.2 + 0.3)²
        let entropy = (9.0 + 4.0 + 0.16 + 0.01) / ((5.0 + 4.0 + 0.2 + 0.3) * (5.0 + 4.0 + 0.2 + 0.3));
        assert!((metrics.entropy - entropy).abs() < 1e-12);

        // Reactivity = (9 + 4 + 25 + 0.16 + 0.01 + 0.09) / (4 + 0.2)²
        let reactivity = (9.0 + 4.0 + 25.0 + 0.16 + 0.01 + 0.09) / ((4.0 + 0.2) * (4.0 + 0.2));
        assert!((metrics.reactivity - reactivity).abs() < 1e-12);

        assert!(
            (metrics.gregs_energy - (metrics.heat - entropy * reactivity)).abs() < 1e-12
        );
    }
}
