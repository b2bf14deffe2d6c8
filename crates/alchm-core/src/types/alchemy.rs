//! The four alchemical quantities (ESMS): Spirit, Essence, Matter, Substance.
//!
//! [`AlchemicalCounts`] are additive counts, not proportions — there is no
//! normalization invariant. They are derived exclusively from planetary
//! positions via the alchemical deriver; an elemental vector is never a
//! legitimate source for them.

use serde::{Deserialize, Serialize};

use super::elements::cosine;

/// One of the four alchemical quantities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AlchemicalProperty {
    Spirit,
    Essence,
    Matter,
    Substance,
}

impl AlchemicalProperty {
    /// All four quantities, in canonical order.
    pub const ALL: [AlchemicalProperty; 4] = [
        AlchemicalProperty::Spirit,
        AlchemicalProperty::Essence,
        AlchemicalProperty::Matter,
        AlchemicalProperty::Substance,
    ];
}

/// Four non-negative alchemical counts {Spirit, Essence, Matter, Substance}.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlchemicalCounts {
    #[serde(rename = "Spirit")]
    pub spirit: f64,
    #[serde(rename = "Essence")]
    pub essence: f64,
    #[serde(rename = "Matter")]
    pub matter: f64,
    #[serde(rename = "Substance")]
    pub substance: f64,
}

impl AlchemicalCounts {
    pub fn new(spirit: f64, essence: f64, matter: f64, substance: f64) -> Self {
        Self {
            spirit,
            essence,
            matter,
            substance,
        }
    }

    /// The all-zero counts, used as an accumulation seed.
    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    /// Count for a given quantity.
    pub fn get(&self, property: AlchemicalProperty) -> f64 {
        match property {
            AlchemicalProperty::Spirit => self.spirit,
            AlchemicalProperty::Essence => self.essence,
            AlchemicalProperty::Matter => self.matter,
            AlchemicalProperty::Substance => self.substance,
        }
    }

    /// Sum of the four counts.
    pub fn total(&self) -> f64 {
        self.spirit + self.essence + self.matter + self.substance
    }

    /// Component-wise accumulation.
    pub fn accumulate(&mut self, other: &Self) {
        self.spirit += other.spirit;
        self.essence += other.essence;
        self.matter += other.matter;
        self.substance += other.substance;
    }

    /// Counts in canonical order.
    pub fn as_array(&self) -> [f64; 4] {
        [self.spirit, self.essence, self.matter, self.substance]
    }

    /// Proportions summing to 1.0, or all zeros when the total is zero.
    ///
    /// Used only where a caller explicitly needs a direction rather than a
    /// magnitude (chart alignment scoring); the counts themselves stay
    /// unnormalized.
    pub fn proportions(&self) -> [f64; 4] {
        let total = self.total();
        if total <= 0.0 {
            return [0.0; 4];
        }
        self.as_array().map(|c| c / total)
    }

    /// Cosine similarity between the proportion directions of two counts.
    pub fn cosine_similarity(&self, other: &Self) -> f64 {
        cosine(&self.proportions(), &other.proportions())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proportions_sum_to_one() {
        let counts = AlchemicalCounts::new(2.0, 1.0, 1.0, 1.0);
        let sum: f64 = counts.proportions().iter().sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn zero_counts_have_zero_proportions() {
        assert_eq!(AlchemicalCounts::zero().proportions(), [0.0; 4]);
    }

    #[test]
    fn accumulate_is_component_wise() {
        let mut acc = AlchemicalCounts::zero();
        acc.accumulate(&AlchemicalCounts::new(1.0, 0.0, 0.0, 1.0));
        acc.accumulate(&AlchemicalCounts::new(1.0, 1.0, 1.0, 0.0));
        assert_eq!(acc, AlchemicalCounts::new(2.0, 1.0, 1.0, 1.0));
    }

    #[test]
    fn identical_counts_align_perfectly() {
        let counts = AlchemicalCounts::new(3.0, 5.0, 4.0, 2.0);
        assert!((counts.cosine_similarity(&counts) - 1.0).abs() < 1e-9);
    }
}
