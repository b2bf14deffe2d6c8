//! Scalar property keys for the statistical layer.

use serde::{Deserialize, Serialize};

use super::recipe::RecipeComputedProperties;

/// One of the fourteen scalar properties a computed recipe record carries:
/// four elements, four alchemical counts, six thermodynamic metrics.
///
/// Serialized as a plain string so it can key JSON maps in cuisine
/// snapshots.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum PropertyKey {
    Fire,
    Water,
    Earth,
    Air,
    Spirit,
    Essence,
    Matter,
    Substance,
    Heat,
    Entropy,
    Reactivity,
    GregsEnergy,
    Kalchm,
    Monica,
}

impl PropertyKey {
    /// All fourteen properties in canonical order.
    pub const ALL: [PropertyKey; 14] = [
        PropertyKey::Fire,
        PropertyKey::Water,
        PropertyKey::Earth,
        PropertyKey::Air,
        PropertyKey::Spirit,
        PropertyKey::Essence,
        PropertyKey::Matter,
        PropertyKey::Substance,
        PropertyKey::Heat,
        PropertyKey::Entropy,
        PropertyKey::Reactivity,
        PropertyKey::GregsEnergy,
        PropertyKey::Kalchm,
        PropertyKey::Monica,
    ];

    /// Extract this property's value from a computed record.
    ///
    /// Returns `None` where the value is genuinely absent: the alchemical
    /// counts of an untimed recipe, or an undefined Monica. Absent values
    /// shrink the sample, they never contribute a silent zero.
    pub fn value_in(&self, record: &RecipeComputedProperties) -> Option<f64> {
        match self {
            PropertyKey::Fire => Some(record.elemental.fire),
            PropertyKey::Water => Some(record.elemental.water),
            PropertyKey::Earth => Some(record.elemental.earth),
            PropertyKey::Air => Some(record.elemental.air),
            PropertyKey::Spirit => record.alchemical.map(|c| c.spirit),
            PropertyKey::Essence => record.alchemical.map(|c| c.essence),
            PropertyKey::Matter => record.alchemical.map(|c| c.matter),
            PropertyKey::Substance => record.alchemical.map(|c| c.substance),
            PropertyKey::Heat => Some(record.thermodynamics.heat),
            PropertyKey::Entropy => Some(record.thermodynamics.entropy),
            PropertyKey::Reactivity => Some(record.thermodynamics.reactivity),
            PropertyKey::GregsEnergy => Some(record.thermodynamics.gregs_energy),
            PropertyKey::Kalchm => Some(record.thermodynamics.kalchm),
            PropertyKey::Monica => record.thermodynamics.monica,
        }
    }
}

impl std::fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}
