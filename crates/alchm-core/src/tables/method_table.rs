//! Cooking method → elemental modifier vectors.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::types::ElementalVector;

/// Multiplicative 4-component modifier one cooking method applies to an
/// elemental vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElementalModifiers {
    pub fire: f64,
    pub water: f64,
    pub earth: f64,
    pub air: f64,
}

impl ElementalModifiers {
    pub fn new(fire: f64, water: f64, earth: f64, air: f64) -> Self {
        Self {
            fire,
            water,
            earth,
            air,
        }
    }

    /// Identity modifier.
    pub fn neutral() -> Self {
        Self::new(1.0, 1.0, 1.0, 1.0)
    }

    /// Component-wise multiply against a vector. The result is
    /// unnormalized; the transformer renormalizes once the full method
    /// sequence has been applied.
    pub fn apply(&self, vector: &ElementalVector) -> ElementalVector {
        ElementalVector::new(
            vector.fire * self.fire,
            vector.water * self.water,
            vector.earth * self.earth,
            vector.air * self.air,
        )
    }
}

/// Lookup from cooking-method id to its elemental modifiers.
///
/// Method ids are lowercase catalog identifiers ("grilling", "steaming").
/// A recipe referencing a method absent from this table fails validation;
/// silent pass-through would hide catalog drift.
///
/// The table carries a content fingerprint computed at construction.
/// Cached recipe computations key on it, so swapping in a changed table
/// invalidates every derived record without any explicit flush.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CookingMethodTable {
    methods: BTreeMap<String, ElementalModifiers>,
    fingerprint: String,
}

impl Default for CookingMethodTable {
    fn default() -> Self {
        let rows: [(&str, ElementalModifiers); 10] = [
            ("grilling", ElementalModifiers::new(1.4, 0.6, 0.9, 1.1)),
            ("steaming", ElementalModifiers::new(0.7, 1.4, 0.9, 1.0)),
            ("boiling", ElementalModifiers::new(0.8, 1.5, 0.9, 0.8)),
            ("baking", ElementalModifiers::new(1.2, 0.7, 1.2, 0.9)),
            ("roasting", ElementalModifiers::new(1.3, 0.7, 1.1, 1.0)),
            ("frying", ElementalModifiers::new(1.5, 0.5, 0.8, 1.2)),
            ("raw", ElementalModifiers::neutral()),
            ("fermenting", ElementalModifiers::new(0.9, 1.1, 1.2, 0.8)),
            ("braising", ElementalModifiers::new(1.1, 1.2, 1.1, 0.7)),
            ("smoking", ElementalModifiers::new(1.2, 0.6, 1.0, 1.3)),
        ];
        Self::from_rows(rows.into_iter().map(|(id, m)| (id.to_string(), m)))
    }
}

impl CookingMethodTable {
    /// Build a table from explicit rows, computing its fingerprint.
    pub fn from_rows(rows: impl IntoIterator<Item = (String, ElementalModifiers)>) -> Self {
        let methods: BTreeMap<String, ElementalModifiers> = rows.into_iter().collect();
        let fingerprint = fingerprint_of(&methods);
        Self {
            methods,
            fingerprint,
        }
    }

    pub fn modifiers(&self, method: &str) -> Option<&ElementalModifiers> {
        self.methods.get(method)
    }

    pub fn contains(&self, method: &str) -> bool {
        self.methods.contains_key(method)
    }

    /// Content fingerprint used in recipe cache keys.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }
}

fn fingerprint_of(methods: &BTreeMap<String, ElementalModifiers>) -> String {
    let json =
        serde_json::to_vec(methods).expect("method table serialization is infallible");
    let mut hasher = Sha256::new();
    hasher.update(&json);
    // 16 hex chars are plenty for a cache-key component.
    hex::encode(hasher.finalize())[..16].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grilling_boosts_fire_and_suppresses_water() {
        let table = CookingMethodTable::default();
        let grilling = table.modifiers("grilling").unwrap();
        assert_eq!(grilling.fire, 1.4);
        assert_eq!(grilling.water, 0.6);
    }

    #[test]
    fn fingerprint_changes_with_content() {
        let default_table = CookingMethodTable::default();
        let custom = CookingMethodTable::from_rows([(
            "grilling".to_string(),
            ElementalModifiers::new(2.0, 0.5, 0.9, 1.1),
        )]);
        assert_ne!(default_table.fingerprint(), custom.fingerprint());
    }

    #[test]
    fn identical_tables_share_a_fingerprint() {
        assert_eq!(
            CookingMethodTable::default().fingerprint(),
            CookingMethodTable::default().fingerprint()
        );
    }
}
