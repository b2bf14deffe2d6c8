//! Cooking-method transformation of elemental vectors.

use crate::error::ValidationError;
use crate::tables::CookingMethodTable;
use crate::types::ElementalVector;

/// Applies per-method multiplicative modifiers in sequence.
///
/// Methods compose in the order listed and the order is semantic:
/// grilling-then-steaming concentrates Fire before Water dampens it, which
/// lands differently than the reverse. The composed result is renormalized
/// once at the end.
#[derive(Debug, Clone, Default)]
pub struct CookingMethodTransformer {
    table: CookingMethodTable,
}

impl CookingMethodTransformer {
    pub fn new(table: CookingMethodTable) -> Self {
        Self { table }
    }

    /// Fingerprint of the underlying method table, for cache identity.
    pub fn table_fingerprint(&self) -> &str {
        self.table.fingerprint()
    }

    /// Apply each method's modifiers in listed order, then renormalize.
    ///
    /// An empty method list is a no-op apart from renormalization. A method
    /// missing from the table is a validation error: the recipe catalog and
    /// the method table have drifted, and silently skipping the method
    /// would compute a wrong vector.
    pub fn apply(
        &self,
        vector: &ElementalVector,
        methods: &[String],
    ) -> Result<ElementalVector, ValidationError> {
        let mut current = *vector;
        for method in methods {
            let modifiers = self
                .table
                .modifiers(method)
                .ok_or_else(|| ValidationError::UnknownCookingMethod(method.clone()))?;
            current = modifiers.apply(&current);
        }
        Ok(current.normalized())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vector() -> ElementalVector {
        ElementalVector::new(0.4, 0.3, 0.2, 0.1)
    }

    #[test]
    fn empty_method_list_is_a_noop() {
        let transformer = CookingMethodTransformer::default();
        let input = vector();
        let output = transformer.apply(&input, &[]).unwrap();
        assert_eq!(output, input.normalized());
    }

    #[test]
    fn grilling_shifts_balance_toward_fire() {
        let transformer = CookingMethodTransformer::default();
        let output = transformer
            .apply(&vector(), &["grilling".to_string()])
            .unwrap();
        assert!(output.is_normalized());
        assert!(output.fire > vector().fire);
        assert!(output.water < vector().water);
    }

    #[test]
    fn methods_compose_sequentially() {
        let transformer = CookingMethodTransformer::default();
        let composed = transformer
            .apply(&vector(), &["grilling".to_string(), "steaming".to_string()])
            .unwrap();
        // grilling then steaming: fire 0.4×1.4×0.7, water 0.3×0.6×1.4,
        // earth 0.2×0.9×0.9, air 0.1×1.1×1.0, renormalized.
        let expected =
            ElementalVector::new(0.4 * 1.4 * 0.7, 0.3 * 0.6 * 1.4, 0.2 * 0.9 * 0.9, 0.1 * 1.1)
                .normalized();
        assert!((composed.fire - expected.fire).abs() < 1e-12);
        assert!((composed.water - expected.water).abs() < 1e-12);
        assert!((composed.earth - expected.earth).abs() < 1e-12);
        assert!((composed.air - expected.air).abs() < 1e-12);
    }

    #[test]
    fn unknown_method_is_rejected() {
        let transformer = CookingMethodTransformer::default();
        let err = transformer
            .apply(&vector(), &["sous-vide".to_string()])
            .unwrap_err();
        assert!(matches!(err, ValidationError::UnknownCookingMethod(m) if m == "sous-vide"));
    }
}
