//! Recipe computation pipeline.
//!
//! Orchestrates the pure calculators to turn a [`RecipeDefinition`] into a
//! [`RecipeComputedProperties`] record:
//!
//! 1. elemental aggregation (ingredients + optional zodiac timing)
//! 2. cooking-method transformation, in listed order
//! 3. alchemical derivation, only when the definition carries timing
//! 4. thermodynamic metrics
//!
//! Results are cached keyed by the definition's content hash plus the
//! method-table fingerprint, so both definition edits and method-table
//! swaps invalidate naturally. Concurrent computations of the same key are
//! coalesced: the first caller computes, the rest await and read the
//! cached result.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;
use tracing::debug;

use alchm_core::calc::{
    AlchemicalDeriver, CookingMethodTransformer, ElementalAggregator, ThermodynamicCalculator,
};
use alchm_core::config::EngineConfig;
use alchm_core::error::EngineResult;
use alchm_core::types::{
    AlchemicalCounts, RecipeComputedProperties, RecipeDefinition, SNAPSHOT_VERSION,
};

use crate::cache::ResultCache;

/// Orchestrator over the pure calculation layer.
pub struct RecipeComputationPipeline {
    aggregator: ElementalAggregator,
    transformer: CookingMethodTransformer,
    deriver: AlchemicalDeriver,
    cache: Arc<ResultCache>,
    config: EngineConfig,
    /// Per-key guards for single-flight coalescing.
    inflight: Mutex<HashMap<String, Arc<Mutex<()>>>>,
    computations: AtomicU64,
}

impl RecipeComputationPipeline {
    pub fn new(
        aggregator: ElementalAggregator,
        transformer: CookingMethodTransformer,
        deriver: AlchemicalDeriver,
        cache: Arc<ResultCache>,
        config: EngineConfig,
    ) -> Self {
        Self {
            aggregator,
            transformer,
            deriver,
            cache,
            config,
            inflight: Mutex::new(HashMap::new()),
            computations: AtomicU64::new(0),
        }
    }

    /// Cache key: content hash of the definition plus the method-table
    /// fingerprint.
    pub fn cache_key(&self, recipe: &RecipeDefinition) -> String {
        format!(
            "recipe:{}:{}",
            self.transformer.table_fingerprint(),
            recipe.content_hash()
        )
    }

    /// Number of actual (uncached) computations performed.
    pub fn computation_count(&self) -> u64 {
        self.computations.load(Ordering::Relaxed)
    }

    /// Compute or fetch the cached properties for a recipe.
    pub async fn compute(
        &self,
        recipe: &RecipeDefinition,
    ) -> EngineResult<RecipeComputedProperties> {
        let key = self.cache_key(recipe);

        if let Some(cached) = self.cache.get_as::<RecipeComputedProperties>(&key) {
            return Ok(cached);
        }

        // Single-flight: take the per-key guard, then re-check the cache.
        // A concurrent caller that lost the race finds the winner's result
        // already cached.
        let guard = {
            let mut inflight = self.inflight.lock().await;
            inflight.entry(key.clone()).or_default().clone()
        };
        let _held = guard.lock().await;

        if let Some(cached) = self.cache.get_as::<RecipeComputedProperties>(&key) {
            debug!(key = %key, "coalesced onto concurrent computation");
            return Ok(cached);
        }

        let properties = self.compute_uncached(recipe)?;
        self.cache
            .put(&key, &properties, self.config.recipe_cache.ttl);

        {
            let mut inflight = self.inflight.lock().await;
            inflight.remove(&key);
        }

        Ok(properties)
    }

    /// The uncached computation path; pure apart from the timestamp.
    fn compute_uncached(
        &self,
        recipe: &RecipeDefinition,
    ) -> EngineResult<RecipeComputedProperties> {
        recipe.validate()?;
        self.computations.fetch_add(1, Ordering::Relaxed);

        let ingredient_vec = self.aggregator.ingredient_elemental(&recipe.ingredients);
        let zodiac_vec = recipe
            .timing
            .as_ref()
            .map(|timing| self.aggregator.zodiac_elemental(timing));
        let (blended, has_timing) = self.aggregator.combine(&ingredient_vec, zodiac_vec.as_ref());

        let elemental = self.transformer.apply(&blended, &recipe.methods)?;

        // Counts come only from planetary timing; an untimed recipe gets an
        // explicit absence, and its thermodynamics run on zero counts.
        let alchemical = recipe.timing.as_ref().map(|timing| self.deriver.derive(timing));
        let thermodynamics = ThermodynamicCalculator::compute(
            &alchemical.unwrap_or_else(AlchemicalCounts::zero),
            &elemental,
        );

        Ok(RecipeComputedProperties {
            recipe_id: recipe.id,
            elemental,
            alchemical,
            thermodynamics,
            has_astrological_timing: has_timing,
            timing: recipe.timing.clone(),
            computed_at: Utc::now(),
            version: SNAPSHOT_VERSION,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alchm_core::tables::{CookingMethodTable, PlanetaryAlchemyTable};
    use alchm_core::types::{
        ElementalVector, IngredientRecord, Planet, PlanetPlacement, PlanetaryPositions,
        QuantityUnit, ZodiacSign,
    };

    fn pipeline() -> RecipeComputationPipeline {
        RecipeComputationPipeline::new(
            ElementalAggregator::default(),
            CookingMethodTransformer::new(CookingMethodTable::default()),
            AlchemicalDeriver::new(PlanetaryAlchemyTable::default()),
            Arc::new(ResultCache::new(128)),
            EngineConfig::default(),
        )
    }

    fn sample_recipe() -> RecipeDefinition {
        let beef = IngredientRecord::new(
            "beef",
            "meat",
            ElementalVector::new(0.5, 0.2, 0.25, 0.05),
        )
        .unwrap();
        let onion = IngredientRecord::new(
            "onion",
            "vegetable",
            ElementalVector::new(0.2, 0.4, 0.3, 0.1),
        )
        .unwrap();
        RecipeDefinition::new("grilled beef")
            .with_ingredient(beef, 400.0, QuantityUnit::Grams)
            .with_ingredient(onion, 80.0, QuantityUnit::Grams)
            .with_method("grilling")
            .with_timing(
                PlanetaryPositions::new()
                    .with(Planet::Sun, PlanetPlacement::direct(ZodiacSign::Leo))
                    .with(Planet::Moon, PlanetPlacement::direct(ZodiacSign::Cancer)),
            )
    }

    #[tokio::test]
    async fn timed_recipe_gets_counts_and_timing_flag() {
        let pipeline = pipeline();
        let properties = pipeline.compute(&sample_recipe()).await.unwrap();

        assert!(properties.has_astrological_timing);
        // Sun {1,0,0,0} + Moon {0,1,1,0}
        assert_eq!(
            properties.alchemical,
            Some(AlchemicalCounts::new(1.0, 1.0, 1.0, 0.0))
        );
        assert!(properties.elemental.is_normalized());
    }

    #[tokio::test]
    async fn untimed_recipe_has_explicitly_absent_counts() {
        let pipeline = pipeline();
        let mut recipe = sample_recipe();
        recipe.timing = None;

        let properties = pipeline.compute(&recipe).await.unwrap();
        assert!(!properties.has_astrological_timing);
        assert_eq!(properties.alchemical, None);
        // Thermodynamics still well-defined on the elemental vector alone.
        assert!(properties.thermodynamics.heat.is_finite());
    }

    #[tokio::test]
    async fn repeat_compute_hits_the_cache() {
        let pipeline = pipeline();
        let recipe = sample_recipe();

        let first = pipeline.compute(&recipe).await.unwrap();
        let second = pipeline.compute(&recipe).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(pipeline.computation_count(), 1);
    }

    #[tokio::test]
    async fn changed_definition_recomputes() {
        let pipeline = pipeline();
        let recipe = sample_recipe();
        pipeline.compute(&recipe).await.unwrap();

        let reworked = recipe.clone().with_method("steaming");
        pipeline.compute(&reworked).await.unwrap();
        assert_eq!(pipeline.computation_count(), 2);
    }

    #[tokio::test]
    async fn method_table_swap_invalidates_cached_results() {
        let cache = Arc::new(ResultCache::new(128));
        let recipe = sample_recipe();

        let pipeline_a = RecipeComputationPipeline::new(
            ElementalAggregator::default(),
            CookingMethodTransformer::new(CookingMethodTable::default()),
            AlchemicalDeriver::default(),
            cache.clone(),
            EngineConfig::default(),
        );
        pipeline_a.compute(&recipe).await.unwrap();

        // Same shared cache, different method table: the key differs, so
        // nothing stale is served.
        let custom_table = CookingMethodTable::from_rows([(
            "grilling".to_string(),
            alchm_core::tables::ElementalModifiers::new(2.0, 0.4, 0.9, 1.1),
        )]);
        let pipeline_b = RecipeComputationPipeline::new(
            ElementalAggregator::default(),
            CookingMethodTransformer::new(custom_table),
            AlchemicalDeriver::default(),
            cache,
            EngineConfig::default(),
        );
        pipeline_b.compute(&recipe).await.unwrap();
        assert_eq!(pipeline_b.computation_count(), 1);
    }

    #[tokio::test]
    async fn concurrent_computes_of_one_key_are_single_flighted() {
        let pipeline = Arc::new(pipeline());
        let recipe = sample_recipe();

        let mut handles = Vec::new();
        for _ in 0..8 {
            let pipeline = pipeline.clone();
            let recipe = recipe.clone();
            handles.push(tokio::spawn(async move {
                pipeline.compute(&recipe).await.unwrap()
            }));
        }
        let mut results = Vec::new();
        for handle in handles {
            results.push(handle.await.unwrap());
        }

        assert_eq!(pipeline.computation_count(), 1);
        assert!(results.windows(2).all(|pair| pair[0] == pair[1]));
    }
}
