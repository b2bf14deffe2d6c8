//! alchm Core Library
//!
//! Pure computation layer for the alchm culinary-property engine: derives
//! elemental, alchemical, and thermodynamic properties for culinary entities
//! from astronomical input.
//!
//! # Architecture
//!
//! This crate defines:
//! - Domain types per tier (`IngredientRecord`, `RecipeDefinition`,
//!   `RecipeComputedProperties`, `CuisineComputedProperties`, charts)
//! - Injected lookup tables (`PlanetaryAlchemyTable`, `ZodiacElementTable`,
//!   `PlanetWeightTable`, `CookingMethodTable`)
//! - Pure calculators (`AlchemicalDeriver`, `ElementalAggregator`,
//!   `CookingMethodTransformer`, `ThermodynamicCalculator`)
//! - Error types and result aliases
//! - The `PositionProvider` seam for planetary-position feeds
//!
//! All calculators are pure and stateless apart from their injected tables:
//! safe to invoke concurrently across independent recipes with no locking.
//! There is no ambient global state anywhere in this crate; every table and
//! threshold is constructed explicitly and passed by reference.
//!
//! # Example
//!
//! ```
//! use alchm_core::calc::ThermodynamicCalculator;
//! use alchm_core::types::{AlchemicalCounts, ElementalVector};
//!
//! let counts = AlchemicalCounts::new(3.0, 5.0, 4.0, 2.0);
//! let elements = ElementalVector::new(0.4, 0.3, 0.2, 0.1);
//! let metrics = ThermodynamicCalculator::compute(&counts, &elements);
//! assert!((metrics.heat - 0.0669).abs() < 1e-4);
//! ```

pub mod calc;
pub mod config;
pub mod error;
pub mod stubs;
pub mod tables;
pub mod traits;
pub mod types;

// Re-exports for convenience
pub use config::EngineConfig;
pub use error::{EngineError, EngineResult};
pub use types::{AlchemicalCounts, ElementalVector, ThermodynamicMetrics};
