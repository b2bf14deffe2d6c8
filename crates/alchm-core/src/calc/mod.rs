//! Pure calculators.
//!
//! Everything in this module is a pure function of its inputs and injected
//! tables: no interior mutability, no I/O, no shared state. Calculators are
//! `Send + Sync` and safe to call concurrently across independent recipes.

mod alchemical;
mod elemental;
mod methods;
mod thermodynamics;

pub use alchemical::AlchemicalDeriver;
pub use elemental::{ElementalAggregator, QuantityScaling};
pub use methods::CookingMethodTransformer;
pub use thermodynamics::ThermodynamicCalculator;
