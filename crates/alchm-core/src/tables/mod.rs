//! Injected lookup tables.
//!
//! Every table here is an explicit value constructed with configuration and
//! passed by reference to the calculators that need it — there is no shared
//! module state. `Default` gives the standard production table in each
//! case.

mod alchemy_table;
mod method_table;
mod weight_table;
mod zodiac_table;

pub use alchemy_table::{AlchemicalContribution, PlanetaryAlchemyTable};
pub use method_table::{CookingMethodTable, ElementalModifiers};
pub use weight_table::PlanetWeightTable;
pub use zodiac_table::ZodiacElementTable;
