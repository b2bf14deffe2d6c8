//! Error types for the alchm engine.
//!
//! The taxonomy distinguishes four failure domains:
//!
//! - [`ValidationError`] — malformed data rejected where it enters the
//!   engine (negative quantities, NaN components, unknown cooking methods).
//! - [`PositionFeedError`] — a single planetary-position tier failed;
//!   recoverable via the fallback chain and surfaced to callers only as a
//!   staleness tier on the snapshot.
//! - [`CacheError`] — a cache entry failed to deserialize; always treated
//!   as a miss and recomputed, never user-visible.
//! - [`EngineError::FatalDataUnavailable`] — every position tier exhausted;
//!   the only condition that surfaces as an error to the consumer.
//!
//! Genuinely-absent values (Monica with no stable equilibrium, alchemical
//! counts for an untimed recipe) are not errors at all: they are `None` on
//! the computed record and must be checked explicitly by consumers.

mod sub_errors;
mod unified;

pub use sub_errors::{CacheError, PositionFeedError, ValidationError};
pub use unified::{EngineError, EngineResult};
