//! Planetary-position provider seam.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::PositionFeedError;
use crate::types::PlanetaryPositions;

/// A single planetary-position source.
///
/// Implementations wrap astronomical services; the engine's fallback chain
/// owns timeout enforcement and tier selection, so an implementation only
/// has to fetch and decode. Errors here are always recoverable from the
/// chain's point of view: it falls through to the next tier.
///
/// The stub implementations in [`crate::stubs`] make deterministic tests
/// possible without a network.
#[async_trait]
pub trait PositionProvider: Send + Sync {
    /// Short identifier used in logs and error provenance.
    fn name(&self) -> &str;

    /// Positions for the given moment.
    async fn fetch(&self, moment: DateTime<Utc>)
        -> Result<PlanetaryPositions, PositionFeedError>;
}
