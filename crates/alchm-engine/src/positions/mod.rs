//! Planetary-position fallback chain.
//!
//! The only genuine suspension point in the engine: position fetches are
//! network-bound, so they run under a timeout and degrade through four
//! tiers:
//!
//! 1. primary astronomical service
//! 2. secondary public service
//! 3. last-known cached positions from an earlier successful fetch
//! 4. a hardcoded safe default chart
//!
//! Failure or cancellation of a tier falls through immediately to the
//! next. Every served snapshot carries its tier, so callers can always
//! distinguish fresh from stale data; only exhaustion of all four tiers is
//! a hard failure.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use parking_lot::RwLock;
use tracing::{debug, warn};

use alchm_core::error::{EngineError, EngineResult, PositionFeedError};
use alchm_core::traits::PositionProvider;
use alchm_core::types::{
    Planet, PlanetPlacement, PlanetaryPositions, PositionSourceTier, PositionsSnapshot,
    ZodiacSign,
};

/// The safe default chart: the reference positions of 2025-03-28.
///
/// Served only when every live and cached tier has failed, and always
/// flagged as [`PositionSourceTier::DefaultChart`].
pub fn default_chart() -> PlanetaryPositions {
    use Planet::*;
    use ZodiacSign::*;
    PlanetaryPositions::new()
        .with(Sun, PlanetPlacement::direct(Aries))
        .with(Moon, PlanetPlacement::direct(Aries))
        .with(Mercury, PlanetPlacement::retrograde(Aries))
        .with(Venus, PlanetPlacement::retrograde(Pisces))
        .with(Mars, PlanetPlacement::direct(Cancer))
        .with(Jupiter, PlanetPlacement::direct(Gemini))
        .with(Saturn, PlanetPlacement::direct(Pisces))
        .with(Uranus, PlanetPlacement::direct(Taurus))
        .with(Neptune, PlanetPlacement::direct(Pisces))
        .with(Pluto, PlanetPlacement::direct(Aquarius))
}

/// Reference moment of the default chart.
pub fn default_chart_moment() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 28, 0, 0, 0).unwrap()
}

/// Tiered position source over injected providers.
pub struct ChainedPositionSource {
    primary: Arc<dyn PositionProvider>,
    secondary: Option<Arc<dyn PositionProvider>>,
    last_known: RwLock<Option<PositionsSnapshot>>,
    /// Absent only in deployments that prefer hard failure over the
    /// hardcoded chart.
    default_chart: Option<PlanetaryPositions>,
    fetch_timeout: Duration,
}

impl ChainedPositionSource {
    pub fn new(primary: Arc<dyn PositionProvider>, fetch_timeout: Duration) -> Self {
        Self {
            primary,
            secondary: None,
            last_known: RwLock::new(None),
            default_chart: Some(default_chart()),
            fetch_timeout,
        }
    }

    pub fn with_secondary(mut self, secondary: Arc<dyn PositionProvider>) -> Self {
        self.secondary = Some(secondary);
        self
    }

    /// Replace or remove the final-tier default chart.
    pub fn with_default_chart(mut self, chart: Option<PlanetaryPositions>) -> Self {
        self.default_chart = chart;
        self
    }

    /// Seed the last-known tier, e.g. from a persisted snapshot at startup.
    pub fn seed_last_known(&self, snapshot: PositionsSnapshot) {
        *self.last_known.write() = Some(snapshot);
    }

    /// Fetch positions for a moment, degrading through the tiers.
    ///
    /// # Errors
    ///
    /// [`EngineError::FatalDataUnavailable`] only when every tier,
    /// including the default chart, is unavailable.
    pub async fn fetch(&self, moment: DateTime<Utc>) -> EngineResult<PositionsSnapshot> {
        match self.try_provider(&*self.primary, moment).await {
            Ok(snapshot) => return Ok(self.record_success(snapshot, PositionSourceTier::Primary)),
            Err(err) => {
                warn!(error = %err, "primary position tier failed, falling through");
            }
        }

        if let Some(secondary) = &self.secondary {
            match self.try_provider(&**secondary, moment).await {
                Ok(snapshot) => {
                    return Ok(self.record_success(snapshot, PositionSourceTier::Secondary))
                }
                Err(err) => {
                    warn!(error = %err, "secondary position tier failed, falling through");
                }
            }
        }

        if let Some(last_known) = self.last_known.read().clone() {
            debug!(fetched_at = %last_known.fetched_at, "serving last-known positions");
            return Ok(PositionsSnapshot {
                tier: PositionSourceTier::LastKnown,
                ..last_known
            });
        }

        if let Some(chart) = &self.default_chart {
            warn!("all live position tiers exhausted, serving default chart");
            return Ok(PositionsSnapshot {
                positions: chart.clone(),
                tier: PositionSourceTier::DefaultChart,
                fetched_at: default_chart_moment(),
            });
        }

        Err(EngineError::FatalDataUnavailable(
            "all position fallback tiers exhausted".into(),
        ))
    }

    async fn try_provider(
        &self,
        provider: &dyn PositionProvider,
        moment: DateTime<Utc>,
    ) -> Result<PlanetaryPositions, PositionFeedError> {
        match tokio::time::timeout(self.fetch_timeout, provider.fetch(moment)).await {
            Ok(result) => result,
            Err(_) => Err(PositionFeedError::Timeout {
                provider: provider.name().to_string(),
                timeout_ms: self.fetch_timeout.as_millis() as u64,
            }),
        }
    }

    fn record_success(
        &self,
        positions: PlanetaryPositions,
        tier: PositionSourceTier,
    ) -> PositionsSnapshot {
        let snapshot = PositionsSnapshot {
            positions,
            tier,
            fetched_at: Utc::now(),
        };
        // Successful live fetches refresh the last-known tier.
        *self.last_known.write() = Some(snapshot.clone());
        snapshot
    }
}
