//! Stub position providers.
//!
//! Deterministic providers for exercising the fallback chain and chart
//! construction without a network.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::PositionFeedError;
use crate::traits::PositionProvider;
use crate::types::PlanetaryPositions;

/// Always serves the same snapshot, counting fetches.
#[derive(Debug)]
pub struct FixedPositionProvider {
    name: String,
    positions: PlanetaryPositions,
    fetches: AtomicU64,
}

impl FixedPositionProvider {
    pub fn new(name: impl Into<String>, positions: PlanetaryPositions) -> Self {
        Self {
            name: name.into(),
            positions,
            fetches: AtomicU64::new(0),
        }
    }

    /// Number of fetches served so far.
    pub fn fetch_count(&self) -> u64 {
        self.fetches.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl PositionProvider for FixedPositionProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(
        &self,
        _moment: DateTime<Utc>,
    ) -> Result<PlanetaryPositions, PositionFeedError> {
        self.fetches.fetch_add(1, Ordering::Relaxed);
        Ok(self.positions.clone())
    }
}

/// Always fails with a service error.
#[derive(Debug)]
pub struct FailingPositionProvider {
    name: String,
    reason: String,
}

impl FailingPositionProvider {
    pub fn new(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl PositionProvider for FailingPositionProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(
        &self,
        _moment: DateTime<Utc>,
    ) -> Result<PlanetaryPositions, PositionFeedError> {
        Err(PositionFeedError::Service {
            provider: self.name.clone(),
            reason: self.reason.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Planet, PlanetPlacement, ZodiacSign};

    #[tokio::test]
    async fn fixed_provider_serves_and_counts() {
        let positions = PlanetaryPositions::new()
            .with(Planet::Sun, PlanetPlacement::direct(ZodiacSign::Aries));
        let provider = FixedPositionProvider::new("fixed", positions.clone());

        let served = provider.fetch(Utc::now()).await.unwrap();
        assert_eq!(served, positions);
        assert_eq!(provider.fetch_count(), 1);
    }

    #[tokio::test]
    async fn failing_provider_reports_its_reason() {
        let provider = FailingPositionProvider::new("primary", "503");
        let err = provider.fetch(Utc::now()).await.unwrap_err();
        assert!(matches!(
            err,
            PositionFeedError::Service { provider, reason }
                if provider == "primary" && reason == "503"
        ));
    }
}
