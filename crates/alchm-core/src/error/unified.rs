//! Top-level unified error type for the alchm engine.

use thiserror::Error;

use super::sub_errors::{CacheError, PositionFeedError, ValidationError};

/// Top-level unified error type for the alchm engine.
///
/// All crate errors convert to this type via `From` implementations.
///
/// # Recoverability
///
/// Errors are classified as recoverable or non-recoverable:
/// - Recoverable: handled inside the engine by a defined default or a
///   fallback tier (validation rejects one record, a feed tier falls
///   through, a corrupt cache entry recomputes)
/// - Non-recoverable: `FatalDataUnavailable` — every position tier is
///   exhausted and no defined default remains
///
/// Only non-recoverable errors should ever reach the recommendation layer.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Boundary validation failure for external data.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A planetary-position provider tier failed.
    ///
    /// Recovered by the fallback chain; callers see a staleness tier,
    /// not this error, unless every tier is exhausted.
    #[error("position feed error: {0}")]
    PositionFeed(#[from] PositionFeedError),

    /// A cache entry failed to deserialize.
    ///
    /// Always treated as a miss; never user-visible.
    #[error("cache error: {0}")]
    Cache(#[from] CacheError),

    /// Every planetary-position fallback tier is exhausted.
    ///
    /// This is the only error surfaced to the eventual consumer; all other
    /// conditions degrade to a defined, documented default.
    #[error("planetary position data unavailable: {0}")]
    FatalDataUnavailable(String),
}

impl EngineError {
    /// Whether the engine can continue by falling back to a defined default.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, EngineError::FatalDataUnavailable(_))
    }
}

/// Result alias used throughout the engine.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fatal_data_unavailable_is_not_recoverable() {
        let err = EngineError::FatalDataUnavailable("all tiers exhausted".into());
        assert!(!err.is_recoverable());
    }

    #[test]
    fn feed_and_cache_errors_are_recoverable() {
        let feed: EngineError = PositionFeedError::Service {
            provider: "primary".into(),
            reason: "503".into(),
        }
        .into();
        let cache: EngineError = CacheError::Corrupt {
            key: "recipe:abc".into(),
            reason: "truncated".into(),
        }
        .into();
        assert!(feed.is_recoverable());
        assert!(cache.is_recoverable());
    }

    #[test]
    fn validation_error_converts_and_displays() {
        let err: EngineError = ValidationError::UnknownCookingMethod("flambe".into()).into();
        assert!(err.to_string().contains("flambe"));
        assert!(err.is_recoverable());
    }
}
