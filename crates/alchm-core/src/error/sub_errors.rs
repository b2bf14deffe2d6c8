//! Sub-error types for alchm-core.
//!
//! Each error type covers a specific domain of failures.

use thiserror::Error;

// ============================================================================
// VALIDATION ERROR
// ============================================================================

/// Errors for data rejected at the boundary where external records enter.
///
/// The ingredient catalog and recipe catalog are external collaborators;
/// their payloads are coerced or rejected here rather than allowed to
/// poison downstream arithmetic.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// A numeric field is NaN or infinite.
    ///
    /// # When This Occurs
    ///
    /// - An ingredient elemental vector arrives with a non-finite component
    /// - A recipe quantity deserializes to NaN
    #[error("non-finite value in {field}")]
    NonFinite {
        /// Field that failed validation
        field: &'static str,
    },

    /// A quantity or vector component is negative.
    #[error("negative value in {field}: {value}")]
    Negative {
        /// Field that failed validation
        field: &'static str,
        /// Offending value
        value: f64,
    },

    /// A recipe references a cooking method absent from the method table.
    #[error("unknown cooking method: {0}")]
    UnknownCookingMethod(String),

    /// A weight slice does not line up with the records it weights.
    #[error("weight count mismatch: {weights} weights for {records} records")]
    WeightCountMismatch {
        /// Number of weights supplied
        weights: usize,
        /// Number of records being weighted
        records: usize,
    },
}

// ============================================================================
// POSITION FEED ERROR
// ============================================================================

/// Failure of a single planetary-position provider tier.
///
/// These are recoverable: the chain falls through to the next tier and the
/// caller only ever observes a staleness tier on the served snapshot.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PositionFeedError {
    /// The provider did not respond within the configured timeout.
    ///
    /// # Recovery
    ///
    /// Fall through immediately to the next fallback tier.
    #[error("position fetch from {provider} timed out after {timeout_ms} ms")]
    Timeout {
        /// Provider that timed out
        provider: String,
        /// Configured timeout in milliseconds
        timeout_ms: u64,
    },

    /// The provider returned an error response.
    #[error("position service {provider} failed: {reason}")]
    Service {
        /// Provider that failed
        provider: String,
        /// Detailed reason for failure
        reason: String,
    },

    /// The provider responded but the payload could not be interpreted.
    #[error("malformed position payload from {provider}: {reason}")]
    Decode {
        /// Provider that produced the payload
        provider: String,
        /// Detailed reason for failure
        reason: String,
    },
}

// ============================================================================
// CACHE ERROR
// ============================================================================

/// Cache-entry failures.
///
/// Corruption is never propagated to callers: the entry is dropped, the
/// event is logged at warn, and the value is recomputed.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CacheError {
    /// A stored entry failed to deserialize.
    #[error("cache entry corrupt for key {key}: {reason}")]
    Corrupt {
        /// Cache key of the corrupt entry
        key: String,
        /// Deserialization failure detail
        reason: String,
    },
}
