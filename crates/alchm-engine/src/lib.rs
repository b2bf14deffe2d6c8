//! alchm Engine Library
//!
//! Orchestration layer over [`alchm_core`]: turns recipe definitions into
//! computed-property records, aggregates those records into cuisine
//! signatures, compares chart snapshots for personalization, and caches
//! everything that is expensive to recompute.
//!
//! # Components
//!
//! - [`cache::ResultCache`] — two-tier cache (hot in-process / shared),
//!   keyed by computation identity, lazy expiry, LRU per tier
//! - [`positions::ChainedPositionSource`] — four-tier fallback chain over
//!   planetary-position providers
//! - [`pipeline::RecipeComputationPipeline`] — recipe → computed
//!   properties, content-hash cached, single-flighted
//! - [`cuisine::CuisineAggregator`] — weighted statistics, z-scores
//!   against the global baseline, signature extraction
//! - [`chart::ChartComparisonService`] — natal/moment harmony scoring and
//!   the personalization boost

pub mod cache;
pub mod chart;
pub mod cuisine;
pub mod pipeline;
pub mod positions;

pub use cache::ResultCache;
pub use chart::ChartComparisonService;
pub use cuisine::{CuisineAggregator, GlobalBaseline};
pub use pipeline::RecipeComputationPipeline;
pub use positions::ChainedPositionSource;
