//! Deterministic stub implementations for tests.

mod position_stubs;

pub use position_stubs::{FailingPositionProvider, FixedPositionProvider};
