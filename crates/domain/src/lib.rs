//! Core domain types for the yield allocation engine.
//!
//! This crate holds the data model shared by every other crate:
//! - Protocol catalog entities and liquidity tiers
//! - Risk profiles, allocations and optimization results
//! - Simulation inputs and per-day outputs
//! - Pure portfolio metrics (yield, risk, diversification, confidence)
//! - The injectable random source used by the engines

/// Prelude module for convenient imports.
pub mod prelude;

/// Catalog entities.
pub mod entities;
/// Enumerations shared across crates.
pub mod enums;
/// Validation errors.
pub mod error;
/// Numeric helpers.
pub mod math;
/// Derived portfolio metrics.
pub mod metrics;
/// Random source abstraction.
pub mod random;
/// Value objects produced by the engines.
pub mod value_objects;

pub use error::ValidationError;
pub use random::{FixedSequence, RandomSource, StdRandomSource};
