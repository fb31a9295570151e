//! Allocation of an investment across yield protocols.
//!
//! This crate turns an amount and a risk tolerance into an
//! [`OptimizationResult`](btcyield_domain::value_objects::OptimizationResult):
//! - Risk profile resolution from a tolerance score
//! - Catalog filtering by the profile's risk ceiling
//! - Score, rank, weight and normalize allocation
//! - Summary metrics over the final allocation

/// Prelude module for convenient imports.
pub mod prelude;

/// Allocation engine.
pub mod allocation;
/// Error types.
pub mod error;
/// Catalog filtering.
pub mod filter;
/// Protocol scoring functions.
pub mod objective;
/// End-to-end optimizer.
pub mod optimizer;
/// Risk profile resolution.
pub mod profile;

pub use allocation::AllocationEngine;
pub use error::OptimizationError;
pub use optimizer::{OptimizationRequest, PortfolioOptimizer, Preferences};
