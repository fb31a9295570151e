//! Forward projection of a yield portfolio.
//!
//! This crate simulates how an allocation's value evolves:
//! - Day-by-day stochastic projection with compounding returns
//! - Monte Carlo aggregation over repeated projections
//! - Input validation for positions and horizons

/// Prelude module for convenient imports.
pub mod prelude;

/// Projection engine.
pub mod engine;
/// Error types.
pub mod error;
/// Monte Carlo aggregation.
pub mod monte_carlo;
/// Simulation inputs and configuration.
pub mod state;

pub use engine::SimulationEngine;
pub use error::SimulationError;
pub use monte_carlo::{AggregateResult, MonteCarloRunner};
pub use state::{Positions, SimulationConfig};
