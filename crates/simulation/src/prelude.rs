//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types from the crate.
//!
//! # Example
//!
//! ```rust
//! use btcyield_simulation::prelude::*;
//! ```

// Engine
pub use crate::engine::{SimulationEngine, daily_return, project_value};

// Errors
pub use crate::error::SimulationError;

// Monte Carlo
pub use crate::monte_carlo::{AggregateResult, MonteCarloRunner};

// State management
pub use crate::state::{
    DEFAULT_SIMULATION_DAYS, MAX_SIMULATION_DAYS, Positions, SimulationConfig,
    positions_from_allocation, validate_positions,
};
