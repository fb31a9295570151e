//! Prelude module for convenient imports.
//!
//! # Example
//!
//! ```rust
//! use btcyield_domain::prelude::*;
//! ```

pub use crate::entities::Protocol;
pub use crate::enums::{LiquidityTier, RiskLevel};
pub use crate::error::ValidationError;
pub use crate::math::{round_currency, round_dp};
pub use crate::metrics::PortfolioMetrics;
pub use crate::random::{FixedSequence, RandomSource, StdRandomSource};
pub use crate::value_objects::{
    Allocation, AllocationEntry, OptimizationResult, ProjectedYield, ProtocolReturn, RiskProfile,
    SimulationDay, SimulationPosition,
};
