//! Prelude module for convenient imports.
//!
//! # Example
//!
//! ```rust
//! use btcyield_optimization::prelude::*;
//! ```

pub use crate::allocation::{AllocationEngine, normalize, positional_weight};
pub use crate::error::OptimizationError;
pub use crate::filter::filter_by_risk;
pub use crate::objective::{RiskAdjustedReturn, ScoringFunction};
pub use crate::optimizer::{OptimizationRequest, PortfolioOptimizer, Preferences};
pub use crate::profile::resolve_risk_profile;
