//! Prelude module for convenient imports.
//!
//! # Example
//!
//! ```rust
//! use btcyield_api::prelude::*;
//! ```

pub use crate::error::ApiError;
pub use crate::models::{
    HealthResponse, OptimizeBody, OptimizeResponse, ProtocolsResponse, SimulateBody,
    SimulateResponse, SimulationMetadata,
};
pub use crate::routes::{MAX_BODY_BYTES, create_router};
pub use crate::server::{ApiServer, ServerConfig, spawn_market_ticker};
pub use crate::state::AppState;
