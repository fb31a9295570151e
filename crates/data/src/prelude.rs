//! Prelude module for convenient imports.
//!
//! # Example
//!
//! ```rust
//! use btcyield_data::prelude::*;
//! ```

pub use crate::catalog::{ProtocolCatalog, ProtocolMap, ProtocolQuery, default_protocols};
pub use crate::error::CatalogError;
pub use crate::market::{MarketDataFeed, MarketSnapshot};
pub use crate::repositories::{InMemoryPortfolioRepository, PortfolioRecord, PortfolioRepository};
