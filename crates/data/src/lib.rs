//! Reference and session data for the yield allocation engine.
//!
//! This crate provides:
//! - The protocol catalog, built in or loaded from JSON, with query filters
//! - A simulated market price feed
//! - Session storage for optimization results

/// Prelude module for convenient imports.
pub mod prelude;

/// Protocol catalog.
pub mod catalog;
/// Error types.
pub mod error;
/// Market price feed.
pub mod market;
/// Session repositories.
pub mod repositories;

pub use catalog::{ProtocolCatalog, ProtocolMap, ProtocolQuery};
pub use error::CatalogError;
pub use market::{MarketDataFeed, MarketSnapshot};
pub use repositories::{InMemoryPortfolioRepository, PortfolioRecord, PortfolioRepository};
