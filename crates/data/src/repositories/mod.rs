//! Repository implementations for optimization session persistence.
//!
//! Storage is behind the [`PortfolioRepository`] trait so the API can swap
//! the in-memory store for a durable one.

mod portfolio_repository;

pub use portfolio_repository::{InMemoryPortfolioRepository, PortfolioRecord, PortfolioRepository};
