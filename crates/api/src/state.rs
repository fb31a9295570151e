//! Application state shared across handlers.

use crate::server::ServerConfig;
use btcyield_data::catalog::ProtocolCatalog;
use btcyield_data::market::MarketDataFeed;
use btcyield_data::repositories::{InMemoryPortfolioRepository, PortfolioRepository};
use btcyield_domain::random::StdRandomSource;
use btcyield_optimization::PortfolioOptimizer;
use std::sync::Arc;
use std::time::Instant;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Protocol catalog, read-only.
    pub catalog: Arc<ProtocolCatalog>,
    /// Latest optimization per session.
    pub portfolios: Arc<dyn PortfolioRepository>,
    /// Market price feed.
    pub market: Arc<MarketDataFeed>,
    /// Portfolio optimizer.
    pub optimizer: Arc<PortfolioOptimizer>,
    /// Server start time.
    pub started_at: Instant,
}

impl AppState {
    /// Creates a new application state with an in-memory session store.
    #[must_use]
    pub fn new(config: ServerConfig, catalog: ProtocolCatalog) -> Self {
        let catalog = Arc::new(catalog);
        Self {
            config: Arc::new(config),
            market: Arc::new(MarketDataFeed::new(Arc::clone(&catalog))),
            catalog,
            portfolios: Arc::new(InMemoryPortfolioRepository::new()),
            optimizer: Arc::new(PortfolioOptimizer::default()),
            started_at: Instant::now(),
        }
    }

    /// Replaces the session store.
    #[must_use]
    pub fn with_repository(mut self, portfolios: Arc<dyn PortfolioRepository>) -> Self {
        self.portfolios = portfolios;
        self
    }

    /// Random source for one request.
    ///
    /// With a configured seed every request replays the same stream.
    #[must_use]
    pub fn rng(&self) -> StdRandomSource {
        match self.config.random_seed {
            Some(seed) => StdRandomSource::seeded(seed),
            None => StdRandomSource::from_entropy(),
        }
    }

    /// Seconds since the state was created.
    #[must_use]
    pub fn uptime_secs(&self) -> f64 {
        self.started_at.elapsed().as_secs_f64()
    }
}
