//! Server configuration and startup.

use crate::routes::create_router;
use crate::state::AppState;
use anyhow::Context;
use btcyield_data::catalog::ProtocolCatalog;
use btcyield_data::market::MarketDataFeed;
use btcyield_domain::random::StdRandomSource;
use btcyield_simulation::state::MAX_SIMULATION_DAYS;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// API server configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Artificial processing delay applied to each optimization.
    pub optimize_delay: Duration,
    /// Period of the market price ticker.
    pub market_tick: Duration,
    /// Longest accepted simulation horizon in days.
    pub max_simulation_days: u32,
    /// Seed for every request's random source. Unset means entropy.
    pub random_seed: Option<u64>,
    /// JSON catalog replacing the built-in one.
    pub catalog_path: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            optimize_delay: Duration::from_millis(1000),
            market_tick: Duration::from_secs(30),
            max_simulation_days: MAX_SIMULATION_DAYS,
            random_seed: None,
            catalog_path: None,
        }
    }
}

impl ServerConfig {
    /// Creates a new server config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads overrides from the process environment.
    ///
    /// # Errors
    /// Returns an error if a set variable can't be parsed.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads overrides through `lookup`, starting from the defaults.
    ///
    /// # Errors
    /// Returns an error if a present value can't be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let mut config = Self::default();

        if let Some(host) = lookup("HOST") {
            config.host = host;
        }
        if let Some(port) = parse_var(&lookup, "PORT")? {
            config.port = port;
        }
        if let Some(ms) = parse_var::<u64>(&lookup, "OPTIMIZE_DELAY_MS")? {
            config.optimize_delay = Duration::from_millis(ms);
        }
        if let Some(secs) = parse_var::<u64>(&lookup, "MARKET_TICK_SECS")? {
            config.market_tick = Duration::from_secs(secs);
        }
        if let Some(days) = parse_var(&lookup, "MAX_SIMULATION_DAYS")? {
            config.max_simulation_days = days;
        }
        config.random_seed = parse_var(&lookup, "RANDOM_SEED")?;
        config.catalog_path = lookup("CATALOG_PATH").map(PathBuf::from);

        Ok(config)
    }

    /// Sets the host.
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Sets the port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    #[must_use]
    pub fn with_optimize_delay(mut self, delay: Duration) -> Self {
        self.optimize_delay = delay;
        self
    }

    #[must_use]
    pub fn with_market_tick(mut self, period: Duration) -> Self {
        self.market_tick = period;
        self
    }

    #[must_use]
    pub fn with_max_simulation_days(mut self, days: u32) -> Self {
        self.max_simulation_days = days;
        self
    }

    #[must_use]
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    #[must_use]
    pub fn with_catalog_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.catalog_path = Some(path.into());
        self
    }

    /// Returns the socket address string.
    #[must_use]
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Loads the configured catalog, or the built-in one.
    ///
    /// # Errors
    /// Returns an error if the configured file can't be loaded.
    pub fn load_catalog(&self) -> anyhow::Result<ProtocolCatalog> {
        match &self.catalog_path {
            Some(path) => ProtocolCatalog::load(path),
            None => Ok(ProtocolCatalog::default()),
        }
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> anyhow::Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .with_context(|| format!("Invalid value for {key}: {raw:?}"))
        })
        .transpose()
}

/// REST API server.
pub struct ApiServer {
    config: ServerConfig,
    state: AppState,
}

impl ApiServer {
    /// Creates a new API server, loading the catalog the config points at.
    ///
    /// # Errors
    /// Returns an error if the catalog can't be loaded.
    pub fn new(config: ServerConfig) -> anyhow::Result<Self> {
        let catalog = config.load_catalog()?;
        let state = AppState::new(config.clone(), catalog);
        Ok(Self { config, state })
    }

    #[must_use]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Starts the server and the market ticker, serving until Ctrl-C.
    ///
    /// # Errors
    /// Returns an error if the server fails to bind or serve.
    pub async fn run(self) -> anyhow::Result<()> {
        let ticker = spawn_market_ticker(
            Arc::clone(&self.state.market),
            self.config.market_tick,
            self.config.random_seed,
        );

        let app = create_router(self.state);
        let addr = self.config.addr();
        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind {addr}"))?;

        info!("API server listening on {}", addr);
        info!("API endpoints available at http://{}/api/", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("Server error")?;

        ticker.abort();
        info!("API server stopped");
        Ok(())
    }
}

/// Spawns the periodic market price update.
///
/// The first update happens one full `period` after spawning.
pub fn spawn_market_ticker(
    feed: Arc<MarketDataFeed>,
    period: Duration,
    seed: Option<u64>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        if period.is_zero() {
            warn!("Market ticker disabled: zero period");
            return;
        }

        let mut rng = match seed {
            Some(seed) => StdRandomSource::seeded(seed),
            None => StdRandomSource::from_entropy(),
        };
        let mut interval = tokio::time::interval(period);
        interval.tick().await;

        loop {
            interval.tick().await;
            feed.tick(&mut rng).await;
        }
    })
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.addr(), "0.0.0.0:3000");
        assert_eq!(config.optimize_delay, Duration::from_millis(1000));
        assert_eq!(config.market_tick, Duration::from_secs(30));
        assert_eq!(config.max_simulation_days, 3650);
        assert!(config.random_seed.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("OPTIMIZE_DELAY_MS", "0"),
            ("MARKET_TICK_SECS", "5"),
            ("MAX_SIMULATION_DAYS", "365"),
            ("RANDOM_SEED", "42"),
            ("CATALOG_PATH", "/tmp/catalog.json"),
        ]))
        .unwrap();

        assert_eq!(config.addr(), "127.0.0.1:8080");
        assert_eq!(config.optimize_delay, Duration::ZERO);
        assert_eq!(config.market_tick, Duration::from_secs(5));
        assert_eq!(config.max_simulation_days, 365);
        assert_eq!(config.random_seed, Some(42));
        assert_eq!(config.catalog_path, Some(PathBuf::from("/tmp/catalog.json")));
    }

    #[test]
    fn test_invalid_value_names_variable() {
        let err = ServerConfig::from_lookup(lookup(&[("PORT", "eighty")])).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn test_builders() {
        let config = ServerConfig::new()
            .with_host("localhost")
            .with_port(9000)
            .with_random_seed(7)
            .with_max_simulation_days(90);
        assert_eq!(config.addr(), "localhost:9000");
        assert_eq!(config.random_seed, Some(7));
        assert_eq!(config.max_simulation_days, 90);
    }

    #[test]
    fn test_missing_catalog_file() {
        let config = ServerConfig::new().with_catalog_path("/nonexistent/catalog.json");
        assert!(config.load_catalog().is_err());
        assert!(ApiServer::new(config).is_err());
    }

    #[tokio::test]
    async fn test_market_ticker_updates_prices() {
        let feed = Arc::new(MarketDataFeed::new(Arc::new(ProtocolCatalog::default())));
        let before = feed.snapshot().await;

        let handle = spawn_market_ticker(Arc::clone(&feed), Duration::from_millis(10), Some(1));
        tokio::time::sleep(Duration::from_millis(100)).await;
        handle.abort();

        let after = feed.snapshot().await;
        assert!(after.last_updated > before.last_updated);
        assert_ne!(after.btc_price, before.btc_price);
    }

    #[tokio::test]
    async fn test_zero_period_disables_ticker() {
        let feed = Arc::new(MarketDataFeed::new(Arc::new(ProtocolCatalog::default())));
        let handle = spawn_market_ticker(Arc::clone(&feed), Duration::ZERO, None);
        handle.await.unwrap();
        assert_eq!(feed.snapshot().await.btc_price, 45_000.0);
    }
}
