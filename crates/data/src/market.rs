//! Simulated market prices.

use crate::catalog::{ProtocolCatalog, ProtocolMap};
use btcyield_domain::entities::protocol::Protocol;
use btcyield_domain::math::rounding::round_dp;
use btcyield_domain::random::RandomSource;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

pub const INITIAL_BTC_PRICE: f64 = 45_000.0;
pub const INITIAL_CORE_PRICE: f64 = 1.2;

const BTC_PRICE_FLOOR: f64 = 30_000.0;
const BTC_PRICE_CEILING: f64 = 60_000.0;
const CORE_PRICE_FLOOR: f64 = 0.5;
const CORE_PRICE_CEILING: f64 = 2.0;

/// Full band of the per-read jitter (plus or minus 1%).
const LIVE_VARIATION: f64 = 0.02;
const BTC_TICK_VARIATION: f64 = 0.01;
const CORE_TICK_VARIATION: f64 = 0.02;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Prices {
    btc: f64,
    core: f64,
    last_updated: DateTime<Utc>,
}

/// Point-in-time market view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketSnapshot {
    pub btc_price: f64,
    pub core_price: f64,
    pub last_updated: DateTime<Utc>,
    #[serde(serialize_with = "serialize_protocols")]
    pub protocols: Vec<Protocol>,
}

#[allow(clippy::ptr_arg)]
fn serialize_protocols<S: serde::Serializer>(
    protocols: &Vec<Protocol>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    ProtocolMap(protocols).serialize(serializer)
}

/// Drifting BTC and CORE prices alongside the protocol catalog.
#[derive(Debug)]
pub struct MarketDataFeed {
    prices: RwLock<Prices>,
    catalog: Arc<ProtocolCatalog>,
}

impl MarketDataFeed {
    pub fn new(catalog: Arc<ProtocolCatalog>) -> Self {
        Self::with_prices(catalog, INITIAL_BTC_PRICE, INITIAL_CORE_PRICE)
    }

    pub fn with_prices(catalog: Arc<ProtocolCatalog>, btc_price: f64, core_price: f64) -> Self {
        Self {
            prices: RwLock::new(Prices {
                btc: btc_price,
                core: core_price,
                last_updated: Utc::now(),
            }),
            catalog,
        }
    }

    /// Current prices without jitter.
    pub async fn snapshot(&self) -> MarketSnapshot {
        let prices = *self.prices.read().await;
        MarketSnapshot {
            btc_price: prices.btc,
            core_price: prices.core,
            last_updated: prices.last_updated,
            protocols: self.catalog.protocols().to_vec(),
        }
    }

    /// Current prices with a single shared jitter applied, stamped now.
    ///
    /// BTC is rounded to a whole number and CORE to 3 decimals. The feed
    /// itself is left untouched.
    pub async fn live_view<R: RandomSource + ?Sized>(&self, rng: &mut R) -> MarketSnapshot {
        let variation = (rng.next_uniform() - 0.5) * LIVE_VARIATION;
        let prices = *self.prices.read().await;

        MarketSnapshot {
            btc_price: round_dp(prices.btc * (1.0 + variation), 0),
            core_price: round_dp(prices.core * (1.0 + variation), 3),
            last_updated: Utc::now(),
            protocols: self.catalog.protocols().to_vec(),
        }
    }

    /// Advances prices by one random step, keeping each inside its band.
    pub async fn tick<R: RandomSource + ?Sized>(&self, rng: &mut R) {
        let btc_variation = (rng.next_uniform() - 0.5) * BTC_TICK_VARIATION;
        let core_variation = (rng.next_uniform() - 0.5) * CORE_TICK_VARIATION;

        let mut prices = self.prices.write().await;
        prices.btc = (prices.btc * (1.0 + btc_variation)).clamp(BTC_PRICE_FLOOR, BTC_PRICE_CEILING);
        prices.core =
            (prices.core * (1.0 + core_variation)).clamp(CORE_PRICE_FLOOR, CORE_PRICE_CEILING);
        prices.last_updated = Utc::now();

        debug!(btc = prices.btc, core = prices.core, "Market prices updated");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use btcyield_domain::random::{FixedSequence, StdRandomSource};

    fn feed() -> MarketDataFeed {
        MarketDataFeed::new(Arc::new(ProtocolCatalog::default()))
    }

    #[tokio::test]
    async fn test_initial_snapshot() {
        let snapshot = feed().snapshot().await;
        assert_eq!(snapshot.btc_price, 45_000.0);
        assert_eq!(snapshot.core_price, 1.2);
        assert_eq!(snapshot.protocols.len(), 5);
    }

    #[tokio::test]
    async fn test_live_view_rounds_and_does_not_mutate() {
        let feed = feed();
        // variation = 0.25 * 0.02 = +0.5%
        let view = feed.live_view(&mut FixedSequence::constant(0.75)).await;
        assert_eq!(view.btc_price, 45_225.0);
        assert_eq!(view.core_price, 1.206);

        let snapshot = feed.snapshot().await;
        assert_eq!(snapshot.btc_price, 45_000.0);
        assert_eq!(snapshot.core_price, 1.2);
    }

    #[tokio::test]
    async fn test_tick_moves_prices() {
        let feed = feed();
        feed.tick(&mut FixedSequence::new(vec![1.0, 0.0])).await;
        let snapshot = feed.snapshot().await;
        assert!(snapshot.btc_price > 45_000.0);
        assert!(snapshot.core_price < 1.2);
    }

    #[tokio::test]
    async fn test_tick_clamps_to_bands() {
        let feed = MarketDataFeed::with_prices(Arc::new(ProtocolCatalog::default()), 59_990.0, 0.501);
        feed.tick(&mut FixedSequence::new(vec![0.999, 0.0])).await;
        let snapshot = feed.snapshot().await;
        assert_eq!(snapshot.btc_price, 60_000.0);
        assert_eq!(snapshot.core_price, 0.5);

        let mut rng = StdRandomSource::seeded(21);
        for _ in 0..500 {
            feed.tick(&mut rng).await;
        }
        let snapshot = feed.snapshot().await;
        assert!((30_000.0..=60_000.0).contains(&snapshot.btc_price));
        assert!((0.5..=2.0).contains(&snapshot.core_price));
    }

    #[tokio::test]
    async fn test_snapshot_serializes_protocol_map() {
        let json = serde_json::to_value(feed().snapshot().await).unwrap();
        assert_eq!(json["btc_price"], 45_000.0);
        assert_eq!(json["protocols"]["CoreDAO Staking"]["apy"], 12.8);
        assert!(json["last_updated"].is_string());
    }
}
