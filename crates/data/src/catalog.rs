//! The protocol catalog.
//!
//! Reference data read by the optimizer and the HTTP surface. A catalog is
//! validated once on construction and never mutated afterwards; queries hand
//! out fresh vectors.

use crate::error::CatalogError;
use anyhow::Context;
use btcyield_domain::entities::protocol::Protocol;
use btcyield_domain::enums::LiquidityTier;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

/// Read-only, name-unique list of protocols in catalog order.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolCatalog {
    protocols: Vec<Protocol>,
}

impl Default for ProtocolCatalog {
    fn default() -> Self {
        Self {
            protocols: default_protocols(),
        }
    }
}

/// The built-in catalog.
#[must_use]
pub fn default_protocols() -> Vec<Protocol> {
    vec![
        Protocol::new("CoreDAO Staking", 12.8, 3, 125_000_000.0, LiquidityTier::High),
        Protocol::new("Bitcoin Bridge", 8.5, 2, 89_000_000.0, LiquidityTier::High),
        Protocol::new("CORE-BTC LP", 15.2, 7, 45_000_000.0, LiquidityTier::Medium),
        Protocol::new("Lightning Yield", 6.8, 1, 210_000_000.0, LiquidityTier::VeryHigh),
        Protocol::new("Cross-Chain Pool", 18.5, 9, 23_000_000.0, LiquidityTier::Low),
    ]
}

impl ProtocolCatalog {
    /// Builds a catalog, validating every protocol.
    ///
    /// # Errors
    /// Returns [`CatalogError`] on a duplicate name, a non-positive or
    /// non-finite APY, a risk score outside `[1, 10]` or a negative TVL.
    pub fn new(protocols: Vec<Protocol>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for protocol in &protocols {
            if !seen.insert(protocol.name.as_str()) {
                return Err(CatalogError::DuplicateProtocol(protocol.name.clone()));
            }
            validate_protocol(protocol)?;
        }
        Ok(Self { protocols })
    }

    /// Parses a JSON array of protocol objects.
    ///
    /// # Errors
    /// Returns [`CatalogError::Parse`] for malformed JSON, or any validation
    /// error from [`ProtocolCatalog::new`].
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let protocols: Vec<Protocol> = serde_json::from_str(json)?;
        Self::new(protocols)
    }

    /// Loads a catalog from a JSON file.
    ///
    /// # Errors
    /// Fails if the file can't be read or doesn't hold a valid catalog.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog {}", path.display()))?;
        let catalog = Self::from_json_str(&json)
            .with_context(|| format!("Invalid catalog {}", path.display()))?;
        info!(path = %path.display(), protocols = catalog.len(), "Loaded protocol catalog");
        Ok(catalog)
    }

    #[must_use]
    pub fn protocols(&self) -> &[Protocol] {
        &self.protocols
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Protocol> {
        self.protocols.iter().find(|p| p.name == name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.protocols.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.protocols.is_empty()
    }

    /// Returns the protocols matching every filter set on `query`, in
    /// catalog order.
    #[must_use]
    pub fn query(&self, query: &ProtocolQuery) -> Vec<Protocol> {
        self.protocols
            .iter()
            .filter(|p| query.matches(p))
            .cloned()
            .collect()
    }
}

fn validate_protocol(protocol: &Protocol) -> Result<(), CatalogError> {
    let reason = if !protocol.apy.is_finite() || protocol.apy <= 0.0 {
        Some(format!("apy must be positive, got {}", protocol.apy))
    } else if !(1..=10).contains(&protocol.risk_score) {
        Some(format!("risk_score must be between 1 and 10, got {}", protocol.risk_score))
    } else if !protocol.tvl.is_finite() || protocol.tvl < 0.0 {
        Some(format!("tvl must be non-negative, got {}", protocol.tvl))
    } else {
        None
    };

    match reason {
        Some(reason) => Err(CatalogError::InvalidProtocol {
            name: protocol.name.clone(),
            reason,
        }),
        None => Ok(()),
    }
}

/// Optional catalog filters. Unset filters match everything.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProtocolQuery {
    /// Highest admitted risk score.
    pub risk_max: Option<u8>,
    /// Lowest admitted APY.
    pub apy_min: Option<f64>,
    /// Liquidity tier wire name, matched exactly and case-sensitively.
    pub liquidity: Option<String>,
}

impl ProtocolQuery {
    #[must_use]
    pub fn with_risk_max(mut self, risk_max: u8) -> Self {
        self.risk_max = Some(risk_max);
        self
    }

    #[must_use]
    pub fn with_apy_min(mut self, apy_min: f64) -> Self {
        self.apy_min = Some(apy_min);
        self
    }

    #[must_use]
    pub fn with_liquidity(mut self, liquidity: impl Into<String>) -> Self {
        self.liquidity = Some(liquidity.into());
        self
    }

    #[must_use]
    pub fn matches(&self, protocol: &Protocol) -> bool {
        self.risk_max.is_none_or(|max| protocol.risk_score <= max)
            && self.apy_min.is_none_or(|min| protocol.apy >= min)
            && self
                .liquidity
                .as_deref()
                .is_none_or(|tier| protocol.liquidity.as_str() == tier)
    }
}

/// Serializes protocols as a JSON object keyed by name.
pub struct ProtocolMap<'a>(pub &'a [Protocol]);

#[derive(Serialize)]
struct ProtocolFields<'a> {
    apy: f64,
    risk_score: u8,
    tvl: f64,
    liquidity: &'a LiquidityTier,
}

impl Serialize for ProtocolMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for protocol in self.0 {
            map.serialize_entry(
                &protocol.name,
                &ProtocolFields {
                    apy: protocol.apy,
                    risk_score: protocol.risk_score,
                    tvl: protocol.tvl,
                    liquidity: &protocol.liquidity,
                },
            )?;
        }
        map.end()
    }
}
