use crate::entities::protocol::Protocol;
use crate::enums::LiquidityTier;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde::Deserialize;

/// One protocol's share of an allocation.
///
/// Carries a snapshot of the protocol fields taken at allocation time so the
/// allocation stays meaningful even if the catalog is later replaced.
#[derive(Debug, Clone, PartialEq, serde::Serialize, Deserialize)]
pub struct AllocationEntry {
    /// Protocol name. Serialized as the map key of the owning [`Allocation`].
    #[serde(skip)]
    pub protocol: String,
    /// Share of the invested amount, 0 to 100.
    pub percentage: f64,
    /// Currency amount assigned to the protocol.
    pub amount: f64,
    pub apy: f64,
    pub risk: u8,
    pub tvl: f64,
    pub liquidity: LiquidityTier,
}

impl AllocationEntry {
    /// Snapshots `protocol` with the given share.
    #[must_use]
    pub fn from_protocol(protocol: &Protocol, percentage: f64, amount: f64) -> Self {
        Self {
            protocol: protocol.name.clone(),
            percentage,
            amount,
            apy: protocol.apy,
            risk: protocol.risk_score,
            tvl: protocol.tvl,
            liquidity: protocol.liquidity,
        }
    }

    /// Fraction of the portfolio held by this entry, 0 to 1.
    #[must_use]
    pub fn weight(&self) -> f64 {
        self.percentage / 100.0
    }
}

/// Ordered mapping from protocol name to its [`AllocationEntry`].
///
/// Insertion order is the ranking order the engine assigned; names are unique.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Allocation {
    entries: Vec<AllocationEntry>,
}

impl Allocation {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an entry, replacing any existing entry for the same protocol.
    ///
    /// Returns the replaced entry, if any.
    pub fn insert(&mut self, entry: AllocationEntry) -> Option<AllocationEntry> {
        if let Some(existing) = self
            .entries
            .iter_mut()
            .find(|e| e.protocol == entry.protocol)
        {
            return Some(std::mem::replace(existing, entry));
        }
        self.entries.push(entry);
        None
    }

    #[must_use]
    pub fn get(&self, protocol: &str) -> Option<&AllocationEntry> {
        self.entries.iter().find(|e| e.protocol == protocol)
    }

    #[must_use]
    pub fn contains(&self, protocol: &str) -> bool {
        self.get(protocol).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AllocationEntry> {
        self.entries.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut AllocationEntry> {
        self.entries.iter_mut()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Protocol names in ranking order.
    pub fn protocols(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.protocol.as_str())
    }

    #[must_use]
    pub fn total_amount(&self) -> f64 {
        self.entries.iter().map(|e| e.amount).sum()
    }

    #[must_use]
    pub fn total_percentage(&self) -> f64 {
        self.entries.iter().map(|e| e.percentage).sum()
    }
}

impl<'a> IntoIterator for &'a Allocation {
    type Item = &'a AllocationEntry;
    type IntoIter = std::slice::Iter<'a, AllocationEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl FromIterator<AllocationEntry> for Allocation {
    fn from_iter<I: IntoIterator<Item = AllocationEntry>>(iter: I) -> Self {
        let mut allocation = Self::new();
        for entry in iter {
            allocation.insert(entry);
        }
        allocation
    }
}

impl Serialize for Allocation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.protocol, entry)?;
        }
        map.end()
    }
}
