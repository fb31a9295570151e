use crate::value_objects::allocation::AllocationEntry;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One position fed into a simulation.
///
/// Deserializes from allocation entries as well, ignoring their extra fields.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationPosition {
    /// Principal invested.
    pub amount: f64,
    /// Annual percentage yield.
    pub apy: f64,
    /// Risk score; drives the daily volatility band.
    pub risk: f64,
}

impl SimulationPosition {
    #[must_use]
    pub fn new(amount: f64, apy: f64, risk: f64) -> Self {
        Self { amount, apy, risk }
    }
}

impl From<&AllocationEntry> for SimulationPosition {
    fn from(entry: &AllocationEntry) -> Self {
        Self {
            amount: entry.amount,
            apy: entry.apy,
            risk: f64::from(entry.risk),
        }
    }
}

/// Simulated value of one protocol on one day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProtocolReturn {
    /// Position value, rounded to cents.
    pub value: f64,
    /// Daily return in percent, rounded to 4 decimals.
    #[serde(rename = "return")]
    pub return_pct: f64,
}

/// Portfolio value on one simulated day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationDay {
    pub date: NaiveDate,
    #[serde(rename = "totalValue")]
    pub total_value: f64,
    #[serde(rename = "dailyReturns")]
    pub per_protocol_returns: BTreeMap<String, ProtocolReturn>,
}
