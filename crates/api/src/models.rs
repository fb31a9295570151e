//! API request and response models.

use btcyield_data::catalog::ProtocolMap;
use btcyield_domain::entities::protocol::Protocol;
use btcyield_domain::error::ValidationError;
use btcyield_domain::value_objects::optimization_result::OptimizationResult;
use btcyield_domain::value_objects::simulation_result::{SimulationDay, SimulationPosition};
use btcyield_optimization::{OptimizationRequest, Preferences};
use btcyield_simulation::state::{DEFAULT_SIMULATION_DAYS, Positions};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
    /// Seconds since startup.
    pub uptime: f64,
}

/// Body of `POST /api/optimize`.
///
/// Fields are optional so a missing value reports the same message as an
/// out-of-range one.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OptimizeBody {
    pub amount: Option<f64>,
    #[serde(rename = "riskTolerance")]
    pub risk_tolerance: Option<f64>,
    #[serde(default)]
    pub preferences: Preferences,
}

impl OptimizeBody {
    /// Validates the body into an optimization request.
    ///
    /// # Errors
    /// Returns a [`ValidationError`] for a missing or too small amount, or a
    /// missing, fractional or out-of-range tolerance.
    pub fn into_request(self) -> Result<OptimizationRequest, ValidationError> {
        let amount = self.amount.unwrap_or(0.0);
        let tolerance = match self.risk_tolerance {
            Some(t) if t.is_finite() && t.fract() == 0.0 => t as i64,
            Some(t) if t.is_finite() => {
                // Passes the amount check first so its message wins.
                OptimizationRequest::validate(amount, 1)?;
                return Err(ValidationError::RiskToleranceOutOfRange(t.trunc() as i64));
            }
            _ => 0,
        };

        Ok(OptimizationRequest::validate(amount, tolerance)?.with_preferences(self.preferences))
    }
}

/// Response of `POST /api/optimize`.
#[derive(Debug, Serialize)]
pub struct OptimizeResponse<'a> {
    pub success: bool,
    #[serde(flatten)]
    pub result: &'a OptimizationResult,
    #[serde(rename = "sessionId")]
    pub session_id: &'a str,
}

/// Body of `POST /api/simulate`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SimulateBody {
    /// Mapping of protocol name to `{amount, apy, risk}`. Extra fields, as
    /// found in optimization output, are ignored.
    pub allocation: Option<serde_json::Value>,
    pub days: Option<u32>,
}

impl SimulateBody {
    #[must_use]
    pub fn days(&self) -> u32 {
        self.days.unwrap_or(DEFAULT_SIMULATION_DAYS)
    }

    /// Extracts simulation positions from the allocation object.
    ///
    /// # Errors
    /// Returns [`ValidationError::EmptyAllocation`] if the allocation is
    /// missing or not an object, and [`ValidationError::InvalidPosition`]
    /// for an entry lacking numeric `amount`, `apy` or `risk`.
    pub fn positions(&self) -> Result<Positions, ValidationError> {
        let Some(serde_json::Value::Object(entries)) = &self.allocation else {
            return Err(ValidationError::EmptyAllocation);
        };

        entries
            .iter()
            .map(|(protocol, value)| {
                serde_json::from_value::<SimulationPosition>(value.clone())
                    .map(|position| (protocol.clone(), position))
                    .map_err(|e| ValidationError::InvalidPosition {
                        protocol: protocol.clone(),
                        reason: e.to_string(),
                    })
            })
            .collect()
    }
}

#[derive(Debug, Serialize)]
pub struct SimulationMetadata {
    pub days: u32,
    /// Number of simulated positions.
    pub protocols: usize,
    pub generated_at: DateTime<Utc>,
}

/// Response of `POST /api/simulate`.
#[derive(Debug, Serialize)]
pub struct SimulateResponse {
    pub success: bool,
    pub simulation: Vec<SimulationDay>,
    pub metadata: SimulationMetadata,
}

/// Response of `GET /api/protocols`.
#[derive(Serialize)]
pub struct ProtocolsResponse<'a> {
    pub protocols: ProtocolMap<'a>,
    pub count: usize,
}

impl<'a> ProtocolsResponse<'a> {
    #[must_use]
    pub fn new(protocols: &'a [Protocol]) -> Self {
        Self {
            protocols: ProtocolMap(protocols),
            count: protocols.len(),
        }
    }
}
