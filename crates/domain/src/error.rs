use thiserror::Error;

/// Input rejected before any computation runs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Amount must be at least ${minimum}")]
    AmountTooSmall { amount: f64, minimum: f64 },
    #[error("Risk tolerance must be between 1 and 10")]
    RiskToleranceOutOfRange(i64),
    #[error("Valid allocation object required")]
    EmptyAllocation,
    #[error("Invalid position for {protocol}: {reason}")]
    InvalidPosition { protocol: String, reason: String },
    #[error("Simulation horizon must be between 1 and {max} days, got {days}")]
    InvalidHorizon { days: u32, max: u32 },
    #[error("{0}")]
    Other(String),
}
