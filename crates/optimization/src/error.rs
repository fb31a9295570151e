use btcyield_domain::error::ValidationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OptimizationError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// A catalog record that cannot be scored.
    #[error("Corrupted protocol record {name}: {reason}")]
    CorruptedProtocol { name: String, reason: String },
}

impl OptimizationError {
    /// Whether the error is the caller's fault.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
