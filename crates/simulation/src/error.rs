use btcyield_domain::error::ValidationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Simulation date out of range at day {0}")]
    DateOverflow(u32),
}
