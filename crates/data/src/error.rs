use thiserror::Error;

/// Errors raised while building or loading a protocol catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Duplicate protocol name: {0}")]
    DuplicateProtocol(String),
    #[error("Invalid protocol {name}: {reason}")]
    InvalidProtocol { name: String, reason: String },
    #[error("Malformed catalog: {0}")]
    Parse(#[from] serde_json::Error),
}
