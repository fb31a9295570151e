//! API error type and its HTTP mapping.

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use btcyield_domain::error::ValidationError;
use btcyield_optimization::OptimizationError;
use btcyield_simulation::SimulationError;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Rejected input.
    #[error("{0}")]
    Validation(String),
    /// Missing resource.
    #[error("{0}")]
    NotFound(String),
    /// Failure after input was accepted. Only the operation is exposed.
    #[error("Internal server error during {operation}")]
    Internal {
        operation: &'static str,
        reason: String,
    },
}

impl ApiError {
    pub fn internal(operation: &'static str, reason: impl ToString) -> Self {
        Self::Internal {
            operation,
            reason: reason.to_string(),
        }
    }

    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<OptimizationError> for ApiError {
    fn from(err: OptimizationError) -> Self {
        match err {
            OptimizationError::Validation(err) => err.into(),
            other => Self::internal("optimization", other),
        }
    }
}

impl From<SimulationError> for ApiError {
    fn from(err: SimulationError) -> Self {
        match err {
            SimulationError::Validation(err) => err.into(),
            other => Self::internal("simulation", other),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if let Self::Internal { operation, reason } = &self {
            error!(operation, reason = %reason, "Request failed");
        }

        let body = serde_json::json!({
            "error": self.to_string(),
            "code": status.as_u16()
        });

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let validation: ApiError = ValidationError::EmptyAllocation.into();
        assert_eq!(validation.status(), StatusCode::BAD_REQUEST);
        assert_eq!(validation.to_string(), "Valid allocation object required");

        let missing = ApiError::NotFound("Portfolio not found".to_string());
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);

        let internal: ApiError = SimulationError::DateOverflow(3).into();
        assert_eq!(internal.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            internal.to_string(),
            "Internal server error during simulation"
        );
    }

    #[test]
    fn test_optimization_validation_stays_client_error() {
        let err: ApiError =
            OptimizationError::Validation(ValidationError::RiskToleranceOutOfRange(0)).into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Risk tolerance must be between 1 and 10");

        let corrupted: ApiError = OptimizationError::CorruptedProtocol {
            name: "X".to_string(),
            reason: "non-finite apy".to_string(),
        }
        .into();
        assert_eq!(
            corrupted.to_string(),
            "Internal server error during optimization"
        );
    }
}
