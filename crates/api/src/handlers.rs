//! Request handlers.

use crate::error::ApiError;
use crate::models::{
    HealthResponse, OptimizeBody, OptimizeResponse, ProtocolsResponse, SimulateBody,
    SimulateResponse, SimulationMetadata,
};
use crate::state::AppState;
use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::HeaderMap,
    response::{IntoResponse, Response},
};
use btcyield_data::catalog::ProtocolQuery;
use btcyield_data::repositories::PortfolioRecord;
use btcyield_simulation::engine::SimulationEngine;
use btcyield_simulation::state::SimulationConfig;
use chrono::Utc;
use tracing::{debug, info};

/// Header carrying the caller's session id.
pub const SESSION_HEADER: &str = "session-id";
/// Session id used when the header is absent.
pub const ANONYMOUS_SESSION: &str = "anonymous";

fn session_id(headers: &HeaderMap) -> String {
    headers
        .get(SESSION_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .unwrap_or(ANONYMOUS_SESSION)
        .to_string()
}

/// `GET /api/health`
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        timestamp: Utc::now(),
        uptime: state.uptime_secs(),
    })
}

/// `GET /api/market-data`
pub async fn market_data(State(state): State<AppState>) -> Response {
    let mut rng = state.rng();
    let snapshot = state.market.live_view(&mut rng).await;
    Json(snapshot).into_response()
}

/// `POST /api/optimize`
pub async fn optimize(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<OptimizeBody>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(body) = payload?;
    let request = body.into_request()?;

    if !state.config.optimize_delay.is_zero() {
        tokio::time::sleep(state.config.optimize_delay).await;
    }

    let result = {
        let mut rng = state.rng();
        state
            .optimizer
            .optimize(&request, state.catalog.protocols(), &mut rng)?
    };

    let session_id = session_id(&headers);
    let record = PortfolioRecord::new(
        session_id.clone(),
        result,
        request.amount,
        request.risk_tolerance,
    );
    let response = Json(OptimizeResponse {
        success: true,
        result: &record.result,
        session_id: &session_id,
    })
    .into_response();

    state
        .portfolios
        .save(record)
        .await
        .map_err(|e| ApiError::internal("optimization", e))?;

    info!(session_id = %session_id, amount = request.amount, "Optimization stored");
    Ok(response)
}

/// `GET /api/portfolio/{session_id}`
pub async fn get_portfolio(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<PortfolioRecord>, ApiError> {
    let record = state
        .portfolios
        .find_by_session(&session_id)
        .await
        .map_err(|e| ApiError::internal("portfolio lookup", e))?;

    record
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Portfolio not found".to_string()))
}

/// `POST /api/simulate`
pub async fn simulate(
    State(state): State<AppState>,
    payload: Result<Json<SimulateBody>, JsonRejection>,
) -> Result<Json<SimulateResponse>, ApiError> {
    let Json(body) = payload?;
    let positions = body.positions()?;
    let days = body.days();

    let config = SimulationConfig::new(Utc::now().date_naive())
        .with_days(days)
        .with_max_days(state.config.max_simulation_days);
    let mut rng = state.rng();
    let simulation = SimulationEngine::new(config).run(&positions, &mut rng)?;

    debug!(days, protocols = positions.len(), "Simulation generated");

    Ok(Json(SimulateResponse {
        success: true,
        simulation,
        metadata: SimulationMetadata {
            days,
            protocols: positions.len(),
            generated_at: Utc::now(),
        },
    }))
}

/// `GET /api/protocols`
pub async fn list_protocols(
    State(state): State<AppState>,
    query: Result<Query<ProtocolQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(query) = query?;
    let protocols = state.catalog.query(&query);
    Ok(Json(ProtocolsResponse::new(&protocols)).into_response())
}

/// Fallback for unmatched routes.
pub async fn not_found(uri: axum::http::Uri) -> ApiError {
    if uri.path().starts_with("/api/") {
        ApiError::NotFound("API endpoint not found".to_string())
    } else {
        ApiError::NotFound("Not found".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_session_id_defaults_to_anonymous() {
        let mut headers = HeaderMap::new();
        assert_eq!(session_id(&headers), "anonymous");

        headers.insert(SESSION_HEADER, HeaderValue::from_static("  "));
        assert_eq!(session_id(&headers), "anonymous");

        headers.insert(SESSION_HEADER, HeaderValue::from_static("user-42"));
        assert_eq!(session_id(&headers), "user-42");
    }
}
