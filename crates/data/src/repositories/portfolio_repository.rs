//! Portfolio repository for per-session optimization results.

use async_trait::async_trait;
use btcyield_domain::value_objects::optimization_result::OptimizationResult;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

/// Stored record of the latest optimization for a session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioRecord {
    /// Unique identifier.
    pub id: Uuid,
    /// Session the record belongs to.
    #[serde(rename = "sessionId")]
    pub session_id: String,
    /// Optimization output, flattened into the record on the wire.
    #[serde(flatten)]
    pub result: OptimizationResult,
    /// Amount that was optimized.
    pub amount: f64,
    /// Tolerance the caller supplied.
    #[serde(rename = "riskTolerance")]
    pub risk_tolerance: u8,
    /// Record creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl PortfolioRecord {
    /// Creates a record stamped with a fresh id and the current time.
    #[must_use]
    pub fn new(
        session_id: impl Into<String>,
        result: OptimizationResult,
        amount: f64,
        risk_tolerance: u8,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            session_id: session_id.into(),
            result,
            amount,
            risk_tolerance,
            created_at: Utc::now(),
        }
    }
}

/// Storage for the latest optimization per session.
#[async_trait]
pub trait PortfolioRepository: Send + Sync {
    /// Stores `record`, replacing any earlier record for the same session.
    ///
    /// # Errors
    /// Returns an error if the backing store fails.
    async fn save(&self, record: PortfolioRecord) -> anyhow::Result<()>;

    /// Finds the record for `session_id`.
    ///
    /// # Errors
    /// Returns an error if the backing store fails.
    async fn find_by_session(&self, session_id: &str) -> anyhow::Result<Option<PortfolioRecord>>;

    /// Number of sessions with a stored record.
    ///
    /// # Errors
    /// Returns an error if the backing store fails.
    async fn count(&self) -> anyhow::Result<usize>;
}

/// Process-local store. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryPortfolioRepository {
    records: RwLock<HashMap<String, PortfolioRecord>>,
}

impl InMemoryPortfolioRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PortfolioRepository for InMemoryPortfolioRepository {
    async fn save(&self, record: PortfolioRecord) -> anyhow::Result<()> {
        debug!(session_id = %record.session_id, id = %record.id, "Saving portfolio");
        self.records
            .write()
            .await
            .insert(record.session_id.clone(), record);
        Ok(())
    }

    async fn find_by_session(&self, session_id: &str) -> anyhow::Result<Option<PortfolioRecord>> {
        Ok(self.records.read().await.get(session_id).cloned())
    }

    async fn count(&self) -> anyhow::Result<usize> {
        Ok(self.records.read().await.len())
    }
}
