//! Shared handler state and service endpoints
//!
//! The cohort and student handlers live in their own modules; this one
//! holds the state they share and the health check.

use axum::{extract::State, Json};

use crate::config::Config;
use crate::models::HealthResponse;
use crate::store::{Database, StoreResult};

/// Application state shared across all handlers.
///
/// Holds the database handle; cloning shares the same store.
#[derive(Clone)]
pub struct AppState {
    /// Shared document store
    pub db: Database,
}

impl AppState {
    /// Creates a new AppState around an open database.
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Connects to the store described by the configuration.
    pub async fn from_config(config: &Config) -> StoreResult<Self> {
        let db = Database::connect(&config.store()).await?;
        Ok(Self::new(db))
    }
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::healthy(state.db.name()))
}
