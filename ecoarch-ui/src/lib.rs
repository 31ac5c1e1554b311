//! ecoarch-ui library interface
//!
//! Exposes the application state and router for the binary and for
//! integration testing.

pub mod api;
pub mod error;
pub mod models;
pub mod services;

pub use crate::error::{ApiError, ApiResult};

use axum::Router;
use chrono::{DateTime, Utc};
use ecoarch_common::RecordStore;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::models::DraftSession;
use crate::services::{GeminiClient, SubmissionPipeline};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Saved building records (single JSON slot behind the lock)
    pub store: Arc<RwLock<RecordStore>>,
    /// Scoring client; `None` when no API key is configured, in which case
    /// every analysis degrades to its error result
    pub gemini: Option<Arc<GeminiClient>>,
    /// Active design sessions by session id
    pub sessions: Arc<RwLock<HashMap<Uuid, DraftSession>>>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(store: RecordStore, gemini: Option<GeminiClient>) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            gemini: gemini.map(Arc::new),
            sessions: Arc::new(RwLock::new(HashMap::new())),
            startup_time: Utc::now(),
        }
    }

    /// Submission pipeline bound to this state's store and scoring client
    pub fn pipeline(&self) -> SubmissionPipeline {
        SubmissionPipeline::new(self.store.clone(), self.gemini.clone())
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::session_routes())
        .merge(api::building_routes())
        .merge(api::location_routes())
        .merge(api::option_routes())
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
