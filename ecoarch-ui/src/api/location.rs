//! Location insight API handler
//!
//! GET /location/summary backs the form's "Get Location Insights" panel.

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::services::gemini;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct LocationQuery {
    pub continent: String,
    pub region: String,
}

#[derive(Debug, Serialize)]
pub struct LocationSummaryResponse {
    pub summary: String,
}

/// GET /location/summary?continent=..&region=..
///
/// Best-effort climate summary for the chosen location. A missing or
/// unreachable scoring client yields the fixed fallback sentence.
pub async fn location_summary(
    State(state): State<AppState>,
    Query(query): Query<LocationQuery>,
) -> ApiResult<Json<LocationSummaryResponse>> {
    if query.continent.is_empty() || query.region.is_empty() {
        return Err(ApiError::BadRequest(
            "continent and region are required".to_string(),
        ));
    }

    let summary = match &state.gemini {
        Some(client) => client.location_summary(&query.continent, &query.region).await,
        None => gemini::LOCATION_SUMMARY_FALLBACK.to_string(),
    };

    Ok(Json(LocationSummaryResponse { summary }))
}

/// Build location routes
pub fn location_routes() -> Router<AppState> {
    Router::new().route("/location/summary", get(location_summary))
}
