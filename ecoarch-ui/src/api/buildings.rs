//! Saved building API handlers
//!
//! GET /buildings, GET /buildings/{id}

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::AppState;
use ecoarch_common::model::SavedBuilding;

/// GET /buildings
///
/// All saved buildings, in insertion order.
pub async fn list_buildings(State(state): State<AppState>) -> Json<Vec<SavedBuilding>> {
    let store = state.store.read().await;
    Json(store.list_all().to_vec())
}

/// GET /buildings/{id}
pub async fn get_building(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<SavedBuilding>> {
    let store = state.store.read().await;
    let record = store
        .get_by_id(id)
        .ok_or_else(|| ApiError::NotFound(format!("Building not found: {}", id)))?;
    Ok(Json(record.clone()))
}

/// Build building routes
pub fn building_routes() -> Router<AppState> {
    Router::new()
        .route("/buildings", get(list_buildings))
        .route("/buildings/:id", get(get_building))
}
