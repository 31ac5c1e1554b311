//! Design session API handlers
//!
//! POST /sessions, stage navigation, field updates, and final submission.
//! A session is held server-side until it is submitted or discarded; while
//! a submission's scoring request is outstanding the session is read-only,
//! so a second submit or a concurrent edit gets 409.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::models::{DraftSession, DraftUpdate, FormStage, ListField};
use crate::services::SubmitError;
use crate::AppState;
use ecoarch_common::model::{BuildingDraft, SavedBuilding};

/// POST /sessions request
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartSessionRequest {
    /// Edit an existing record instead of starting from defaults
    #[serde(default)]
    pub building_id: Option<Uuid>,
}

/// POST /sessions/{id}/stage request
#[derive(Debug, Deserialize)]
pub struct SelectStageRequest {
    pub index: usize,
}

/// POST /sessions/{id}/toggle request
#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    pub field: ListField,
    pub option: String,
}

/// Session state as returned to the form frontend
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub session_id: Uuid,
    pub stage: FormStage,
    pub stage_index: usize,
    pub stage_label: &'static str,
    pub analyzing: bool,
    pub draft: BuildingDraft,
}

impl SessionView {
    fn from_session(session: &DraftSession) -> Self {
        Self {
            session_id: session.session_id,
            stage: session.stage,
            stage_index: session.stage.index(),
            stage_label: session.stage.label(),
            analyzing: session.analyzing,
            draft: session.draft.clone(),
        }
    }
}

fn session_not_found(session_id: Uuid) -> ApiError {
    ApiError::NotFound(format!("Session not found: {}", session_id))
}

/// Run one mutation against a session, refusing while a submission is
/// outstanding
async fn mutate_session<F>(state: &AppState, session_id: Uuid, mutate: F) -> ApiResult<SessionView>
where
    F: FnOnce(&mut DraftSession) -> ApiResult<()>,
{
    let mut sessions = state.sessions.write().await;
    let session = sessions
        .get_mut(&session_id)
        .ok_or_else(|| session_not_found(session_id))?;

    if session.analyzing {
        return Err(ApiError::Conflict(
            "Submission in progress; session is read-only".to_string(),
        ));
    }

    mutate(session)?;
    Ok(SessionView::from_session(session))
}

/// POST /sessions
///
/// Start a design session: a fresh draft with form defaults, or a working
/// copy of an existing record when `buildingId` is given.
pub async fn start_session(
    State(state): State<AppState>,
    Json(request): Json<StartSessionRequest>,
) -> ApiResult<Json<SessionView>> {
    let session = match request.building_id {
        Some(id) => {
            let store = state.store.read().await;
            let existing = store
                .get_by_id(id)
                .ok_or_else(|| ApiError::NotFound(format!("Building not found: {}", id)))?;
            DraftSession::edit(existing)
        }
        None => DraftSession::new(),
    };

    tracing::info!(
        session_id = %session.session_id,
        building_id = %session.draft.id,
        editing = request.building_id.is_some(),
        "Design session started"
    );

    let view = SessionView::from_session(&session);
    state
        .sessions
        .write()
        .await
        .insert(session.session_id, session);
    Ok(Json(view))
}

/// GET /sessions/{session_id}
pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> ApiResult<Json<SessionView>> {
    let sessions = state.sessions.read().await;
    let session = sessions
        .get(&session_id)
        .ok_or_else(|| session_not_found(session_id))?;
    Ok(Json(SessionView::from_session(session)))
}

/// POST /sessions/{session_id}/advance
pub async fn advance_stage(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> ApiResult<Json<SessionView>> {
    let view = mutate_session(&state, session_id, |session| {
        session.advance();
        Ok(())
    })
    .await?;
    Ok(Json(view))
}

/// POST /sessions/{session_id}/retreat
pub async fn retreat_stage(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> ApiResult<Json<SessionView>> {
    let view = mutate_session(&state, session_id, |session| {
        session.retreat();
        Ok(())
    })
    .await?;
    Ok(Json(view))
}

/// POST /sessions/{session_id}/stage
///
/// Direct stage selection from the stage picker; no validation is
/// enforced between stages.
pub async fn select_stage(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<SelectStageRequest>,
) -> ApiResult<Json<SessionView>> {
    let view = mutate_session(&state, session_id, |session| {
        if session.jump_to(request.index) {
            Ok(())
        } else {
            Err(ApiError::BadRequest(format!(
                "Stage index out of range: {}",
                request.index
            )))
        }
    })
    .await?;
    Ok(Json(view))
}

/// POST /sessions/{session_id}/draft
///
/// Apply one field update to the session's draft.
pub async fn update_draft(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(update): Json<DraftUpdate>,
) -> ApiResult<Json<SessionView>> {
    let view = mutate_session(&state, session_id, |session| {
        session.apply(update);
        Ok(())
    })
    .await?;
    Ok(Json(view))
}

/// POST /sessions/{session_id}/toggle
///
/// Toggle one option on a list-valued field.
pub async fn toggle_option(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<ToggleRequest>,
) -> ApiResult<Json<SessionView>> {
    let view = mutate_session(&state, session_id, |session| {
        session.toggle(request.field, &request.option);
        Ok(())
    })
    .await?;
    Ok(Json(view))
}

/// POST /sessions/{session_id}/submit
///
/// Validate the draft, run the sustainability analysis, persist the
/// finalized record, and end the session. A validation failure returns
/// 400 naming the field and leaves the session (and store) unchanged.
pub async fn submit_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> ApiResult<Json<SavedBuilding>> {
    // Take a working copy and mark the session busy so no edit or second
    // submit can race the outstanding scoring request
    let draft = {
        let mut sessions = state.sessions.write().await;
        let session = sessions
            .get_mut(&session_id)
            .ok_or_else(|| session_not_found(session_id))?;

        if session.analyzing {
            return Err(ApiError::Conflict(
                "Submission already in progress".to_string(),
            ));
        }

        session.analyzing = true;
        session.draft.clone()
    };

    let result = state.pipeline().submit(draft).await;

    let mut sessions = state.sessions.write().await;
    match result {
        Ok(record) => {
            sessions.remove(&session_id);
            tracing::info!(
                session_id = %session_id,
                building_id = %record.id(),
                "Design session submitted"
            );
            Ok(Json(record))
        }
        Err(err) => {
            if let Some(session) = sessions.get_mut(&session_id) {
                session.analyzing = false;
            }
            match err {
                SubmitError::Validation(err) => Err(ApiError::Validation(err)),
                SubmitError::Store(err) => Err(ApiError::Common(err)),
            }
        }
    }
}

/// DELETE /sessions/{session_id}
///
/// Discard a session without persisting anything.
pub async fn discard_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let removed = state.sessions.write().await.remove(&session_id);
    match removed {
        Some(_) => {
            tracing::info!(session_id = %session_id, "Design session discarded");
            Ok(StatusCode::NO_CONTENT)
        }
        None => Err(session_not_found(session_id)),
    }
}

/// Build session routes
pub fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/sessions", post(start_session))
        .route(
            "/sessions/:session_id",
            get(get_session).delete(discard_session),
        )
        .route("/sessions/:session_id/advance", post(advance_stage))
        .route("/sessions/:session_id/retreat", post(retreat_stage))
        .route("/sessions/:session_id/stage", post(select_stage))
        .route("/sessions/:session_id/draft", post(update_draft))
        .route("/sessions/:session_id/toggle", post(toggle_option))
        .route("/sessions/:session_id/submit", post(submit_session))
}
