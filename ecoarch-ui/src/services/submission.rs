//! Submission pipeline
//!
//! Validates a finished draft, obtains its sustainability analysis, and
//! persists the finalized record. Validation failures stop the pipeline
//! before any side effect; a scoring failure degrades the analysis but the
//! record is still saved, so user-entered data is never lost to a flaky
//! scoring service.

use ecoarch_common::model::{BuildingDraft, Purpose, SavedBuilding};
use ecoarch_common::RecordStore;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::services::gemini::{self, GeminiClient};

/// A required field missing at submission time. The draft is preserved
/// unchanged and nothing has been persisted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please provide a name for your building.")]
    MissingName,

    #[error("Please select a continent and region for your building.")]
    MissingLocation,

    #[error("Please specify the purpose in the text field.")]
    MissingOtherPurpose,
}

impl ValidationError {
    /// Wire name of the field that failed validation
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::MissingName => "name",
            ValidationError::MissingLocation => "location",
            ValidationError::MissingOtherPurpose => "otherPurpose",
        }
    }
}

/// Submission failure: user-correctable validation, or a store write error
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Failed to persist record: {0}")]
    Store(#[from] ecoarch_common::Error),
}

/// Required-field checks, in order; the first failing check wins
pub fn validate(draft: &BuildingDraft) -> Result<(), ValidationError> {
    if draft.name.trim().is_empty() {
        return Err(ValidationError::MissingName);
    }

    if draft.continent.is_empty() || draft.region.is_empty() {
        return Err(ValidationError::MissingLocation);
    }

    if let Purpose::Other(text) = &draft.purpose {
        if text.trim().is_empty() {
            return Err(ValidationError::MissingOtherPurpose);
        }
    }

    Ok(())
}

/// Orchestrates validation → scoring → persistence for one draft
pub struct SubmissionPipeline {
    store: Arc<RwLock<RecordStore>>,
    gemini: Option<Arc<GeminiClient>>,
}

impl SubmissionPipeline {
    pub fn new(store: Arc<RwLock<RecordStore>>, gemini: Option<Arc<GeminiClient>>) -> Self {
        Self { store, gemini }
    }

    /// Submit a draft: validate, score, persist under the draft's id.
    ///
    /// No retries; a scoring failure has already been converted to the
    /// zero-score error result by the client and is saved as-is.
    pub async fn submit(&self, draft: BuildingDraft) -> Result<SavedBuilding, SubmitError> {
        validate(&draft)?;

        let analysis = match &self.gemini {
            Some(client) => client.analyze(&draft).await,
            None => {
                tracing::warn!(
                    building_id = %draft.id,
                    "No scoring client configured, substituting error result"
                );
                gemini::failed_analysis()
            }
        };

        let record = SavedBuilding {
            building: draft,
            analysis,
        };
        self.store.write().await.upsert(record.clone())?;

        tracing::info!(
            building_id = %record.id(),
            score = record.analysis.sustainability_score,
            "Building record saved"
        );
        Ok(record)
    }
}
