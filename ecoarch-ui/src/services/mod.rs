//! Service layer for ecoarch-ui
//!
//! The external scoring client and the submission pipeline that ties
//! validation, scoring and persistence together.

pub mod gemini;
pub mod submission;

pub use gemini::GeminiClient;
pub use submission::{SubmissionPipeline, SubmitError, ValidationError};
