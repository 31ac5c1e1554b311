//! Data models for ecoarch-ui

pub mod draft_session;

pub use draft_session::{DraftSession, DraftUpdate, FormStage, ListField};
