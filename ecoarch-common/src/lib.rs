//! # EcoArchitect Common Library
//!
//! Shared code for the EcoArchitect service:
//! - Building domain model (drafts, analysis results, saved records)
//! - Option catalogs for the design form
//! - Record store (single JSON slot persistence)
//! - Configuration loading
//! - Common error type

pub mod config;
pub mod error;
pub mod model;
pub mod options;
pub mod store;

pub use error::{Error, Result};
pub use model::{AnalysisResult, BuildingDraft, Purpose, RecommendationCategory, SavedBuilding};
pub use store::RecordStore;
