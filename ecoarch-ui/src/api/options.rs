//! Form option catalog handler
//!
//! GET /options gives a frontend everything it needs to render the
//! dropdowns, checklists and the stage picker.

use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::models::FormStage;
use crate::AppState;
use ecoarch_common::options;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionCatalog {
    pub stages: Vec<&'static str>,
    pub continents: &'static [&'static str],
    pub regions: &'static [&'static str],
    pub purposes: &'static [&'static str],
    pub floor_ranges: &'static [&'static str],
    pub location_types: &'static [&'static str],
    pub architectural_styles: &'static [&'static str],
    pub material_types: &'static [&'static str],
    pub waste_reduction_systems: &'static [&'static str],
    pub energy_efficiency: &'static [&'static str],
    pub resource_efficiency: &'static [&'static str],
    pub water_usage: &'static [&'static str],
}

/// GET /options
pub async fn get_options() -> Json<OptionCatalog> {
    Json(OptionCatalog {
        stages: FormStage::ALL.iter().map(|stage| stage.label()).collect(),
        continents: options::CONTINENTS,
        regions: options::REGIONS,
        purposes: options::PURPOSES,
        floor_ranges: options::FLOOR_RANGES,
        location_types: options::LOCATION_TYPES,
        architectural_styles: options::ARCHITECTURAL_STYLES,
        material_types: options::MATERIAL_TYPES,
        waste_reduction_systems: options::WASTE_REDUCTION_SYSTEMS,
        energy_efficiency: options::ENERGY_EFFICIENCY_OPTIONS,
        resource_efficiency: options::RESOURCE_EFFICIENCY_OPTIONS,
        water_usage: options::WATER_USAGE_OPTIONS,
    })
}

/// Build option routes
pub fn option_routes() -> Router<AppState> {
    Router::new().route("/options", get(get_options))
}
