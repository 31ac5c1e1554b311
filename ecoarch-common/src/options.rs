//! Option catalogs for the design form
//!
//! Fixed sets of values the form offers for each enumerated field. The
//! multi-select catalogs (`ENERGY_EFFICIENCY_OPTIONS`,
//! `RESOURCE_EFFICIENCY_OPTIONS`, `WATER_USAGE_OPTIONS`) bound the
//! corresponding list-valued draft fields.

pub const CONTINENTS: &[&str] = &[
    "North America",
    "South America",
    "Europe",
    "Africa",
    "Asia",
    "Australia",
    "Antarctica",
];

pub const REGIONS: &[&str] = &["North", "South", "East", "West", "Central"];

pub const PURPOSES: &[&str] = &[
    "Residential",
    "Commercial",
    "Industrial",
    "Institutional",
    "Educational",
    "Assembly",
    "Mixed-Use",
    "Other",
];

pub const FLOOR_RANGES: &[&str] = &["1-5", "6-10", "10-15", "16-20"];

pub const LOCATION_TYPES: &[&str] = &["Urban", "Suburban", "Rural"];

pub const ARCHITECTURAL_STYLES: &[&str] = &[
    "Contemporary",
    "Neoclassical",
    "Art Deco",
    "Victorian",
    "Mid-Century Modern",
    "Tudor",
];

/// Construction types per the standard fire-resistance classification
pub const MATERIAL_TYPES: &[&str] = &[
    "Type 1: Fire-Resistive (concrete, steel)",
    "Type 2: Non-Combustible (masonry, metal)",
    "Type 3: Ordinary (masonry, wood)",
    "Type 4: Heavy Timber",
    "Type 5: Wood-Framed",
];

pub const WASTE_REDUCTION_SYSTEMS: &[&str] =
    &["Trash System", "Recycling System", "Composting System"];

pub const ENERGY_EFFICIENCY_OPTIONS: &[&str] = &[
    "Solar Power",
    "Solar Thermal",
    "Geothermal",
    "Wind/Bioenergy",
];

pub const RESOURCE_EFFICIENCY_OPTIONS: &[&str] = &[
    "Thermal Mass",
    "Strategic Building Orientation",
    "Maximized Natural Light",
    "High-Performance Building Envelope",
];

pub const WATER_USAGE_OPTIONS: &[&str] = &["Low-Flow Fixtures", "Rainwater Harvesting"];
