//! Building domain model
//!
//! A `BuildingDraft` is the mutable record a design session edits; a
//! `SavedBuilding` is the immutable union of a finalized draft and the
//! `AnalysisResult` produced for it. Serialized field names (camelCase,
//! `otherPurpose`, `sustainabilityScore`, ...) are the persisted slot
//! format and must stay stable.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Dropdown value that selects the free-text purpose
pub const OTHER_PURPOSE: &str = "Other";

/// Building purpose.
///
/// Tagged so that a standard purpose can never carry stray free text:
/// only `Other` holds a user-written specification. Serializes to the
/// two-field wire form (`purpose` plus optional `otherPurpose`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "PurposeFields", into = "PurposeFields")]
pub enum Purpose {
    /// One of the fixed purpose options (Residential, Commercial, ...)
    Standard(String),
    /// "Other" selected, with the user-supplied specification text
    Other(String),
}

impl Purpose {
    /// The value shown in the purpose dropdown
    pub fn label(&self) -> &str {
        match self {
            Purpose::Standard(value) => value,
            Purpose::Other(_) => OTHER_PURPOSE,
        }
    }

    /// The purpose as it should appear in prompts and summaries:
    /// the specification text when "Other" is selected
    pub fn effective(&self) -> &str {
        match self {
            Purpose::Standard(value) => value,
            Purpose::Other(text) => text,
        }
    }

    pub fn is_other(&self) -> bool {
        matches!(self, Purpose::Other(_))
    }
}

impl Default for Purpose {
    fn default() -> Self {
        Purpose::Standard("Residential".to_string())
    }
}

/// Wire form of [`Purpose`], flattened into the building record
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PurposeFields {
    purpose: String,
    #[serde(
        rename = "otherPurpose",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    other_purpose: Option<String>,
}

impl From<PurposeFields> for Purpose {
    fn from(fields: PurposeFields) -> Self {
        if fields.purpose == OTHER_PURPOSE {
            Purpose::Other(fields.other_purpose.unwrap_or_default())
        } else {
            Purpose::Standard(fields.purpose)
        }
    }
}

impl From<Purpose> for PurposeFields {
    fn from(purpose: Purpose) -> Self {
        match purpose {
            Purpose::Standard(value) => PurposeFields {
                purpose: value,
                other_purpose: None,
            },
            Purpose::Other(text) => PurposeFields {
                purpose: OTHER_PURPOSE.to_string(),
                other_purpose: Some(text),
            },
        }
    }
}

/// Mutable building record owned by one active design session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildingDraft {
    /// Stable identifier, generated once at draft creation
    pub id: Uuid,
    pub name: String,
    pub continent: String,
    pub region: String,
    #[serde(flatten)]
    pub purpose: Purpose,
    /// Floor-count bucket ("1-5", "6-10", ...)
    pub floors: String,
    /// Total area in square feet
    pub area: u32,
    pub location_type: String,
    pub materials: String,
    pub architectural_style: String,
    pub waste_reduction: String,
    pub energy_efficiency: Vec<String>,
    pub resource_efficiency: Vec<String>,
    pub water_usage: Vec<String>,
    pub additional_considerations: String,
}

impl Default for BuildingDraft {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            name: "New Eco-Home".to_string(),
            continent: String::new(),
            region: String::new(),
            purpose: Purpose::default(),
            floors: "1-5".to_string(),
            area: 1500,
            location_type: "Suburban".to_string(),
            materials: "Type 5: Wood-Framed".to_string(),
            architectural_style: "Contemporary".to_string(),
            waste_reduction: "Recycling System".to_string(),
            energy_efficiency: Vec::new(),
            resource_efficiency: Vec::new(),
            water_usage: Vec::new(),
            additional_considerations: String::new(),
        }
    }
}

/// One category of analysis recommendations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationCategory {
    pub category: String,
    pub items: Vec<String>,
}

/// Result of a sustainability analysis, produced once per submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Eco-friendliness score, 0-100 inclusive
    pub sustainability_score: u8,
    pub recommendations: Vec<RecommendationCategory>,
    pub summary: String,
}

/// Finalized building record: the submitted draft plus its analysis.
/// Unit of storage; at most one per `id` in the record store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedBuilding {
    #[serde(flatten)]
    pub building: BuildingDraft,
    pub analysis: AnalysisResult,
}

impl SavedBuilding {
    pub fn id(&self) -> Uuid {
        self.building.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn standard_purpose_omits_other_field() {
        let draft = BuildingDraft::default();
        let value = serde_json::to_value(&draft).unwrap();

        assert_eq!(value["purpose"], "Residential");
        assert!(value.get("otherPurpose").is_none());
    }

    #[test]
    fn other_purpose_round_trips() {
        let mut draft = BuildingDraft::default();
        draft.purpose = Purpose::Other("Art Studio".to_string());

        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(value["purpose"], "Other");
        assert_eq!(value["otherPurpose"], "Art Studio");

        let parsed: BuildingDraft = serde_json::from_value(value).unwrap();
        assert_eq!(parsed.purpose, Purpose::Other("Art Studio".to_string()));
        assert_eq!(parsed.purpose.effective(), "Art Studio");
    }

    #[test]
    fn draft_uses_wire_field_names() {
        let draft = BuildingDraft::default();
        let value = serde_json::to_value(&draft).unwrap();

        assert!(value.get("locationType").is_some());
        assert!(value.get("architecturalStyle").is_some());
        assert!(value.get("wasteReduction").is_some());
        assert!(value.get("energyEfficiency").is_some());
        assert!(value.get("additionalConsiderations").is_some());
    }

    #[test]
    fn saved_building_flattens_draft_fields() {
        let saved = SavedBuilding {
            building: BuildingDraft::default(),
            analysis: AnalysisResult {
                sustainability_score: 72,
                recommendations: vec![RecommendationCategory {
                    category: "Energy Efficiency".to_string(),
                    items: vec!["Add solar".to_string()],
                }],
                summary: "Solid baseline.".to_string(),
            },
        };

        let value = serde_json::to_value(&saved).unwrap();
        assert_eq!(value["name"], "New Eco-Home");
        assert_eq!(value["analysis"]["sustainabilityScore"], 72);

        let parsed: SavedBuilding = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, saved);
    }

    #[test]
    fn analysis_result_parses_wire_shape() {
        let raw = json!({
            "sustainabilityScore": 85,
            "recommendations": [
                {"category": "Water Conservation", "items": ["Collect rainwater"]}
            ],
            "summary": "Strong water profile."
        });

        let analysis: AnalysisResult = serde_json::from_value(raw).unwrap();
        assert_eq!(analysis.sustainability_score, 85);
        assert_eq!(analysis.recommendations[0].category, "Water Conservation");
    }
}
