//! Design form session state machine
//!
//! A session steps one mutable `BuildingDraft` through the ordered form
//! stages: Basic Info → Style & Material → Efficiency → Additional →
//! Review & Submit. Stage movement is never gated on field state; all
//! required-field checks happen at submission time.

use chrono::{DateTime, Utc};
use ecoarch_common::model::{BuildingDraft, Purpose, SavedBuilding, OTHER_PURPOSE};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Ordered form stages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FormStage {
    /// Name, purpose, floors, area, location type
    BasicInfo,
    /// Architectural style and construction materials
    StyleMaterial,
    /// Waste reduction plus the efficiency checklists
    Efficiency,
    /// Free-form additional considerations
    Additional,
    /// Read-back of the full draft before submission
    Review,
}

impl FormStage {
    /// All stages, in form order
    pub const ALL: [FormStage; 5] = [
        FormStage::BasicInfo,
        FormStage::StyleMaterial,
        FormStage::Efficiency,
        FormStage::Additional,
        FormStage::Review,
    ];

    /// Position of this stage in the form sequence
    pub fn index(self) -> usize {
        match self {
            FormStage::BasicInfo => 0,
            FormStage::StyleMaterial => 1,
            FormStage::Efficiency => 2,
            FormStage::Additional => 3,
            FormStage::Review => 4,
        }
    }

    /// Stage at the given position, if in range
    pub fn from_index(index: usize) -> Option<FormStage> {
        Self::ALL.get(index).copied()
    }

    /// Stage label as shown in the stage picker
    pub fn label(self) -> &'static str {
        match self {
            FormStage::BasicInfo => "Basic Info",
            FormStage::StyleMaterial => "Style & Material",
            FormStage::Efficiency => "Efficiency",
            FormStage::Additional => "Additional",
            FormStage::Review => "Review & Submit",
        }
    }
}

/// List-valued draft fields whose options are toggled on and off
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ListField {
    EnergyEfficiency,
    ResourceEfficiency,
    WaterUsage,
}

/// Single-field draft update
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum DraftUpdate {
    Name(String),
    Continent(String),
    Region(String),
    Purpose(String),
    OtherPurpose(String),
    Floors(String),
    Area(u32),
    LocationType(String),
    Materials(String),
    ArchitecturalStyle(String),
    WasteReduction(String),
    AdditionalConsiderations(String),
}

/// One design session: the mutable draft plus the stage being edited
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftSession {
    /// Unique session identifier (distinct from the draft's building id)
    pub session_id: Uuid,

    /// Stage currently being edited
    pub stage: FormStage,

    /// Working copy of the building record
    pub draft: BuildingDraft,

    /// True while a submission's scoring request is outstanding; the
    /// session is read-only until it clears
    pub analyzing: bool,

    /// Session start time
    pub started_at: DateTime<Utc>,
}

impl DraftSession {
    /// Start a session on a fresh draft with form defaults
    pub fn new() -> Self {
        Self {
            session_id: Uuid::new_v4(),
            stage: FormStage::BasicInfo,
            draft: BuildingDraft::default(),
            analyzing: false,
            started_at: Utc::now(),
        }
    }

    /// Start a session editing an existing record. The draft is a copy of
    /// the record's fields under the record's id, so submission replaces
    /// it in place.
    pub fn edit(existing: &SavedBuilding) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            stage: FormStage::BasicInfo,
            draft: existing.building.clone(),
            analyzing: false,
            started_at: Utc::now(),
        }
    }

    /// Move forward one stage, stopping at Review
    pub fn advance(&mut self) {
        let next = (self.stage.index() + 1).min(FormStage::ALL.len() - 1);
        self.stage = FormStage::ALL[next];
    }

    /// Move back one stage, stopping at the first
    pub fn retreat(&mut self) {
        let prev = self.stage.index().saturating_sub(1);
        self.stage = FormStage::ALL[prev];
    }

    /// Jump directly to a stage. Returns false when the index is out of
    /// range, leaving the session unchanged.
    pub fn jump_to(&mut self, index: usize) -> bool {
        match FormStage::from_index(index) {
            Some(stage) => {
                self.stage = stage;
                true
            }
            None => false,
        }
    }

    /// Apply one field update to the draft
    pub fn apply(&mut self, update: DraftUpdate) {
        match update {
            DraftUpdate::Name(value) => self.draft.name = value,
            DraftUpdate::Continent(value) => self.draft.continent = value,
            DraftUpdate::Region(value) => self.draft.region = value,
            DraftUpdate::Purpose(value) => {
                self.draft.purpose = if value == OTHER_PURPOSE {
                    // keep any specification text already entered
                    match &self.draft.purpose {
                        Purpose::Other(text) => Purpose::Other(text.clone()),
                        Purpose::Standard(_) => Purpose::Other(String::new()),
                    }
                } else {
                    Purpose::Standard(value)
                };
            }
            DraftUpdate::OtherPurpose(text) => {
                // only meaningful while "Other" is selected
                if self.draft.purpose.is_other() {
                    self.draft.purpose = Purpose::Other(text);
                }
            }
            DraftUpdate::Floors(value) => self.draft.floors = value,
            DraftUpdate::Area(value) => self.draft.area = value,
            DraftUpdate::LocationType(value) => self.draft.location_type = value,
            DraftUpdate::Materials(value) => self.draft.materials = value,
            DraftUpdate::ArchitecturalStyle(value) => self.draft.architectural_style = value,
            DraftUpdate::WasteReduction(value) => self.draft.waste_reduction = value,
            DraftUpdate::AdditionalConsiderations(value) => {
                self.draft.additional_considerations = value
            }
        }
    }

    /// Toggle one option on a list-valued field: added if absent, removed
    /// if present
    pub fn toggle(&mut self, field: ListField, option: &str) {
        let list = match field {
            ListField::EnergyEfficiency => &mut self.draft.energy_efficiency,
            ListField::ResourceEfficiency => &mut self.draft.resource_efficiency,
            ListField::WaterUsage => &mut self.draft.water_usage,
        };

        match list.iter().position(|item| item == option) {
            Some(index) => {
                list.remove(index);
            }
            None => list.push(option.to_string()),
        }
    }
}

impl Default for DraftSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecoarch_common::model::AnalysisResult;

    #[test]
    fn advance_clamps_at_review() {
        let mut session = DraftSession::new();
        for _ in 0..10 {
            session.advance();
        }
        assert_eq!(session.stage, FormStage::Review);
    }

    #[test]
    fn retreat_clamps_at_first_stage() {
        let mut session = DraftSession::new();
        session.retreat();
        assert_eq!(session.stage, FormStage::BasicInfo);

        session.advance();
        session.retreat();
        session.retreat();
        assert_eq!(session.stage, FormStage::BasicInfo);
    }

    #[test]
    fn jump_to_bounds() {
        let mut session = DraftSession::new();
        assert!(session.jump_to(4));
        assert_eq!(session.stage, FormStage::Review);

        assert!(!session.jump_to(5));
        assert_eq!(session.stage, FormStage::Review);
    }

    #[test]
    fn toggle_is_its_own_inverse() {
        let mut session = DraftSession::new();
        let original = session.draft.energy_efficiency.clone();

        session.toggle(ListField::EnergyEfficiency, "Solar Power");
        assert_eq!(session.draft.energy_efficiency, vec!["Solar Power"]);

        session.toggle(ListField::EnergyEfficiency, "Solar Power");
        assert_eq!(session.draft.energy_efficiency, original);
    }

    #[test]
    fn toggle_removes_from_the_middle() {
        let mut session = DraftSession::new();
        session.toggle(ListField::WaterUsage, "Low-Flow Fixtures");
        session.toggle(ListField::WaterUsage, "Rainwater Harvesting");

        session.toggle(ListField::WaterUsage, "Low-Flow Fixtures");
        assert_eq!(session.draft.water_usage, vec!["Rainwater Harvesting"]);
    }

    #[test]
    fn selecting_other_keeps_entered_text() {
        let mut session = DraftSession::new();
        session.apply(DraftUpdate::Purpose("Other".to_string()));
        session.apply(DraftUpdate::OtherPurpose("Art Studio".to_string()));

        // flipping away and back must not lose the specification
        session.apply(DraftUpdate::Purpose("Other".to_string()));
        assert_eq!(session.draft.purpose, Purpose::Other("Art Studio".to_string()));

        session.apply(DraftUpdate::Purpose("Commercial".to_string()));
        assert_eq!(
            session.draft.purpose,
            Purpose::Standard("Commercial".to_string())
        );
    }

    #[test]
    fn other_text_ignored_for_standard_purpose() {
        let mut session = DraftSession::new();
        session.apply(DraftUpdate::OtherPurpose("Stray text".to_string()));
        assert_eq!(
            session.draft.purpose,
            Purpose::Standard("Residential".to_string())
        );
    }

    #[test]
    fn edit_session_preserves_record_id() {
        let saved = SavedBuilding {
            building: BuildingDraft::default(),
            analysis: AnalysisResult {
                sustainability_score: 72,
                recommendations: Vec::new(),
                summary: "ok".to_string(),
            },
        };

        let session = DraftSession::edit(&saved);
        assert_eq!(session.draft.id, saved.id());
        assert_eq!(session.stage, FormStage::BasicInfo);
        assert_ne!(session.session_id, saved.id());
    }
}
