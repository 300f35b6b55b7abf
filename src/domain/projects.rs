//! General project aggregate
//!
//! A project owns its plan, attachments, equipment list and the bill of
//! materials derived from that list.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use super::strategies::StrategyType;

/// Coarse level used for risk impact and probability
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub title: String,
    pub description: String,
    pub estimated_duration: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Risk {
    pub description: String,
    pub mitigation: String,
    pub impact: Level,
    pub probability: Level,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OperatingProcedure {
    pub title: String,
    #[serde(default)]
    pub steps: Vec<String>,
}

/// Generated project plan
///
/// `id` is assigned by the store when the plan is attached to a project;
/// plans coming back from the generator carry none.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPlan {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub title: String,
    pub description: String,
    pub strategy: StrategyType,
    pub overview: String,
    #[serde(default)]
    pub objectives: Vec<String>,
    #[serde(default)]
    pub key_milestones: Vec<Milestone>,
    #[serde(default)]
    pub resources: Vec<String>,
    #[serde(default)]
    pub risks: Vec<Risk>,
    #[serde(default)]
    pub standard_operating_procedures: Vec<OperatingProcedure>,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

/// Partial update for a plan
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub strategy: Option<StrategyType>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub objectives: Option<Vec<String>>,
    #[serde(default)]
    pub key_milestones: Option<Vec<Milestone>>,
    #[serde(default)]
    pub resources: Option<Vec<String>>,
    #[serde(default)]
    pub risks: Option<Vec<Risk>>,
    #[serde(default)]
    pub standard_operating_procedures: Option<Vec<OperatingProcedure>>,
    #[serde(default)]
    pub recommendations: Option<Vec<String>>,
}

impl PlanPatch {
    pub fn apply(self, plan: &mut ProjectPlan) {
        if let Some(v) = self.title {
            plan.title = v;
        }
        if let Some(v) = self.description {
            plan.description = v;
        }
        if let Some(v) = self.strategy {
            plan.strategy = v;
        }
        if let Some(v) = self.overview {
            plan.overview = v;
        }
        if let Some(v) = self.objectives {
            plan.objectives = v;
        }
        if let Some(v) = self.key_milestones {
            plan.key_milestones = v;
        }
        if let Some(v) = self.resources {
            plan.resources = v;
        }
        if let Some(v) = self.risks {
            plan.risks = v;
        }
        if let Some(v) = self.standard_operating_procedures {
            plan.standard_operating_procedures = v;
        }
        if let Some(v) = self.recommendations {
            plan.recommendations = v;
        }
    }
}

/// Attachment type enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentType {
    Pdf,
    Image,
    Other,
}

impl Default for AttachmentType {
    fn default() -> Self {
        Self::Other
    }
}

/// File attached to a project; `url` may be a remote URL or a data URI
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub id: Uuid,
    pub name: String,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: AttachmentType,
    pub size: u64,
    pub created_at: DateTime<Utc>,
    pub analyzed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extracted_equipment: Option<Vec<EquipmentItem>>,
}

/// Request DTO for attaching a file
#[derive(Debug, Clone, Deserialize)]
pub struct NewAttachment {
    pub name: String,
    pub url: String,
    #[serde(rename = "type", default)]
    pub kind: AttachmentType,
    #[serde(default)]
    pub size: u64,
}

/// Piece of equipment tracked against a project
///
/// `name` is free text but conventionally one of the catalog names
/// ("Solar Panel", "Inverter", "Mounting System", "Battery").
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentItem {
    pub id: Uuid,
    pub name: String,
    pub manufacturer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specifications: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installation_url: Option<String>,
}

/// Request DTO for adding equipment
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEquipment {
    pub name: String,
    pub manufacturer: String,
    #[serde(default)]
    pub model: Option<String>,
    pub quantity: u32,
    #[serde(default)]
    pub specifications: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub installation_url: Option<String>,
}

impl From<EquipmentItem> for NewEquipment {
    fn from(e: EquipmentItem) -> Self {
        Self {
            name: e.name,
            manufacturer: e.manufacturer,
            model: e.model,
            quantity: e.quantity,
            specifications: e.specifications,
            installation_url: e.installation_url,
        }
    }
}

/// Request DTO for updating equipment
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub manufacturer: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub quantity: Option<u32>,
    #[serde(default)]
    pub specifications: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub installation_url: Option<String>,
}

impl EquipmentPatch {
    pub fn apply(self, item: &mut EquipmentItem) {
        if let Some(v) = self.name {
            item.name = v;
        }
        if let Some(v) = self.manufacturer {
            item.manufacturer = v;
        }
        if let Some(v) = self.model {
            item.model = Some(v);
        }
        if let Some(v) = self.quantity {
            item.quantity = v;
        }
        if let Some(v) = self.specifications {
            item.specifications = Some(v);
        }
        if let Some(v) = self.installation_url {
            item.installation_url = Some(v);
        }
    }
}

/// Snapshot of a project's equipment list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BillOfMaterials {
    pub id: Uuid,
    pub items: Vec<EquipmentItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_cost: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Only the cost is editable; items always come from regeneration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillOfMaterialsPatch {
    #[serde(default)]
    pub total_cost: Option<Decimal>,
}

/// Project aggregate
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub desired_outcome: String,
    pub strategy: StrategyType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan: Option<ProjectPlan>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equipment: Option<Vec<EquipmentItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bill_of_materials: Option<BillOfMaterials>,
}

/// Request DTO for creating a project
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub desired_outcome: String,
    pub strategy: StrategyType,
}

/// Request DTO for updating a project
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub desired_outcome: Option<String>,
    #[serde(default)]
    pub strategy: Option<StrategyType>,
}

impl ProjectPatch {
    pub fn apply(self, project: &mut Project) {
        if let Some(v) = self.title {
            project.title = v;
        }
        if let Some(v) = self.description {
            project.description = v;
        }
        if let Some(v) = self.desired_outcome {
            project.desired_outcome = v;
        }
        if let Some(v) = self.strategy {
            project.strategy = v;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_plan_deserializes_from_generator_json() {
        let json = r#"{
            "title": "Roof Retrofit",
            "description": "Replace the roof",
            "strategy": "sixSigma",
            "overview": "Overview",
            "keyMilestones": [
                {"title": "Kickoff", "description": "Start", "estimatedDuration": "1 week"}
            ],
            "risks": [
                {"description": "Rain", "mitigation": "Tarps", "impact": "high", "probability": "low"}
            ],
            "standardOperatingProcedures": [{"title": "Safety", "steps": ["Harness"]}]
        }"#;

        let plan: ProjectPlan = serde_json::from_str(json).unwrap();

        assert_eq!(plan.id, None);
        assert_eq!(plan.strategy, StrategyType::SixSigma);
        assert_eq!(plan.key_milestones[0].estimated_duration, "1 week");
        assert_eq!(plan.risks[0].impact, Level::High);
        assert!(plan.objectives.is_empty());
    }

    #[test]
    fn test_project_serializes_camel_case_and_skips_absent_children() {
        let now = Utc::now();
        let project = Project {
            id: Uuid::new_v4(),
            title: "Roof Retrofit".to_string(),
            description: String::new(),
            desired_outcome: "Dry attic".to_string(),
            strategy: StrategyType::Lean,
            created_at: now,
            updated_at: now,
            plan: None,
            attachments: vec![],
            equipment: None,
            bill_of_materials: None,
        };

        let value = serde_json::to_value(&project).unwrap();

        assert_eq!(value["desiredOutcome"], "Dry attic");
        assert_eq!(value["strategy"], "lean");
        assert!(value.get("equipment").is_none());
        assert!(value.get("billOfMaterials").is_none());
    }

    #[test]
    fn test_equipment_patch_keeps_unset_fields() {
        let mut item = EquipmentItem {
            id: Uuid::new_v4(),
            name: "Inverter".to_string(),
            manufacturer: "SMA".to_string(),
            model: Some("SB-7.7".to_string()),
            quantity: 1,
            specifications: None,
            installation_url: None,
        };

        EquipmentPatch {
            quantity: Some(2),
            ..Default::default()
        }
        .apply(&mut item);

        assert_eq!(item.quantity, 2);
        assert_eq!(item.manufacturer, "SMA");
        assert_eq!(item.model.as_deref(), Some("SB-7.7"));
    }
}
