//! Solar installation project aggregate
//!
//! Installation work is tracked as tasks split across three phases, with plan
//! set images, documents and daily progress updates attached to the project.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum SolarProjectType {
    Residential,
    Commercial,
    Industrial,
    UtilityScale,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum SolarProjectStatus {
    Planning,
    InProgress,
    OnHold,
    Completed,
}

impl Default for SolarProjectStatus {
    fn default() -> Self {
        Self::Planning
    }
}

/// Installation phase a task belongs to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum InstallationSection {
    RailInstallation,
    WireManagement,
    PanelInstallation,
}

impl InstallationSection {
    pub const ALL: [InstallationSection; 3] = [
        Self::RailInstallation,
        Self::WireManagement,
        Self::PanelInstallation,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::RailInstallation => "Rail Installation",
            Self::WireManagement => "Wire Management",
            Self::PanelInstallation => "Panel Installation",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum SolarTaskStatus {
    NotStarted,
    InProgress,
    Completed,
}

impl Default for SolarTaskStatus {
    fn default() -> Self {
        Self::NotStarted
    }
}

/// Marker position on a plan set image, normalized to `0.0..=1.0`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TaskPosition {
    pub x: f64,
    pub y: f64,
}

impl TaskPosition {
    pub fn is_normalized(&self) -> bool {
        (0.0..=1.0).contains(&self.x) && (0.0..=1.0).contains(&self.y)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SolarTask {
    pub id: Uuid,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub section: InstallationSection,
    pub status: SolarTaskStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<TaskPosition>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewSolarTask {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub section: InstallationSection,
    #[serde(default)]
    pub status: SolarTaskStatus,
    #[serde(default)]
    pub position: Option<TaskPosition>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SolarTaskPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub section: Option<InstallationSection>,
    #[serde(default)]
    pub status: Option<SolarTaskStatus>,
    #[serde(default)]
    pub position: Option<TaskPosition>,
}

impl SolarTaskPatch {
    pub fn apply(self, task: &mut SolarTask) {
        if let Some(v) = self.title {
            task.title = v;
        }
        if let Some(v) = self.description {
            task.description = Some(v);
        }
        if let Some(v) = self.section {
            task.section = v;
        }
        if let Some(v) = self.status {
            task.status = v;
        }
        if let Some(v) = self.position {
            task.position = Some(v);
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PlanSetImageType {
    Blueprint,
    Diagram,
    Photo,
    Pdf,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlanSetImage {
    pub id: Uuid,
    pub url: String,
    pub name: String,
    pub upload_date: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: PlanSetImageType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewPlanSetImage {
    pub url: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: PlanSetImageType,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlanSetImagePatch {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<PlanSetImageType>,
    #[serde(default)]
    pub description: Option<String>,
}

impl PlanSetImagePatch {
    pub fn apply(self, image: &mut PlanSetImage) {
        if let Some(v) = self.url {
            image.url = v;
        }
        if let Some(v) = self.name {
            image.name = v;
        }
        if let Some(v) = self.kind {
            image.kind = v;
        }
        if let Some(v) = self.description {
            image.description = Some(v);
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    Pdf,
    Doc,
    Xls,
    Other,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DocumentCategory {
    Permit,
    Contract,
    Invoice,
    Report,
    Other,
}

/// Document filed against a solar project
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDocument {
    pub id: Uuid,
    pub url: String,
    pub name: String,
    pub upload_date: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: DocumentType,
    pub size: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<DocumentCategory>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewDocument {
    pub url: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: DocumentType,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<DocumentCategory>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DocumentPatch {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<DocumentType>,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<DocumentCategory>,
}

impl DocumentPatch {
    pub fn apply(self, document: &mut ProjectDocument) {
        if let Some(v) = self.url {
            document.url = v;
        }
        if let Some(v) = self.name {
            document.name = v;
        }
        if let Some(v) = self.kind {
            document.kind = v;
        }
        if let Some(v) = self.size {
            document.size = v;
        }
        if let Some(v) = self.description {
            document.description = Some(v);
        }
        if let Some(v) = self.category {
            document.category = Some(v);
        }
    }
}

/// Daily progress report; recording one completes the listed tasks
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DailyUpdate {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    pub notes: String,
    pub hours_worked: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather_conditions: Option<String>,
    #[serde(default)]
    pub completed_tasks: Vec<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress_image_url: Option<String>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDailyUpdate {
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub hours_worked: f64,
    #[serde(default)]
    pub weather_conditions: Option<String>,
    #[serde(default)]
    pub completed_tasks: Vec<Uuid>,
    #[serde(default)]
    pub progress_image_url: Option<String>,
    pub created_by: String,
}

/// Editing an update never touches task statuses; only recording one does.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyUpdatePatch {
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub hours_worked: Option<f64>,
    #[serde(default)]
    pub weather_conditions: Option<String>,
    #[serde(default)]
    pub completed_tasks: Option<Vec<Uuid>>,
    #[serde(default)]
    pub progress_image_url: Option<String>,
}

impl DailyUpdatePatch {
    pub fn apply(self, update: &mut DailyUpdate) {
        if let Some(v) = self.date {
            update.date = v;
        }
        if let Some(v) = self.notes {
            update.notes = v;
        }
        if let Some(v) = self.hours_worked {
            update.hours_worked = v;
        }
        if let Some(v) = self.weather_conditions {
            update.weather_conditions = Some(v);
        }
        if let Some(v) = self.completed_tasks {
            update.completed_tasks = v;
        }
        if let Some(v) = self.progress_image_url {
            update.progress_image_url = Some(v);
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClientInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: Address,
}

/// Solar project aggregate
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SolarProject {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: SolarProjectType,
    /// kW
    pub system_size: f64,
    pub start_date: DateTime<Utc>,
    pub estimated_completion: DateTime<Utc>,
    pub status: SolarProjectStatus,
    pub client: ClientInfo,
    #[serde(default)]
    pub tasks: Vec<SolarTask>,
    #[serde(default)]
    pub plan_set_images: Vec<PlanSetImage>,
    #[serde(default)]
    pub daily_updates: Vec<DailyUpdate>,
    #[serde(default)]
    pub documents: Vec<ProjectDocument>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSolarProject {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub kind: SolarProjectType,
    pub system_size: f64,
    pub start_date: DateTime<Utc>,
    pub estimated_completion: DateTime<Utc>,
    #[serde(default)]
    pub status: SolarProjectStatus,
    pub client: ClientInfo,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolarProjectPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<SolarProjectType>,
    #[serde(default)]
    pub system_size: Option<f64>,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub estimated_completion: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: Option<SolarProjectStatus>,
    #[serde(default)]
    pub client: Option<ClientInfo>,
}

impl SolarProjectPatch {
    pub fn apply(self, project: &mut SolarProject) {
        if let Some(v) = self.title {
            project.title = v;
        }
        if let Some(v) = self.description {
            project.description = v;
        }
        if let Some(v) = self.kind {
            project.kind = v;
        }
        if let Some(v) = self.system_size {
            project.system_size = v;
        }
        if let Some(v) = self.start_date {
            project.start_date = v;
        }
        if let Some(v) = self.estimated_completion {
            project.estimated_completion = v;
        }
        if let Some(v) = self.status {
            project.status = v;
        }
        if let Some(v) = self.client {
            project.client = v;
        }
    }
}
