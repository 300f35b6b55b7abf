//! In-memory domain state
//!
//! Each store owns a collection of aggregates plus the id of the aggregate
//! currently selected by the user. Every mutation takes `&mut self`, so one
//! call is one atomic state transition, and a call that fails leaves the
//! store exactly as it was.

pub mod projects;
pub mod seed;
pub mod solar;
pub mod tasks;
pub mod views;

pub use projects::ProjectStore;
pub use solar::SolarStore;
pub use tasks::TaskStore;

use thiserror::Error;
use uuid::Uuid;

/// Kind of child entity, used in not-found errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildKind {
    Attachment,
    Equipment,
    Task,
    PlanSetImage,
    Document,
    DailyUpdate,
}

impl std::fmt::Display for ChildKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Attachment => "Attachment",
            Self::Equipment => "Equipment item",
            Self::Task => "Task",
            Self::PlanSetImage => "Plan set image",
            Self::Document => "Document",
            Self::DailyUpdate => "Daily update",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    #[error("Project {0} not found")]
    ProjectNotFound(Uuid),

    #[error("{kind} {id} not found")]
    ChildNotFound { kind: ChildKind, id: Uuid },

    #[error("Project has no equipment to build a bill of materials from")]
    NoEquipment,

    #[error("Project has no plan")]
    NoPlan,

    #[error("Project has no bill of materials")]
    NoBillOfMaterials,

    #[error("Invalid input: {0}")]
    Invalid(String),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ProjectNotFound(_) | Self::ChildNotFound { .. })
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Finds the index of a child by id, or reports it missing.
fn position_of<T>(
    items: &[T],
    kind: ChildKind,
    id: Uuid,
    id_of: impl Fn(&T) -> Uuid,
) -> StoreResult<usize> {
    items
        .iter()
        .position(|item| id_of(item) == id)
        .ok_or(StoreError::ChildNotFound { kind, id })
}
