//! General project store
//!
//! Holds the project aggregates and their attachments, equipment and bill of
//! materials. The selected project is tracked by id and resolved on read, so
//! it always reflects the latest mutation of that project.

use chrono::Utc;
use std::collections::HashSet;
use uuid::Uuid;

use super::{position_of, ChildKind, StoreError, StoreResult};
use crate::domain::{
    Attachment, BillOfMaterials, BillOfMaterialsPatch, EquipmentItem, EquipmentPatch,
    NewAttachment, NewEquipment, NewProject, PlanPatch, Project, ProjectPatch, ProjectPlan,
};

#[derive(Debug, Default)]
pub struct ProjectStore {
    projects: Vec<Project>,
    selected: Option<Uuid>,
}

impl ProjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_projects(projects: Vec<Project>) -> Self {
        Self {
            projects,
            selected: None,
        }
    }

    pub fn list(&self) -> &[Project] {
        &self.projects
    }

    pub fn get(&self, id: Uuid) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    fn project_mut(&mut self, id: Uuid) -> StoreResult<&mut Project> {
        self.projects
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(StoreError::ProjectNotFound(id))
    }

    // =========================================================================
    // Projects
    // =========================================================================

    pub fn add_project(&mut self, new: NewProject) -> Project {
        let now = Utc::now();
        let project = Project {
            id: Uuid::new_v4(),
            title: new.title,
            description: new.description,
            desired_outcome: new.desired_outcome,
            strategy: new.strategy,
            created_at: now,
            updated_at: now,
            plan: None,
            attachments: Vec::new(),
            equipment: None,
            bill_of_materials: None,
        };

        tracing::debug!(project_id = %project.id, title = %project.title, "Project added");
        self.projects.push(project.clone());
        project
    }

    pub fn update_project(&mut self, id: Uuid, patch: ProjectPatch) -> StoreResult<Project> {
        let project = self.project_mut(id)?;
        patch.apply(project);
        project.updated_at = Utc::now();

        tracing::debug!(project_id = %id, "Project updated");
        Ok(project.clone())
    }

    pub fn delete_project(&mut self, id: Uuid) -> StoreResult<Project> {
        let index = self
            .projects
            .iter()
            .position(|p| p.id == id)
            .ok_or(StoreError::ProjectNotFound(id))?;
        let removed = self.projects.remove(index);

        if self.selected == Some(id) {
            self.selected = None;
        }

        tracing::debug!(project_id = %id, "Project deleted");
        Ok(removed)
    }

    /// Selects the matching project, or clears the selection when none matches.
    pub fn select_project(&mut self, id: Uuid) -> Option<&Project> {
        self.selected = self.get(id).map(|p| p.id);
        self.selected_project()
    }

    pub fn selected_project(&self) -> Option<&Project> {
        self.selected.and_then(|id| self.get(id))
    }

    // =========================================================================
    // Plan
    // =========================================================================

    /// Attaches a plan under a fresh id, replacing any previous plan.
    pub fn set_plan(&mut self, id: Uuid, mut plan: ProjectPlan) -> StoreResult<ProjectPlan> {
        let project = self.project_mut(id)?;
        plan.id = Some(Uuid::new_v4());
        project.plan = Some(plan.clone());
        project.updated_at = Utc::now();

        tracing::debug!(project_id = %id, "Plan attached");
        Ok(plan)
    }

    pub fn update_plan(&mut self, id: Uuid, patch: PlanPatch) -> StoreResult<ProjectPlan> {
        let project = self.project_mut(id)?;
        let plan = project.plan.as_mut().ok_or(StoreError::NoPlan)?;
        patch.apply(plan);
        let plan = plan.clone();
        project.updated_at = Utc::now();

        Ok(plan)
    }

    // =========================================================================
    // Attachments
    // =========================================================================

    pub fn add_attachment(&mut self, id: Uuid, file: NewAttachment) -> StoreResult<Attachment> {
        let project = self.project_mut(id)?;
        let now = Utc::now();
        let attachment = Attachment {
            id: Uuid::new_v4(),
            name: file.name,
            url: file.url,
            kind: file.kind,
            size: file.size,
            created_at: now,
            analyzed: false,
            extracted_equipment: None,
        };

        project.attachments.push(attachment.clone());
        project.updated_at = now;

        tracing::debug!(project_id = %id, attachment_id = %attachment.id, "Attachment added");
        Ok(attachment)
    }

    pub fn delete_attachment(&mut self, id: Uuid, attachment_id: Uuid) -> StoreResult<Attachment> {
        let project = self.project_mut(id)?;
        let index = position_of(
            &project.attachments,
            ChildKind::Attachment,
            attachment_id,
            |a| a.id,
        )?;
        let removed = project.attachments.remove(index);
        project.updated_at = Utc::now();

        Ok(removed)
    }

    /// Flags an attachment as analyzed, storing what the analysis extracted.
    pub fn mark_attachment_analyzed(
        &mut self,
        id: Uuid,
        attachment_id: Uuid,
        extracted_equipment: Option<Vec<EquipmentItem>>,
    ) -> StoreResult<Attachment> {
        let project = self.project_mut(id)?;
        let index = position_of(
            &project.attachments,
            ChildKind::Attachment,
            attachment_id,
            |a| a.id,
        )?;

        let attachment = &mut project.attachments[index];
        attachment.analyzed = true;
        attachment.extracted_equipment = Some(extracted_equipment.unwrap_or_default());
        let attachment = attachment.clone();
        project.updated_at = Utc::now();

        tracing::debug!(project_id = %id, attachment_id = %attachment_id, "Attachment analyzed");
        Ok(attachment)
    }

    /// Records the result of analyzing an attachment.
    ///
    /// With `import`, the extracted items replace whatever an earlier analysis
    /// of the same attachment imported, and the bill of materials is rebuilt.
    /// Every item is checked before anything changes, so a rejected result
    /// leaves the project untouched.
    pub fn record_analysis(
        &mut self,
        id: Uuid,
        attachment_id: Uuid,
        extracted: Vec<EquipmentItem>,
        import: bool,
    ) -> StoreResult<Attachment> {
        if extracted.iter().any(|item| item.quantity == 0) {
            return Err(StoreError::Invalid(
                "extracted equipment quantity must be positive".to_string(),
            ));
        }

        let project = self.project_mut(id)?;
        let index = position_of(
            &project.attachments,
            ChildKind::Attachment,
            attachment_id,
            |a| a.id,
        )?;

        let nothing_to_import = extracted.is_empty()
            && project.attachments[index]
                .extracted_equipment
                .as_ref()
                .map_or(true, Vec::is_empty);

        let recorded = if import && !nothing_to_import {
            let previous: HashSet<Uuid> = project.attachments[index]
                .extracted_equipment
                .iter()
                .flatten()
                .map(|item| item.id)
                .collect();

            let equipment = project.equipment.get_or_insert_with(Vec::new);
            let before = equipment.len();
            equipment.retain(|item| !previous.contains(&item.id));
            let replaced = before - equipment.len();

            let mut taken: HashSet<Uuid> = equipment.iter().map(|item| item.id).collect();
            let imported: Vec<EquipmentItem> = extracted
                .into_iter()
                .map(|mut item| {
                    if !taken.insert(item.id) {
                        item.id = Uuid::new_v4();
                        taken.insert(item.id);
                    }
                    item
                })
                .collect();
            equipment.extend(imported.iter().cloned());

            if !equipment.is_empty() && (replaced > 0 || !imported.is_empty()) {
                snapshot_bill_of_materials(project)?;
            }
            imported
        } else {
            extracted
        };

        let attachment = &mut project.attachments[index];
        attachment.analyzed = true;
        attachment.extracted_equipment = Some(recorded);
        let attachment = attachment.clone();
        project.updated_at = Utc::now();

        tracing::debug!(
            project_id = %id,
            attachment_id = %attachment_id,
            import,
            "Analysis recorded"
        );
        Ok(attachment)
    }

    // =========================================================================
    // Equipment
    // =========================================================================

    pub fn add_equipment(&mut self, id: Uuid, new: NewEquipment) -> StoreResult<EquipmentItem> {
        if new.quantity == 0 {
            return Err(StoreError::Invalid("quantity must be positive".to_string()));
        }

        let project = self.project_mut(id)?;
        let item = EquipmentItem {
            id: Uuid::new_v4(),
            name: new.name,
            manufacturer: new.manufacturer,
            model: new.model,
            quantity: new.quantity,
            specifications: new.specifications,
            installation_url: new.installation_url,
        };

        project
            .equipment
            .get_or_insert_with(Vec::new)
            .push(item.clone());
        project.updated_at = Utc::now();

        tracing::debug!(project_id = %id, equipment_id = %item.id, name = %item.name, "Equipment added");
        Ok(item)
    }

    pub fn update_equipment(
        &mut self,
        id: Uuid,
        equipment_id: Uuid,
        patch: EquipmentPatch,
    ) -> StoreResult<EquipmentItem> {
        if patch.quantity == Some(0) {
            return Err(StoreError::Invalid("quantity must be positive".to_string()));
        }

        let project = self.project_mut(id)?;
        let equipment = project.equipment.as_mut().ok_or(StoreError::ChildNotFound {
            kind: ChildKind::Equipment,
            id: equipment_id,
        })?;
        let index = position_of(equipment, ChildKind::Equipment, equipment_id, |e| e.id)?;

        patch.apply(&mut equipment[index]);
        let item = equipment[index].clone();
        project.updated_at = Utc::now();

        Ok(item)
    }

    pub fn delete_equipment(&mut self, id: Uuid, equipment_id: Uuid) -> StoreResult<EquipmentItem> {
        let project = self.project_mut(id)?;
        let equipment = project.equipment.as_mut().ok_or(StoreError::ChildNotFound {
            kind: ChildKind::Equipment,
            id: equipment_id,
        })?;
        let index = position_of(equipment, ChildKind::Equipment, equipment_id, |e| e.id)?;

        let removed = equipment.remove(index);
        project.updated_at = Utc::now();

        Ok(removed)
    }

    // =========================================================================
    // Bill of materials
    // =========================================================================

    /// Snapshots the current equipment list into a fresh bill of materials.
    ///
    /// Any previous snapshot is replaced, including its cost. A project with
    /// no equipment is left untouched.
    pub fn generate_bill_of_materials(&mut self, id: Uuid) -> StoreResult<BillOfMaterials> {
        let project = self.project_mut(id)?;
        let bom = snapshot_bill_of_materials(project)?;

        tracing::debug!(project_id = %id, bom_id = %bom.id, items = bom.items.len(), "Bill of materials generated");
        Ok(bom)
    }

    pub fn update_bill_of_materials(
        &mut self,
        id: Uuid,
        patch: BillOfMaterialsPatch,
    ) -> StoreResult<BillOfMaterials> {
        let project = self.project_mut(id)?;
        let bom = project
            .bill_of_materials
            .as_mut()
            .ok_or(StoreError::NoBillOfMaterials)?;

        let now = Utc::now();
        if let Some(cost) = patch.total_cost {
            bom.total_cost = Some(cost);
        }
        bom.updated_at = now;
        let bom = bom.clone();
        project.updated_at = now;

        Ok(bom)
    }
}

/// Replaces the project's bill of materials with a snapshot of its equipment.
fn snapshot_bill_of_materials(project: &mut Project) -> StoreResult<BillOfMaterials> {
    let items = match project.equipment.as_ref() {
        Some(items) if !items.is_empty() => items.clone(),
        _ => return Err(StoreError::NoEquipment),
    };

    let now = Utc::now();
    let bom = BillOfMaterials {
        id: Uuid::new_v4(),
        items,
        total_cost: None,
        created_at: now,
        updated_at: now,
    };

    project.bill_of_materials = Some(bom.clone());
    project.updated_at = now;
    Ok(bom)
}
