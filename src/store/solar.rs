//! Solar installation project store

use chrono::Utc;
use std::collections::HashSet;
use uuid::Uuid;

use super::{position_of, ChildKind, StoreError, StoreResult};
use crate::domain::{
    DailyUpdate, DailyUpdatePatch, DocumentPatch, NewDailyUpdate, NewDocument, NewPlanSetImage,
    NewSolarProject, NewSolarTask, PlanSetImage, PlanSetImagePatch, ProjectDocument,
    SolarProject, SolarProjectPatch, SolarTask, SolarTaskPatch, SolarTaskStatus, TaskPosition,
};

#[derive(Debug, Default)]
pub struct SolarStore {
    projects: Vec<SolarProject>,
    current: Option<Uuid>,
}

fn check_position(position: Option<&TaskPosition>) -> StoreResult<()> {
    match position {
        Some(p) if !p.is_normalized() => Err(StoreError::Invalid(
            "task position must be within 0.0..=1.0".to_string(),
        )),
        _ => Ok(()),
    }
}

fn check_hours(hours: Option<f64>) -> StoreResult<()> {
    match hours {
        Some(h) if !h.is_finite() || h < 0.0 => Err(StoreError::Invalid(
            "hours worked must be a non-negative number".to_string(),
        )),
        _ => Ok(()),
    }
}

fn check_system_size(size: Option<f64>) -> StoreResult<()> {
    match size {
        Some(s) if !s.is_finite() || s < 0.0 => Err(StoreError::Invalid(
            "systemSize must be a non-negative number".to_string(),
        )),
        _ => Ok(()),
    }
}

/// Checks a whole collection before it is swapped in: ids are unique across
/// projects and their children, and every child passes the same checks as
/// the single-item write paths.
fn check_collection(projects: &[SolarProject]) -> StoreResult<()> {
    let mut seen = HashSet::new();
    let mut unique = |id: Uuid| {
        if seen.insert(id) {
            Ok(())
        } else {
            Err(StoreError::Invalid(format!("duplicate id {}", id)))
        }
    };

    for project in projects {
        unique(project.id)?;
        check_system_size(Some(project.system_size))?;
        for task in &project.tasks {
            unique(task.id)?;
            check_position(task.position.as_ref())?;
        }
        for image in &project.plan_set_images {
            unique(image.id)?;
        }
        for document in &project.documents {
            unique(document.id)?;
        }
        for update in &project.daily_updates {
            unique(update.id)?;
            check_hours(Some(update.hours_worked))?;
        }
    }
    Ok(())
}

impl SolarStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_projects(projects: Vec<SolarProject>) -> Self {
        Self {
            projects,
            current: None,
        }
    }

    pub fn list(&self) -> &[SolarProject] {
        &self.projects
    }

    pub fn get(&self, id: Uuid) -> Option<&SolarProject> {
        self.projects.iter().find(|p| p.id == id)
    }

    fn project_mut(&mut self, id: Uuid) -> StoreResult<&mut SolarProject> {
        self.projects
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(StoreError::ProjectNotFound(id))
    }

    // =========================================================================
    // Projects
    // =========================================================================

    /// Replaces the whole collection. The current project stays selected only
    /// if its id survives the replacement. A rejected collection leaves the
    /// store as it was.
    pub fn replace_all(&mut self, projects: Vec<SolarProject>) -> StoreResult<()> {
        check_collection(&projects)?;

        tracing::debug!(count = projects.len(), "Solar projects replaced");
        self.projects = projects;
        Ok(())
    }

    pub fn set_current_project(&mut self, id: Uuid) -> Option<&SolarProject> {
        self.current = self.get(id).map(|p| p.id);
        self.current_project()
    }

    pub fn current_project(&self) -> Option<&SolarProject> {
        self.current.and_then(|id| self.get(id))
    }

    pub fn add_project(&mut self, new: NewSolarProject) -> StoreResult<SolarProject> {
        if new.title.trim().is_empty() {
            return Err(StoreError::Invalid("title must not be empty".to_string()));
        }
        check_system_size(Some(new.system_size))?;

        let now = Utc::now();
        let project = SolarProject {
            id: Uuid::new_v4(),
            title: new.title,
            description: new.description,
            kind: new.kind,
            system_size: new.system_size,
            start_date: new.start_date,
            estimated_completion: new.estimated_completion,
            status: new.status,
            client: new.client,
            tasks: Vec::new(),
            plan_set_images: Vec::new(),
            daily_updates: Vec::new(),
            documents: Vec::new(),
            created_at: now,
            updated_at: now,
        };

        tracing::debug!(project_id = %project.id, title = %project.title, "Solar project added");
        self.projects.push(project.clone());
        Ok(project)
    }

    pub fn update_project(
        &mut self,
        id: Uuid,
        patch: SolarProjectPatch,
    ) -> StoreResult<SolarProject> {
        check_system_size(patch.system_size)?;

        let project = self.project_mut(id)?;
        patch.apply(project);
        project.updated_at = Utc::now();

        Ok(project.clone())
    }

    pub fn delete_project(&mut self, id: Uuid) -> StoreResult<SolarProject> {
        let index = self
            .projects
            .iter()
            .position(|p| p.id == id)
            .ok_or(StoreError::ProjectNotFound(id))?;
        let removed = self.projects.remove(index);

        if self.current == Some(id) {
            self.current = None;
        }

        tracing::debug!(project_id = %id, "Solar project deleted");
        Ok(removed)
    }

    // =========================================================================
    // Tasks
    // =========================================================================

    pub fn add_task(&mut self, id: Uuid, new: NewSolarTask) -> StoreResult<SolarTask> {
        check_position(new.position.as_ref())?;

        let project = self.project_mut(id)?;
        let now = Utc::now();
        let task = SolarTask {
            id: Uuid::new_v4(),
            title: new.title,
            description: new.description,
            section: new.section,
            status: new.status,
            position: new.position,
            created_at: now,
            updated_at: now,
        };

        project.tasks.push(task.clone());
        project.updated_at = now;

        tracing::debug!(project_id = %id, task_id = %task.id, section = ?task.section, "Task added");
        Ok(task)
    }

    pub fn update_task(
        &mut self,
        id: Uuid,
        task_id: Uuid,
        patch: SolarTaskPatch,
    ) -> StoreResult<SolarTask> {
        check_position(patch.position.as_ref())?;

        let project = self.project_mut(id)?;
        let index = position_of(&project.tasks, ChildKind::Task, task_id, |t| t.id)?;

        let now = Utc::now();
        let task = &mut project.tasks[index];
        patch.apply(task);
        task.updated_at = now;
        let task = task.clone();
        project.updated_at = now;

        Ok(task)
    }

    pub fn delete_task(&mut self, id: Uuid, task_id: Uuid) -> StoreResult<SolarTask> {
        let project = self.project_mut(id)?;
        let index = position_of(&project.tasks, ChildKind::Task, task_id, |t| t.id)?;

        let removed = project.tasks.remove(index);
        project.updated_at = Utc::now();

        Ok(removed)
    }

    // =========================================================================
    // Plan set images
    // =========================================================================

    pub fn add_plan_set_image(
        &mut self,
        id: Uuid,
        new: NewPlanSetImage,
    ) -> StoreResult<PlanSetImage> {
        let project = self.project_mut(id)?;
        let now = Utc::now();
        let image = PlanSetImage {
            id: Uuid::new_v4(),
            url: new.url,
            name: new.name,
            upload_date: now,
            kind: new.kind,
            description: new.description,
        };

        project.plan_set_images.push(image.clone());
        project.updated_at = now;

        Ok(image)
    }

    pub fn update_plan_set_image(
        &mut self,
        id: Uuid,
        image_id: Uuid,
        patch: PlanSetImagePatch,
    ) -> StoreResult<PlanSetImage> {
        let project = self.project_mut(id)?;
        let index = position_of(
            &project.plan_set_images,
            ChildKind::PlanSetImage,
            image_id,
            |i| i.id,
        )?;

        patch.apply(&mut project.plan_set_images[index]);
        let image = project.plan_set_images[index].clone();
        project.updated_at = Utc::now();

        Ok(image)
    }

    pub fn delete_plan_set_image(&mut self, id: Uuid, image_id: Uuid) -> StoreResult<PlanSetImage> {
        let project = self.project_mut(id)?;
        let index = position_of(
            &project.plan_set_images,
            ChildKind::PlanSetImage,
            image_id,
            |i| i.id,
        )?;

        let removed = project.plan_set_images.remove(index);
        project.updated_at = Utc::now();

        Ok(removed)
    }

    // =========================================================================
    // Documents
    // =========================================================================

    pub fn add_document(&mut self, id: Uuid, new: NewDocument) -> StoreResult<ProjectDocument> {
        let project = self.project_mut(id)?;
        let now = Utc::now();
        let document = ProjectDocument {
            id: Uuid::new_v4(),
            url: new.url,
            name: new.name,
            upload_date: now,
            kind: new.kind,
            size: new.size,
            description: new.description,
            category: new.category,
        };

        project.documents.push(document.clone());
        project.updated_at = now;

        Ok(document)
    }

    pub fn update_document(
        &mut self,
        id: Uuid,
        document_id: Uuid,
        patch: DocumentPatch,
    ) -> StoreResult<ProjectDocument> {
        let project = self.project_mut(id)?;
        let index = position_of(&project.documents, ChildKind::Document, document_id, |d| d.id)?;

        patch.apply(&mut project.documents[index]);
        let document = project.documents[index].clone();
        project.updated_at = Utc::now();

        Ok(document)
    }

    pub fn delete_document(&mut self, id: Uuid, document_id: Uuid) -> StoreResult<ProjectDocument> {
        let project = self.project_mut(id)?;
        let index = position_of(&project.documents, ChildKind::Document, document_id, |d| d.id)?;

        let removed = project.documents.remove(index);
        project.updated_at = Utc::now();

        Ok(removed)
    }

    // =========================================================================
    // Daily updates
    // =========================================================================

    /// Records a daily update and completes every listed task in one step.
    ///
    /// Listed ids that match no task of the project are kept on the update
    /// but otherwise ignored.
    pub fn add_daily_update(&mut self, id: Uuid, new: NewDailyUpdate) -> StoreResult<DailyUpdate> {
        check_hours(Some(new.hours_worked))?;

        let project = self.project_mut(id)?;
        let now = Utc::now();
        let update = DailyUpdate {
            id: Uuid::new_v4(),
            date: new.date,
            notes: new.notes,
            hours_worked: new.hours_worked,
            weather_conditions: new.weather_conditions,
            completed_tasks: new.completed_tasks,
            progress_image_url: new.progress_image_url,
            created_by: new.created_by,
            created_at: now,
            updated_at: now,
        };

        let mut completed = 0usize;
        for task in project
            .tasks
            .iter_mut()
            .filter(|t| update.completed_tasks.contains(&t.id))
        {
            task.status = SolarTaskStatus::Completed;
            task.updated_at = now;
            completed += 1;
        }

        project.daily_updates.push(update.clone());
        project.updated_at = now;

        tracing::debug!(
            project_id = %id,
            update_id = %update.id,
            tasks_completed = completed,
            "Daily update recorded"
        );
        Ok(update)
    }

    pub fn update_daily_update(
        &mut self,
        id: Uuid,
        update_id: Uuid,
        patch: DailyUpdatePatch,
    ) -> StoreResult<DailyUpdate> {
        check_hours(patch.hours_worked)?;

        let project = self.project_mut(id)?;
        let index = position_of(
            &project.daily_updates,
            ChildKind::DailyUpdate,
            update_id,
            |u| u.id,
        )?;

        let now = Utc::now();
        let update = &mut project.daily_updates[index];
        patch.apply(update);
        update.updated_at = now;
        let update = update.clone();
        project.updated_at = now;

        Ok(update)
    }

    pub fn delete_daily_update(&mut self, id: Uuid, update_id: Uuid) -> StoreResult<DailyUpdate> {
        let project = self.project_mut(id)?;
        let index = position_of(
            &project.daily_updates,
            ChildKind::DailyUpdate,
            update_id,
            |u| u.id,
        )?;

        let removed = project.daily_updates.remove(index);
        project.updated_at = Utc::now();

        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        Address, ClientInfo, DocumentCategory, DocumentType, InstallationSection,
        PlanSetImageType, SolarProjectStatus, SolarProjectType,
    };
    use pretty_assertions::assert_eq;

    fn new_project() -> NewSolarProject {
        let now = Utc::now();
        NewSolarProject {
            title: "Garage array".to_string(),
            description: "6 kW on the garage".to_string(),
            kind: SolarProjectType::Residential,
            system_size: 6.0,
            start_date: now,
            estimated_completion: now,
            status: SolarProjectStatus::Planning,
            client: ClientInfo {
                name: "Rivera Household".to_string(),
                email: "rivera@example.com".to_string(),
                phone: "(555) 010-2000".to_string(),
                address: Address {
                    street: "9 Elm St".to_string(),
                    city: "Fresno".to_string(),
                    state: "CA".to_string(),
                    zip_code: "93650".to_string(),
                },
            },
        }
    }

    fn task(title: &str, section: InstallationSection, status: SolarTaskStatus) -> NewSolarTask {
        NewSolarTask {
            title: title.to_string(),
            description: None,
            section,
            status,
            position: None,
        }
    }

    fn daily_update(completed: Vec<Uuid>) -> NewDailyUpdate {
        NewDailyUpdate {
            date: Utc::now(),
            notes: "Rails up on the south face".to_string(),
            hours_worked: 7.5,
            weather_conditions: Some("Sunny".to_string()),
            completed_tasks: completed,
            progress_image_url: None,
            created_by: "crew-lead".to_string(),
        }
    }

    #[test]
    fn test_add_project_initializes_collections() {
        let mut store = SolarStore::new();
        let project = store.add_project(new_project()).unwrap();

        assert!(project.tasks.is_empty());
        assert!(project.plan_set_images.is_empty());
        assert!(project.documents.is_empty());
        assert!(project.daily_updates.is_empty());
        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn test_current_project_tracks_updates_and_deletes() {
        let mut store = SolarStore::new();
        let id = store.add_project(new_project()).unwrap().id;

        store.set_current_project(id);
        store
            .add_task(
                id,
                task("Mount rails", InstallationSection::RailInstallation, SolarTaskStatus::NotStarted),
            )
            .unwrap();
        assert_eq!(store.current_project().unwrap().tasks.len(), 1);

        store.delete_project(id).unwrap();
        assert!(store.current_project().is_none());
        assert!(store.set_current_project(id).is_none());
    }

    #[test]
    fn test_replace_all_drops_stale_current() {
        let mut store = SolarStore::new();
        let id = store.add_project(new_project()).unwrap().id;
        store.set_current_project(id);

        store.replace_all(vec![]).unwrap();

        assert!(store.current_project().is_none());
        assert!(store.list().is_empty());
    }

    #[test]
    fn test_replace_all_rejects_duplicate_project_ids() {
        let mut store = SolarStore::new();
        let project = store.add_project(new_project()).unwrap();

        let err = store
            .replace_all(vec![project.clone(), project.clone()])
            .unwrap_err();

        assert!(matches!(err, StoreError::Invalid(_)));
        assert_eq!(store.list(), &[project.clone()]);

        store.delete_project(project.id).unwrap();
        assert!(store.get(project.id).is_none());
    }

    #[test]
    fn test_replace_all_rejects_invalid_children() {
        let mut store = SolarStore::new();
        let id = store.add_project(new_project()).unwrap().id;
        let t1 = store
            .add_task(id, task("t1", InstallationSection::RailInstallation, SolarTaskStatus::NotStarted))
            .unwrap();
        store.add_daily_update(id, daily_update(vec![])).unwrap();
        let saved = store.get(id).unwrap().clone();

        let mut duplicate_task = saved.clone();
        duplicate_task.tasks.push(t1.clone());
        assert!(store.replace_all(vec![duplicate_task]).is_err());

        let mut bad_position = saved.clone();
        bad_position.tasks[0].position = Some(TaskPosition { x: -0.1, y: 0.5 });
        assert!(store.replace_all(vec![bad_position]).is_err());

        let mut bad_hours = saved.clone();
        bad_hours.daily_updates[0].hours_worked = -3.0;
        assert!(store.replace_all(vec![bad_hours]).is_err());

        let mut bad_size = saved.clone();
        bad_size.system_size = f64::NAN;
        assert!(store.replace_all(vec![bad_size]).is_err());

        assert_eq!(store.list(), &[saved.clone()]);

        let mut renamed = saved;
        renamed.title = "Restored".to_string();
        store.replace_all(vec![renamed]).unwrap();
        assert_eq!(store.get(id).unwrap().title, "Restored");
    }

    #[test]
    fn test_system_size_must_be_non_negative() {
        let mut store = SolarStore::new();

        let mut negative = new_project();
        negative.system_size = -1.0;
        assert!(matches!(store.add_project(negative), Err(StoreError::Invalid(_))));
        assert!(store.list().is_empty());

        let project = store.add_project(new_project()).unwrap();
        let err = store
            .update_project(
                project.id,
                SolarProjectPatch {
                    system_size: Some(-4.5),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, StoreError::Invalid(_)));
        assert_eq!(store.get(project.id).unwrap().system_size, 6.0);
    }

    #[test]
    fn test_generated_child_ids_are_unique() {
        let mut store = SolarStore::new();
        let id = store.add_project(new_project()).unwrap().id;

        let mut ids = HashSet::new();
        ids.insert(id);
        for i in 0..20 {
            ids.insert(
                store
                    .add_task(
                        id,
                        task(&format!("t{}", i), InstallationSection::PanelInstallation, SolarTaskStatus::NotStarted),
                    )
                    .unwrap()
                    .id,
            );
            ids.insert(
                store
                    .add_plan_set_image(
                        id,
                        NewPlanSetImage {
                            url: format!("https://files.example.com/{}.png", i),
                            name: format!("{}.png", i),
                            kind: PlanSetImageType::Diagram,
                            description: None,
                        },
                    )
                    .unwrap()
                    .id,
            );
            ids.insert(
                store
                    .add_document(
                        id,
                        NewDocument {
                            url: format!("https://files.example.com/{}.pdf", i),
                            name: format!("{}.pdf", i),
                            kind: DocumentType::Pdf,
                            size: 512,
                            description: None,
                            category: None,
                        },
                    )
                    .unwrap()
                    .id,
            );
            ids.insert(store.add_daily_update(id, daily_update(vec![])).unwrap().id);
        }

        assert_eq!(ids.len(), 81);
    }

    #[test]
    fn test_daily_update_completes_listed_tasks() {
        let mut store = SolarStore::new();
        let id = store.add_project(new_project()).unwrap().id;
        let t1 = store
            .add_task(id, task("t1", InstallationSection::RailInstallation, SolarTaskStatus::NotStarted))
            .unwrap();
        let t3 = store
            .add_task(id, task("t3", InstallationSection::WireManagement, SolarTaskStatus::InProgress))
            .unwrap();
        let t2_unknown = Uuid::new_v4();

        let update = store
            .add_daily_update(id, daily_update(vec![t1.id, t2_unknown]))
            .unwrap();

        let project = store.get(id).unwrap();
        let stored_t1 = project.tasks.iter().find(|t| t.id == t1.id).unwrap();
        let stored_t3 = project.tasks.iter().find(|t| t.id == t3.id).unwrap();

        assert_eq!(stored_t1.status, SolarTaskStatus::Completed);
        assert_eq!(stored_t1.updated_at, update.created_at);
        assert_eq!(stored_t3, &t3);
        assert_eq!(project.daily_updates, vec![update.clone()]);
        assert_eq!(update.completed_tasks, vec![t1.id, t2_unknown]);
    }

    #[test]
    fn test_daily_update_rejects_negative_hours() {
        let mut store = SolarStore::new();
        let id = store.add_project(new_project()).unwrap().id;
        let t1 = store
            .add_task(id, task("t1", InstallationSection::RailInstallation, SolarTaskStatus::NotStarted))
            .unwrap();

        let mut new = daily_update(vec![t1.id]);
        new.hours_worked = -1.0;

        assert!(matches!(
            store.add_daily_update(id, new),
            Err(StoreError::Invalid(_))
        ));
        let project = store.get(id).unwrap();
        assert!(project.daily_updates.is_empty());
        assert_eq!(project.tasks[0].status, SolarTaskStatus::NotStarted);
    }

    #[test]
    fn test_daily_update_on_unknown_project() {
        let mut store = SolarStore::new();
        let missing = Uuid::new_v4();

        assert_eq!(
            store.add_daily_update(missing, daily_update(vec![])),
            Err(StoreError::ProjectNotFound(missing))
        );
    }

    #[test]
    fn test_editing_daily_update_does_not_complete_tasks() {
        let mut store = SolarStore::new();
        let id = store.add_project(new_project()).unwrap().id;
        let t1 = store
            .add_task(id, task("t1", InstallationSection::PanelInstallation, SolarTaskStatus::NotStarted))
            .unwrap();
        let update = store.add_daily_update(id, daily_update(vec![])).unwrap();

        let edited = store
            .update_daily_update(
                id,
                update.id,
                DailyUpdatePatch {
                    completed_tasks: Some(vec![t1.id]),
                    notes: Some("Corrected notes".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(edited.notes, "Corrected notes");
        assert_eq!(edited.created_by, "crew-lead");
        assert_eq!(store.get(id).unwrap().tasks[0].status, SolarTaskStatus::NotStarted);

        store.delete_daily_update(id, update.id).unwrap();
        assert!(store.get(id).unwrap().daily_updates.is_empty());
    }

    #[test]
    fn test_task_update_stamps_task_and_validates_position() {
        let mut store = SolarStore::new();
        let id = store.add_project(new_project()).unwrap().id;
        let created = store
            .add_task(id, task("Run conduit", InstallationSection::WireManagement, SolarTaskStatus::NotStarted))
            .unwrap();

        let err = store
            .update_task(
                id,
                created.id,
                SolarTaskPatch {
                    position: Some(TaskPosition { x: 1.5, y: 0.2 }),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, StoreError::Invalid(_)));

        let updated = store
            .update_task(
                id,
                created.id,
                SolarTaskPatch {
                    status: Some(SolarTaskStatus::InProgress),
                    position: Some(TaskPosition { x: 0.25, y: 0.75 }),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.status, SolarTaskStatus::InProgress);
        assert_eq!(updated.title, "Run conduit");
        assert!(updated.updated_at >= created.updated_at);

        store.delete_task(id, created.id).unwrap();
        assert!(store
            .delete_task(id, created.id)
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_plan_set_image_and_document_crud() {
        let mut store = SolarStore::new();
        let id = store.add_project(new_project()).unwrap().id;

        let image = store
            .add_plan_set_image(
                id,
                NewPlanSetImage {
                    url: "https://files.example.com/roof.png".to_string(),
                    name: "roof.png".to_string(),
                    kind: PlanSetImageType::Blueprint,
                    description: None,
                },
            )
            .unwrap();
        let image = store
            .update_plan_set_image(
                id,
                image.id,
                PlanSetImagePatch {
                    description: Some("South elevation".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(image.description.as_deref(), Some("South elevation"));
        assert_eq!(image.kind, PlanSetImageType::Blueprint);

        let document = store
            .add_document(
                id,
                NewDocument {
                    url: "https://files.example.com/permit.pdf".to_string(),
                    name: "permit.pdf".to_string(),
                    kind: DocumentType::Pdf,
                    size: 1024,
                    description: None,
                    category: None,
                },
            )
            .unwrap();
        let document = store
            .update_document(
                id,
                document.id,
                DocumentPatch {
                    category: Some(DocumentCategory::Permit),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(document.category, Some(DocumentCategory::Permit));
        assert_eq!(document.size, 1024);

        store.delete_plan_set_image(id, image.id).unwrap();
        store.delete_document(id, document.id).unwrap();
        let project = store.get(id).unwrap();
        assert!(project.plan_set_images.is_empty());
        assert!(project.documents.is_empty());
    }
}
