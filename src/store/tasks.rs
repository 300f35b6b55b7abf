//! Task board store

use chrono::Utc;
use std::collections::HashSet;
use uuid::Uuid;

use super::{position_of, ChildKind, StoreError, StoreResult};
use crate::domain::{NewTask, Task, TaskPatch};

#[derive(Debug, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
    active: Option<Uuid>,
}

fn check_title(title: &str) -> StoreResult<()> {
    if title.trim().is_empty() {
        return Err(StoreError::Invalid("title must not be empty".to_string()));
    }
    Ok(())
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list(&self) -> &[Task] {
        &self.tasks
    }

    pub fn for_project(&self, project_id: Uuid) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(move |t| t.project_id == project_id)
    }

    pub fn get(&self, id: Uuid) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Replaces every task. The active task survives only if its id does.
    pub fn replace_all(&mut self, tasks: Vec<Task>) -> StoreResult<()> {
        let mut seen = HashSet::new();
        for task in &tasks {
            check_title(&task.title)?;
            if !seen.insert(task.id) {
                return Err(StoreError::Invalid(format!("duplicate id {}", task.id)));
            }
        }

        tracing::debug!(count = tasks.len(), "Tasks replaced");
        self.tasks = tasks;
        Ok(())
    }

    pub fn add_task(&mut self, new: NewTask) -> StoreResult<Task> {
        check_title(&new.title)?;

        let now = Utc::now();
        let task = Task {
            id: Uuid::new_v4(),
            title: new.title,
            description: new.description,
            status: new.status,
            priority: new.priority,
            due_date: new.due_date,
            project_id: new.project_id,
            assignee_id: new.assignee_id,
            created_at: now,
            updated_at: now,
        };

        tracing::debug!(task_id = %task.id, project_id = %task.project_id, "Task added");
        self.tasks.push(task.clone());
        Ok(task)
    }

    pub fn update_task(&mut self, id: Uuid, patch: TaskPatch) -> StoreResult<Task> {
        if let Some(title) = patch.title.as_deref() {
            check_title(title)?;
        }

        let index = position_of(&self.tasks, ChildKind::Task, id, |t| t.id)?;
        let task = &mut self.tasks[index];
        patch.apply(task);
        task.updated_at = Utc::now();

        Ok(task.clone())
    }

    pub fn remove_task(&mut self, id: Uuid) -> StoreResult<Task> {
        let index = position_of(&self.tasks, ChildKind::Task, id, |t| t.id)?;
        let removed = self.tasks.remove(index);

        if self.active == Some(id) {
            self.active = None;
        }

        tracing::debug!(task_id = %id, "Task removed");
        Ok(removed)
    }

    /// Marks the matching task active, or clears the marker when none matches.
    pub fn set_active_task(&mut self, id: Uuid) -> Option<&Task> {
        self.active = self.get(id).map(|t| t.id);
        self.active_task()
    }

    pub fn active_task(&self) -> Option<&Task> {
        self.active.and_then(|id| self.get(id))
    }
}
