use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::model::category::{Category, CategoryDraft, CategoryId};
use crate::model::task::{Task, TaskDraft, TaskId};

/// Full contents of a store. Both store implementations mutate one of these.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub categories: Vec<Category>,
}

impl Snapshot {
    pub fn new(tasks: Vec<Task>, categories: Vec<Category>) -> Self {
        Self { tasks, categories }
    }

    pub fn task(&self, id: TaskId) -> Result<&Task, EngineError> {
        self.tasks
            .iter()
            .find(|t| t.id == id)
            .ok_or(EngineError::TaskNotFound(id))
    }

    pub fn insert_task(&mut self, draft: TaskDraft, created_at: DateTime<Utc>) -> Task {
        let id = self.tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        let task = Task::from_draft(id, draft, created_at, self.tasks.len() as i64);
        self.tasks.push(task.clone());
        task
    }

    pub fn replace_task(&mut self, task: &Task) -> Result<(), EngineError> {
        let slot = self
            .tasks
            .iter_mut()
            .find(|t| t.id == task.id)
            .ok_or(EngineError::TaskNotFound(task.id))?;
        *slot = task.clone();
        Ok(())
    }

    pub fn remove_task(&mut self, id: TaskId) -> Result<(), EngineError> {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() == before {
            return Err(EngineError::TaskNotFound(id));
        }
        Ok(())
    }

    pub fn category(&self, id: CategoryId) -> Result<&Category, EngineError> {
        self.categories
            .iter()
            .find(|c| c.id == id)
            .ok_or(EngineError::CategoryNotFound(id))
    }

    pub fn insert_category(&mut self, draft: CategoryDraft) -> Category {
        let id = self.categories.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        let category = Category::from_draft(id, draft, self.categories.len() as i64);
        self.categories.push(category.clone());
        category
    }

    pub fn replace_category(&mut self, category: &Category) -> Result<(), EngineError> {
        let slot = self
            .categories
            .iter_mut()
            .find(|c| c.id == category.id)
            .ok_or(EngineError::CategoryNotFound(category.id))?;
        *slot = category.clone();
        Ok(())
    }

    /// Removes the category only. Tasks pointing at it keep the dangling id.
    pub fn remove_category(&mut self, id: CategoryId) -> Result<(), EngineError> {
        let before = self.categories.len();
        self.categories.retain(|c| c.id != id);
        if self.categories.len() == before {
            return Err(EngineError::CategoryNotFound(id));
        }
        Ok(())
    }
}
