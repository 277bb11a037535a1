use anyhow::Result;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use tracing::info;

use crate::model::category::{Category, CategoryDraft, CategoryId};
use crate::model::task::{Task, TaskDraft, TaskId};
use crate::repository::snapshot::Snapshot;
use crate::repository::traits::{CategoryRepository, TaskRepository};

/// Process-local store. Writers are serialized by the lock.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: RwLock<Snapshot>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(tasks: Vec<Task>, categories: Vec<Category>) -> Self {
        info!(tasks = tasks.len(), categories = categories.len(), "seeding in-memory store");
        Self {
            state: RwLock::new(Snapshot::new(tasks, categories)),
        }
    }
}

impl TaskRepository for InMemoryStore {
    fn list(&self) -> Result<Vec<Task>> {
        Ok(self.state.read().tasks.clone())
    }

    fn get(&self, id: TaskId) -> Result<Task> {
        Ok(self.state.read().task(id)?.clone())
    }

    fn create(&self, draft: TaskDraft, created_at: DateTime<Utc>) -> Result<Task> {
        let task = self.state.write().insert_task(draft, created_at);
        info!(id = task.id, "task created");
        Ok(task)
    }

    fn update(&self, task: &Task) -> Result<()> {
        self.state.write().replace_task(task)?;
        info!(id = task.id, "task updated");
        Ok(())
    }

    fn delete(&self, id: TaskId) -> Result<()> {
        self.state.write().remove_task(id)?;
        info!(id, "task deleted");
        Ok(())
    }
}

impl CategoryRepository for InMemoryStore {
    fn list(&self) -> Result<Vec<Category>> {
        Ok(self.state.read().categories.clone())
    }

    fn get(&self, id: CategoryId) -> Result<Category> {
        Ok(self.state.read().category(id)?.clone())
    }

    fn create(&self, draft: CategoryDraft) -> Result<Category> {
        let category = self.state.write().insert_category(draft);
        info!(id = category.id, "category created");
        Ok(category)
    }

    fn update(&self, category: &Category) -> Result<()> {
        self.state.write().replace_category(category)?;
        info!(id = category.id, "category updated");
        Ok(())
    }

    fn delete(&self, id: CategoryId) -> Result<()> {
        self.state.write().remove_category(id)?;
        info!(id, "category deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use chrono::TimeZone;

    #[test]
    fn test_seeded_store_round_trip() {
        let at = Utc.with_ymd_and_hms(2024, 6, 10, 9, 0, 0).unwrap();
        let store = InMemoryStore::with_seed(vec![Task::new(1, "seeded", at)], Vec::new());

        let created = TaskRepository::create(&store, TaskDraft::new("second"), at).unwrap();
        assert_eq!(created.id, 2);

        let mut fetched = TaskRepository::get(&store, 2).unwrap();
        fetched.title = "renamed".to_string();
        TaskRepository::update(&store, &fetched).unwrap();
        assert_eq!(TaskRepository::list(&store).unwrap()[1].title, "renamed");

        TaskRepository::delete(&store, 1).unwrap();
        let err = TaskRepository::get(&store, 1).unwrap_err();
        assert_eq!(err.downcast_ref::<EngineError>(), Some(&EngineError::TaskNotFound(1)));
    }

    #[test]
    fn test_categories() {
        let store = InMemoryStore::new();
        let work = CategoryRepository::create(&store, CategoryDraft::new("Work")).unwrap();
        let home = CategoryRepository::create(&store, CategoryDraft::new("Home")).unwrap();
        assert_eq!((work.id, home.id), (1, 2));
        CategoryRepository::delete(&store, work.id).unwrap();
        assert_eq!(CategoryRepository::list(&store).unwrap(), vec![home]);
    }
}
