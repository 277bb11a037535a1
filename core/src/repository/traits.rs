use anyhow::Result;
use chrono::{DateTime, Utc};

use crate::model::category::{Category, CategoryDraft, CategoryId};
use crate::model::task::{Task, TaskDraft, TaskId};

/// Owner of task lifecycles. Implementations assign ids.
pub trait TaskRepository {
    fn list(&self) -> Result<Vec<Task>>;
    fn get(&self, id: TaskId) -> Result<Task>;
    fn create(&self, draft: TaskDraft, created_at: DateTime<Utc>) -> Result<Task>;
    fn update(&self, task: &Task) -> Result<()>;
    fn delete(&self, id: TaskId) -> Result<()>;
}

pub trait CategoryRepository {
    fn list(&self) -> Result<Vec<Category>>;
    fn get(&self, id: CategoryId) -> Result<Category>;
    fn create(&self, draft: CategoryDraft) -> Result<Category>;
    fn update(&self, category: &Category) -> Result<()>;
    fn delete(&self, id: CategoryId) -> Result<()>;
}

impl<R: TaskRepository + ?Sized> TaskRepository for &R {
    fn list(&self) -> Result<Vec<Task>> {
        (**self).list()
    }

    fn get(&self, id: TaskId) -> Result<Task> {
        (**self).get(id)
    }

    fn create(&self, draft: TaskDraft, created_at: DateTime<Utc>) -> Result<Task> {
        (**self).create(draft, created_at)
    }

    fn update(&self, task: &Task) -> Result<()> {
        (**self).update(task)
    }

    fn delete(&self, id: TaskId) -> Result<()> {
        (**self).delete(id)
    }
}

impl<R: CategoryRepository + ?Sized> CategoryRepository for &R {
    fn list(&self) -> Result<Vec<Category>> {
        (**self).list()
    }

    fn get(&self, id: CategoryId) -> Result<Category> {
        (**self).get(id)
    }

    fn create(&self, draft: CategoryDraft) -> Result<Category> {
        (**self).create(draft)
    }

    fn update(&self, category: &Category) -> Result<()> {
        (**self).update(category)
    }

    fn delete(&self, id: CategoryId) -> Result<()> {
        (**self).delete(id)
    }
}
