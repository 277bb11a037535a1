use anyhow::Result;

use crate::error::EngineError;
use crate::model::category::{Category, CategoryDraft, CategoryId};
use crate::repository::CategoryRepository;

pub struct CategoryService<R: CategoryRepository> {
    repo: R,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
}

impl<R: CategoryRepository> CategoryService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn create_category(&self, mut draft: CategoryDraft) -> Result<Category> {
        draft.name = draft.name.trim().to_string();
        if draft.name.is_empty() {
            return Err(EngineError::EmptyName.into());
        }
        self.repo.create(draft)
    }

    pub fn list_categories(&self) -> Result<Vec<Category>> {
        self.repo.list()
    }

    pub fn get_category(&self, id: CategoryId) -> Result<Category> {
        self.repo.get(id)
    }

    pub fn update_category(&self, id: CategoryId, patch: CategoryPatch) -> Result<Category> {
        let mut category = self.repo.get(id)?;
        if let Some(name) = patch.name {
            let name = name.trim();
            if name.is_empty() {
                return Err(EngineError::EmptyName.into());
            }
            category.name = name.to_string();
        }
        if let Some(color) = patch.color {
            category.color = color;
        }
        if let Some(icon) = patch.icon {
            category.icon = icon;
        }
        self.repo.update(&category)?;
        Ok(category)
    }

    /// Tasks that referenced the category are left as they are and show as
    /// uncategorized from then on.
    pub fn delete_category(&self, id: CategoryId) -> Result<()> {
        self.repo.delete(id)
    }
}
